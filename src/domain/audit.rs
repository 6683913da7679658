//! Structured change history for events
//!
//! Each successful field setter on an [`Event`](super::Event) appends one
//! [`AuditEntry`]. Entries keep the field, the previous value and the new
//! value; the `[<time>] <Field> changed to <value>` text is produced only
//! when an entry is displayed.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::DATETIME_FORMAT;

/// The event field an audit entry refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditField {
    Title,
    Description,
    Location,
    Start,
    End,
    Tags,
}

impl AuditField {
    /// Returns the display label used in rendered entries
    pub fn label(&self) -> &'static str {
        match self {
            AuditField::Title => "Title",
            AuditField::Description => "Description",
            AuditField::Location => "Location",
            AuditField::Start => "Start time",
            AuditField::End => "End time",
            AuditField::Tags => "Tags",
        }
    }
}

/// One recorded change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// When the change was recorded
    pub at: NaiveDateTime,
    /// Which field changed
    pub field: AuditField,
    /// Value before the change, rendered as text
    pub previous: String,
    /// Value after the change, rendered as text
    pub value: String,
}

impl AuditEntry {
    /// Creates an entry for a change to `field`
    pub fn new(
        at: NaiveDateTime,
        field: AuditField,
        previous: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            at,
            field,
            previous: previous.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} changed to {}",
            self.at.format(DATETIME_FORMAT),
            self.field.label(),
            self.value
        )
    }
}

/// Append-only list of [`AuditEntry`] values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuditLog(Vec<AuditEntry>);

impl AuditLog {
    /// Creates an empty log
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an entry
    pub(crate) fn record(&mut self, entry: AuditEntry) {
        self.0.push(entry);
    }

    /// Number of recorded changes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the most recent entry
    pub fn last(&self) -> Option<&AuditEntry> {
        self.0.last()
    }

    /// Renders every entry as a display line
    pub fn lines(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a AuditLog {
    type Item = &'a AuditEntry;
    type IntoIter = std::slice::Iter<'a, AuditEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
