//! Tag domain model
//!
//! Tags are named labels. A calendar keeps its own list of tags and every
//! event keeps another; the two lists are independent copies.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::clock::{SharedClock, SystemClock};
use super::id::TagId;
use super::DATETIME_FORMAT;

/// A named label with a description
///
/// Equality only looks at `name` and `description`: two tags with the same
/// text are equal even when their IDs and timestamps differ.
#[derive(Clone, Serialize)]
pub struct Tag {
    id: TagId,
    name: String,
    description: String,
    created: NaiveDateTime,
    modified: NaiveDateTime,
    #[serde(skip)]
    clock: SharedClock,
}

impl Tag {
    /// Creates a tag stamped with the system clock
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_clock(SystemClock::shared(), name, description)
    }

    /// Creates a tag stamped with the given clock
    pub fn with_clock(
        clock: SharedClock,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let now = clock.now();
        Self {
            id: TagId::new(&name, now),
            name,
            description: description.into(),
            created: now,
            modified: now,
            clock,
        }
    }

    /// Returns the tag ID
    pub fn id(&self) -> &TagId {
        &self.id
    }

    /// Returns the name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the tag was created
    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    /// Returns when the tag last changed
    pub fn modified(&self) -> NaiveDateTime {
        self.modified
    }

    /// Sets the name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.modified = self.clock.now();
    }

    /// Sets the description
    pub fn redescribe(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.modified = self.clock.now();
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description
    }
}

impl Eq for Tag {}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tag")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .finish()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tag: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Created: {}", self.created.format(DATETIME_FORMAT))?;
        writeln!(f, "Modified: {}", self.modified.format(DATETIME_FORMAT))
    }
}
