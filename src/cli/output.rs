//! Output formatting for the calendar shell
//!
//! Text mode renders calendar blocks the way `Display` lays them out, with a
//! numbered header per listing entry. JSON mode prints one document per
//! result on stdout.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::domain::{Calendar, Entry, Tag};

/// Output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output helper for consistent formatting
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    /// Prints a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Text => println!("{}", message),
            OutputFormat::Json => println!("{}", json!({ "success": true, "message": message })),
        }
    }

    /// Prints an error message to stderr
    pub fn error(&self, message: &str) {
        match self.format {
            OutputFormat::Text => eprintln!("Error: {}", message),
            OutputFormat::Json => eprintln!("{}", json!({ "success": false, "error": message })),
        }
    }

    /// Prints a block of prompt text (text only, ignored in JSON mode)
    pub fn text(&self, block: &str) {
        if self.format == OutputFormat::Text {
            print!("{}", block);
        }
    }

    /// Announces a newly created calendar
    pub fn calendar_created(&self, calendar: &Calendar) {
        match self.format {
            OutputFormat::Text => println!("Created calendar: {}", calendar.name()),
            OutputFormat::Json => self.json(&json!({
                "calendar": calendar.name(),
                "description": calendar.description(),
                "created": calendar.created(),
            })),
        }
    }

    /// Announces an event or task added to the calendar
    pub fn entry_added(&self, entry: &Entry) {
        match self.format {
            OutputFormat::Text => println!("Added {}: {}", entry.kind(), entry.event().title()),
            OutputFormat::Json => self.json(&entry_added_json(entry)),
        }
    }

    /// Announces a tag added to the calendar
    pub fn tag_added(&self, tag: &Tag) {
        match self.format {
            OutputFormat::Text => println!("Added tag: {} ({})", tag.name(), tag.id()),
            OutputFormat::Json => self.json(&json!({
                "added": "tag",
                "id": tag.id(),
                "name": tag.name(),
            })),
        }
    }

    /// Prints the tasks/events listing
    pub fn entries(&self, entries: &[&Entry]) {
        match self.format {
            OutputFormat::Text => print!("{}", entry_listing(entries)),
            OutputFormat::Json => self.json(&entries),
        }
    }

    /// Prints the tag listing
    pub fn tags(&self, tags: &[Tag]) {
        match self.format {
            OutputFormat::Text => print!("{}", tag_listing(tags)),
            OutputFormat::Json => self.json(&tags),
        }
    }

    /// Returns true if using JSON format
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Returns true if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Prints a verbose debug message (only when --verbose is set)
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Prints a verbose debug message with context (only when --verbose is set)
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }

    fn json<T: Serialize + ?Sized>(&self, data: &T) {
        match serde_json::to_string(data) {
            Ok(json) => println!("{}", json),
            Err(e) => self.error(&format!("Failed to serialize output: {}", e)),
        }
    }
}

fn entry_added_json(entry: &Entry) -> Value {
    let event = entry.event();
    json!({
        "added": entry.kind(),
        "title": event.title(),
        "start": event.start(),
        "end": event.end(),
    })
}

/// Renders entries as numbered blocks, each followed by a blank line
fn entry_listing(entries: &[&Entry]) -> String {
    if entries.is_empty() {
        return "No tasks or events.\n".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("#{} [{}]\n{}\n", i + 1, entry.kind(), entry))
        .collect()
}

/// Renders tags under their IDs, each followed by a blank line
fn tag_listing(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags.\n".to_string();
    }

    tags.iter()
        .map(|tag| format!("[{}]\n{}\n", tag.id(), tag))
        .collect()
}
