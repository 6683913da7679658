//! Calendar aggregate
//!
//! A calendar owns an ordered list of entries (events and tasks) and an
//! ordered list of tags. Calendar tags are not linked to the tags stored on
//! individual events; adding or removing one never touches the other.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::clock::{SharedClock, SystemClock};
use super::event::Event;
use super::tag::Tag;
use super::task::Task;
use super::DATETIME_FORMAT;

/// An element of a calendar's event list
///
/// Both variants order by start time. Equality compares the underlying
/// event fields only, so a task and a plain event with identical fields are
/// equal.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Event(Event),
    Task(Task),
}

impl Entry {
    /// Returns the event fields shared by both variants
    pub fn event(&self) -> &Event {
        match self {
            Entry::Event(event) => event,
            Entry::Task(task) => task.event(),
        }
    }

    /// Mutable access to the event fields for tracked changes
    pub fn event_mut(&mut self) -> &mut Event {
        match self {
            Entry::Event(event) => event,
            Entry::Task(task) => task.event_mut(),
        }
    }

    /// Returns true for the task variant
    pub fn is_task(&self) -> bool {
        matches!(self, Entry::Task(_))
    }

    /// Returns the task, if this entry is one
    pub fn as_task(&self) -> Option<&Task> {
        match self {
            Entry::Task(task) => Some(task),
            Entry::Event(_) => None,
        }
    }

    /// Returns the task mutably, if this entry is one
    pub fn as_task_mut(&mut self) -> Option<&mut Task> {
        match self {
            Entry::Task(task) => Some(task),
            Entry::Event(_) => None,
        }
    }

    /// Returns a short label for the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Entry::Event(_) => "event",
            Entry::Task(_) => "task",
        }
    }
}

impl From<Event> for Entry {
    fn from(event: Event) -> Self {
        Entry::Event(event)
    }
}

impl From<Task> for Entry {
    fn from(task: Task) -> Self {
        Entry::Task(task)
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.event() == other.event()
    }
}

impl Eq for Entry {}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Event(event) => write!(f, "{}", event),
            Entry::Task(task) => write!(f, "{}", task),
        }
    }
}

/// A named collection of events and tags
///
/// Every mutating operation refreshes `modified`. Equality compares all of
/// name, description, created, modified, events and tags, so two calendars
/// with the same content but different `modified` stamps are not equal.
#[derive(Clone, Serialize)]
pub struct Calendar {
    name: String,
    description: String,
    created: NaiveDateTime,
    modified: NaiveDateTime,
    events: Vec<Entry>,
    tags: Vec<Tag>,
    #[serde(skip)]
    clock: SharedClock,
}

impl Calendar {
    /// Creates an empty calendar stamped with the system clock
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_clock(SystemClock::shared(), name, description)
    }

    /// Creates an empty calendar stamped with the given clock
    pub fn with_clock(
        clock: SharedClock,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = clock.now();
        Self {
            name: name.into(),
            description: description.into(),
            created: now,
            modified: now,
            events: Vec::new(),
            tags: Vec::new(),
            clock,
        }
    }

    /// Returns the calendar name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns when the calendar was created
    pub fn created(&self) -> NaiveDateTime {
        self.created
    }

    /// Returns when the calendar last changed
    pub fn modified(&self) -> NaiveDateTime {
        self.modified
    }

    /// Returns the entries in insertion order
    pub fn events(&self) -> &[Entry] {
        &self.events
    }

    /// Mutable access to the entry at `index`
    ///
    /// Changes made through the entry are tracked on the entry itself; the
    /// calendar's `modified` stamp is left alone.
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Entry> {
        self.events.get_mut(index)
    }

    /// Iterates mutably over the task entries
    pub fn tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.events.iter_mut().filter_map(Entry::as_task_mut)
    }

    /// Returns the calendar's tags in insertion order
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the entries ordered by start time; ties keep insertion order
    pub fn events_chronological(&self) -> Vec<&Entry> {
        let mut sorted: Vec<&Entry> = self.events.iter().collect();
        sorted.sort_by(|a, b| Event::chronological(a.event(), b.event()));
        sorted
    }

    /// Iterates over the task entries
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.events.iter().filter_map(Entry::as_task)
    }

    /// Sets the name
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Sets the description
    pub fn redescribe(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.touch();
    }

    /// Appends an event or task
    pub fn add_event(&mut self, entry: impl Into<Entry>) {
        self.events.push(entry.into());
        self.touch();
    }

    /// Removes the first entry equal to `event`
    ///
    /// Returns false and leaves the calendar untouched when no entry matches.
    pub fn remove_event(&mut self, event: &Event) -> bool {
        match self.events.iter().position(|e| e.event() == event) {
            Some(index) => {
                self.events.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Replaces the whole event list
    pub fn set_events(&mut self, events: Vec<Entry>) {
        self.events = events;
        self.touch();
    }

    /// Appends a tag to the calendar's tag list
    pub fn add_tag(&mut self, tag: Tag) {
        self.tags.push(tag);
        self.touch();
    }

    /// Removes the first tag equal to `tag`
    ///
    /// Events that carry an equal tag keep it.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        match self.tags.iter().position(|t| t == tag) {
            Some(index) => {
                self.tags.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Replaces the whole tag list
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
        self.touch();
    }

    fn touch(&mut self) {
        self.modified = self.clock.now();
    }
}

impl PartialEq for Calendar {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.created == other.created
            && self.modified == other.modified
            && self.events == other.events
            && self.tags == other.tags
    }
}

impl Eq for Calendar {}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("created", &self.created)
            .field("modified", &self.modified)
            .field("events", &self.events)
            .field("tags", &self.tags)
            .finish()
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Description: {}", self.description)?;
        writeln!(f, "Created: {}", self.created.format(DATETIME_FORMAT))?;
        writeln!(f, "Modified: {}", self.modified.format(DATETIME_FORMAT))?;

        writeln!(f, "Events ({}):", self.events.len())?;
        for entry in &self.events {
            writeln!(f)?;
            write!(f, "{}", entry)?;
        }

        writeln!(f, "Tags ({}):", self.tags.len())?;
        for tag in &self.tags {
            writeln!(f)?;
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}
