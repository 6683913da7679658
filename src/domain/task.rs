//! Task domain model
//!
//! Tasks are point-in-time events (start equals end) that can be marked
//! completed.

use std::fmt;
use std::ops::Deref;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::clock::{SharedClock, SystemClock};
use super::event::Event;

/// A zero-duration event with a completion flag
///
/// Toggling completion does not refresh `modified` and is not recorded in
/// the audit log; only the wrapped event's field setters are tracked.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    #[serde(flatten)]
    event: Event,
    completed: bool,
}

impl Task {
    /// Creates a task due at `at`, stamped with the system clock
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        Self::with_clock(SystemClock::shared(), title, description, location, at)
    }

    /// Creates a task due at `at`, stamped with the given clock
    pub fn with_clock(
        clock: SharedClock,
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            event: Event::unchecked(clock, title, description, location, at, at),
            completed: false,
        }
    }

    /// Returns true once the task is marked done
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Marks the task done or not done
    pub fn set_completed(&mut self, completed: bool) {
        self.completed = completed;
    }

    /// Returns the underlying event
    pub fn event(&self) -> &Event {
        &self.event
    }

    /// Mutable access to the underlying event for tracked field changes
    pub fn event_mut(&mut self) -> &mut Event {
        &mut self.event
    }
}

impl Deref for Task {
    type Target = Event;

    fn deref(&self) -> &Event {
        &self.event
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event)?;
        writeln!(f, "Completed: {}", if self.completed { "yes" } else { "no" })
    }
}
