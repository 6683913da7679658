//! Domain models for the calendar
//!
//! Contains the calendar, event, task and tag types without any I/O concerns.
//! Timestamps come from an injected [`Clock`].

mod audit;
mod calendar;
mod clock;
mod error;
mod event;
mod id;
mod tag;
mod task;

use chrono::Duration;

pub use audit::{AuditEntry, AuditField, AuditLog};
pub use calendar::{Calendar, Entry};
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use error::{CalendarError, Result};
pub use event::Event;
pub use id::{IdError, TagId};
pub use tag::Tag;
pub use task::Task;

/// Format used when rendering timestamps (ISO local date-time)
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Renders a duration compactly, e.g. `1h 30m`, `2d 3h`, `-15m`
///
/// Seconds are truncated; anything under a minute renders as `0m`.
pub fn format_duration(duration: Duration) -> String {
    let total_minutes = duration.num_minutes();
    let sign = if total_minutes < 0 { "-" } else { "" };
    let minutes = total_minutes.unsigned_abs();

    let days = minutes / (24 * 60);
    let hours = (minutes / 60) % 24;
    let mins = minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if mins > 0 || parts.is_empty() {
        parts.push(format!("{}m", mins));
    }

    format!("{}{}", sign, parts.join(" "))
}
