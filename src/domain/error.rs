//! Errors raised by calendar operations

use chrono::NaiveDateTime;
use thiserror::Error;

/// Result type alias for calendar operations
pub type Result<T> = std::result::Result<T, CalendarError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CalendarError {
    /// A start/end pair where the start falls after the end
    #[error("Start time cannot be after end time (start: {start}, end: {end})")]
    InvalidTimeRange {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl CalendarError {
    /// Checks that `start` does not fall after `end`
    pub(crate) fn check_range(start: NaiveDateTime, end: NaiveDateTime) -> Result<()> {
        if start > end {
            Err(CalendarError::InvalidTimeRange { start, end })
        } else {
            Ok(())
        }
    }
}
