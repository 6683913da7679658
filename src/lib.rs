//! Calendar CLI - a personal calendar of events, tasks and tags
//!
//! The [`domain`] module holds the calendar model: time-bounded events with
//! an audit log of field changes, zero-duration tasks, and tags. The [`cli`]
//! module wraps it in an interactive console menu.

pub mod cli;
pub mod config;
pub mod domain;

pub use domain::{Calendar, CalendarError, Entry, Event, Tag, TagId, Task};
