//! # Command-Line Interface
//!
//! An interactive menu over a single in-memory calendar.
//!
//! ## Menu
//!
//! | Option | Action |
//! |--------|--------|
//! | 1 | Add a task (title, description, location, due time) |
//! | 2 | Add an event (title, description, location, start, end) |
//! | 3 | Add a tag (name, description) |
//! | 4 | View tasks/events |
//! | 5 | View tags |
//! | 6 | Exit |
//!
//! Times are entered as year, month, day, hour and minute. Nothing is saved:
//! the calendar is discarded when the session ends.
//!
//! ## Output Formats
//!
//! `--format text` (default) prints human-readable blocks; `--format json`
//! prints one JSON document per result.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! cal --verbose --name Work --description "My work cal"
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and start the session.

mod app;
mod input;
mod output;
mod shell;

pub use app::{run, Cli};
pub use input::{InputError, LineSource, ReaderSource, ScriptedSource, TerminalSource};
pub use output::{Output, OutputFormat};
pub use shell::{create_calendar, MenuChoice, Shell};
