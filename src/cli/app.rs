//! Main CLI application structure

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::input::{LineSource, ReaderSource, TerminalSource};
use super::output::{Output, OutputFormat};
use super::shell::{self, Shell};
use crate::config::Config;
use crate::domain::{SharedClock, SystemClock};

#[derive(Parser)]
#[command(name = "cal")]
#[command(author, version, about = "A personal calendar of events, tasks and tags")]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Path to a config file
    #[arg(long, env = "CAL_CONFIG")]
    pub config: Option<PathBuf>,

    /// Calendar name (skips the prompt)
    #[arg(long)]
    pub name: Option<String>,

    /// Calendar description (skips the prompt)
    #[arg(long)]
    pub description: Option<String>,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let output = Output::new(cli.format.unwrap_or(config.default_format), cli.verbose);

    output.verbose("Calendar CLI starting");
    if let Some(path) = cli.config.clone().or_else(Config::default_path) {
        output.verbose_ctx("config", &format!("Config path: {}", path.display()));
    }

    let clock = SystemClock::shared();

    if io::stdin().is_terminal() {
        output.verbose("Reading from terminal");
        session(TerminalSource, &output, &cli, &config, clock)?;
    } else {
        output.verbose("Reading from piped input");
        // Keep stdout clean for JSON consumers
        let prompts: Box<dyn Write> = if output.is_json() {
            Box::new(io::stderr())
        } else {
            Box::new(io::stdout())
        };
        let stdin = io::stdin();
        session(
            ReaderSource::new(stdin.lock(), prompts),
            &output,
            &cli,
            &config,
            clock,
        )?;
    }

    output.verbose("Session completed successfully");
    Ok(())
}

/// Creates the calendar and runs the menu over it
fn session<S: LineSource>(
    mut source: S,
    output: &Output,
    cli: &Cli,
    config: &Config,
    clock: SharedClock,
) -> Result<()> {
    let name = cli.name.clone().or_else(|| config.calendar_name.clone());
    let description = cli
        .description
        .clone()
        .or_else(|| config.calendar_description.clone());

    let Some(calendar) = shell::create_calendar(&mut source, clock.clone(), name, description)?
    else {
        output.verbose("Input ended before a calendar was created");
        return Ok(());
    };

    output.calendar_created(&calendar);

    let calendar = Shell::new(source, output, calendar, clock)
        .with_sorted_events(config.sort_events)
        .run()?;

    if output.is_verbose() {
        output.verbose_ctx("summary", &calendar.to_string());
    }
    output.success("Goodbye!");
    Ok(())
}
