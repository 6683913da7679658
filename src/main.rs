//! Calendar CLI - a personal calendar in the terminal

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = calendar_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
