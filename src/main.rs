//! Quill CLI entry point.
//!
//! Handles command-line argument parsing, error display, and command
//! execution. Selection outcomes map to exit codes inside the commands;
//! fatal errors are rendered with context and suggestions here.

use std::process::ExitCode;

use clap::Parser;
use quill_cli::cli;
use quill_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            // Convert to user-friendly error with context and suggestions
            user_friendly_error(e).display();
            ExitCode::FAILURE
        }
    }
}
