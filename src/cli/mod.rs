//! Command-line interface for quill.
//!
//! Each command is implemented as a separate module with its own argument
//! structure and execution logic. The `self` subcommand group hosts the
//! operations that act on the quill installation itself; `self update` is
//! the in-place upgrade path.
//!
//! # Exit codes
//!
//! Commands return a [`std::process::ExitCode`] rather than calling
//! `process::exit` deep in the call stack. For `self update`:
//!
//! - `0`: already on the latest version, or the update succeeded
//! - `1`: no matching release, no new release, or a fatal failure
//!
//! # Global options
//!
//! - `--verbose`: debug-level logging
//! - `--quiet`: errors only

pub mod self_update;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Main CLI application structure for quill.
///
/// Handles global flags and delegates to subcommands. Uses the `clap`
/// derive API for parsing, help text, and validation.
#[derive(Parser)]
#[command(
    name = "quill",
    about = "Quill package manager",
    version,
    long_about = "Quill is a package manager that can upgrade itself in place with `quill self update`."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors, for automation.
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Operations on the quill installation itself.
    #[command(subcommand, name = "self")]
    SelfOps(SelfCommand),
}

/// The `quill self ...` subcommand group.
#[derive(Subcommand)]
pub enum SelfCommand {
    /// Update quill to the latest (or a specified) version.
    Update(self_update::SelfUpdateArgs),
}

impl Cli {
    /// Execute the parsed command.
    ///
    /// Initializes logging from the verbosity flags, then dispatches.
    /// Returns the process exit code; fatal errors propagate to `main`
    /// for user-friendly rendering.
    pub async fn execute(self) -> Result<ExitCode> {
        self.init_logging();

        match self.command {
            Commands::SelfOps(SelfCommand::Update(args)) => self_update::execute(args).await,
        }
    }

    /// Set up the tracing subscriber once, honoring `RUST_LOG` when set.
    fn init_logging(&self) {
        let default_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }
}
