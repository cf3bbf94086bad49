//! The `quill self update` command.
//!
//! Locates the best matching release of quill on the package index,
//! compares it to the running version, and performs an in-place upgrade
//! when a newer release exists. The four selection outcomes map
//! one-to-one onto user-facing messages and exit codes; execution
//! failures from the collaborators propagate to `main` as fatal errors.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use semver::Version;

use crate::config::{Platform, UpdateConfig};
use crate::constants::SELF_PACKAGE_NAME;
use crate::index::HttpPackageIndex;
use crate::update::{
    CargoFacility, EngineInstaller, Outcome, ReleaseSelector, UpdateDispatcher,
};
use crate::version::VersionConstraint;

/// Command-line arguments for `quill self update`.
///
/// With no arguments the command updates to the latest stable release
/// compatible with the running version. A positional version argument
/// narrows the selection: bare versions are exact pins, and semver
/// requirement syntax is accepted for ranges.
#[derive(Parser, Debug)]
pub struct SelfUpdateArgs {
    /// The version (or version constraint) to update to.
    ///
    /// Accepts exact versions ("1.9.0", "v1.9.0") and requirement syntax
    /// (">=1.8", "<=1.9.0-rc1"). When omitted, updates to the latest
    /// release at or above the running version.
    #[arg(value_name = "VERSION")]
    pub version: Option<String>,

    /// Accept prerelease versions (alpha/beta/rc).
    #[arg(long)]
    pub preview: bool,
}

/// Execute the self-update command.
///
/// Classification, selection, and execution happen in one linear pass:
/// resolve configuration, detect the running environment, select a
/// release, then plan and execute exactly one update strategy. Nothing is
/// cached across invocations, and selection is never retried once
/// execution begins.
pub async fn execute(args: SelfUpdateArgs) -> Result<ExitCode> {
    let platform = Platform::current();
    let config = UpdateConfig::resolve(platform)?;
    let environment = crate::update::RuntimeEnvironment::current()?;

    let current = Version::parse(env!("CARGO_PKG_VERSION"))
        .context("Running binary has an invalid version")?;

    let constraint = match args.version.as_deref() {
        Some(raw) => VersionConstraint::parse(raw, args.preview)?,
        None => VersionConstraint::latest_from(&current, args.preview),
    };

    let index = HttpPackageIndex::default();
    let selector = ReleaseSelector::new(&index, SELF_PACKAGE_NAME, current);

    let release = match selector.select(&constraint).await? {
        Outcome::NoMatch => {
            println!(
                "{}",
                "No release found for the specified version".yellow()
            );
            return Ok(ExitCode::FAILURE);
        }
        Outcome::NoNewer => {
            println!("{}", "No new release found".yellow());
            return Ok(ExitCode::FAILURE);
        }
        Outcome::AlreadyLatest => {
            println!("{}", "You are using the latest version".green());
            return Ok(ExitCode::SUCCESS);
        }
        Outcome::Found(release) => release,
    };

    println!(
        "Updating to {}",
        release.version.to_string().cyan().bold()
    );
    println!();

    let installer = EngineInstaller::new(config.managed_exe());
    let dispatcher = UpdateDispatcher::new(environment, config, CargoFacility::new(), installer);
    dispatcher.update(&release).await?;

    println!();
    println!(
        "{} ({}) is installed now.",
        "quill".green().bold(),
        release.version.to_string().cyan()
    );

    Ok(ExitCode::SUCCESS)
}
