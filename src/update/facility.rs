//! Direct upgrade through the environment's own package facility.
//!
//! When quill was installed by something other than its own installer
//! (most commonly `cargo install`), the self-update path does not
//! re-resolve anything itself. It hands the external facility an
//! "install this exact version, force" request and lets that facility do
//! all dependency resolution.

use anyhow::Result;
use semver::Version;
use tokio::process::Command;
use tracing::{debug, info};

use crate::core::QuillError;

/// A package pinned to an exact version, rendered `name==version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedSpec {
    /// Package identifier.
    pub name: String,
    /// Exact target version, no constraint operators.
    pub version: Version,
}

impl PinnedSpec {
    /// Pin `name` to `version`.
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl std::fmt::Display for PinnedSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=={}", self.name, self.version)
    }
}

/// External package-installation facility collaborator.
///
/// Implementations perform an "install/upgrade, exact version, force"
/// request and block until completion. Failures propagate unchanged.
pub trait PackageFacility {
    /// Install `spec`, replacing whatever is currently installed.
    fn install_pinned(&self, spec: &PinnedSpec) -> impl Future<Output = Result<()>> + Send;
}

/// Production facility for externally-installed copies: `cargo install`.
///
/// Runs `cargo install <name> --version <v> --force --locked`, which
/// rebuilds and replaces the binary in cargo's bin directory. Cargo owns
/// the whole resolution and replacement; quill only issues the request.
#[derive(Debug, Default, Clone, Copy)]
pub struct CargoFacility;

impl CargoFacility {
    /// Create the facility adapter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl PackageFacility for CargoFacility {
    async fn install_pinned(&self, spec: &PinnedSpec) -> Result<()> {
        let cargo = which::which("cargo").map_err(|_| QuillError::FacilityNotFound {
            name: "cargo".to_string(),
        })?;

        let version = spec.version.to_string();
        let command_line = format!(
            "{} install {} --version {version} --force --locked",
            cargo.display(),
            spec.name
        );
        info!("Delegating upgrade to package facility: {command_line}");

        let status = Command::new(&cargo)
            .args(["install", &spec.name, "--version", &version, "--force", "--locked"])
            .status()
            .await
            .map_err(|e| QuillError::FacilityFailed {
                command: command_line.clone(),
                status: format!("failed to spawn: {e}"),
            })?;

        if !status.success() {
            return Err(QuillError::FacilityFailed {
                command: command_line,
                status: status.to_string(),
            }
            .into());
        }

        debug!("Package facility finished successfully");
        Ok(())
    }
}
