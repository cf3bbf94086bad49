//! Resolver-driven reinstall of a self-managed installation.
//!
//! Instead of swapping binaries directly, the self-managed path asks
//! quill's own resolver/installer to re-resolve a synthetic, throwaway
//! root package whose single dependency is quill itself, pinned to the
//! target version. The resolver is free to adjust transitive dependencies;
//! this module only constructs a correct, minimal request and relies
//! entirely on the external installer for execution.
//!
//! The request's policy is carried as named, immutable fields:
//!
//! - the lock mechanism is explicitly inert: no lock file is read or
//!   written, every run re-resolves from scratch;
//! - update mode is on, forcing re-resolution of the pinned dependency and
//!   its transitive closure even if something already satisfies it;
//! - no dry run: the plan is applied, not previewed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use semver::Version;
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info};

use crate::constants::{UPDATER_PACKAGE_NAME, UPDATER_PACKAGE_VERSION};
use crate::core::QuillError;
use crate::update::environment::RuntimeEnvironment;

/// Lock handling policy for a resolution request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockMode {
    /// The lock mechanism is inert: the referenced artifact is neither
    /// read nor written, and every run re-resolves from scratch.
    Disabled {
        /// The lock artifact the disabled mechanism stands in for.
        artifact: PathBuf,
    },
}

/// Synthetic, throwaway root package handed to the resolver.
///
/// Placeholder name and version, the runtime compatibility marker copied
/// from the active environment, and exactly one declared dependency: the
/// tool itself, pinned to the target version with no constraint operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticPackage {
    /// Placeholder package name.
    pub name: String,
    /// Placeholder package version.
    pub version: String,
    /// Runtime compatibility marker of the active environment (`X.Y.Z`).
    pub runtime_marker: String,
    /// Name of the pinned dependency.
    pub dependency: String,
    /// Exact version the dependency is pinned to.
    pub pinned_version: Version,
}

impl SyntheticPackage {
    /// Start building a synthetic package for upgrading `dependency` to
    /// `pinned_version`.
    #[must_use]
    pub fn builder(dependency: impl Into<String>, pinned_version: Version) -> SyntheticPackageBuilder {
        SyntheticPackageBuilder {
            name: UPDATER_PACKAGE_NAME.to_string(),
            version: UPDATER_PACKAGE_VERSION.to_string(),
            runtime_marker: None,
            dependency: dependency.into(),
            pinned_version,
        }
    }

    /// The dependency requirement as the resolver sees it: `=version`.
    #[must_use]
    pub fn pin(&self) -> String {
        format!("={}", self.pinned_version)
    }

    /// Render the package as a manifest the installer process accepts.
    pub fn to_manifest(&self) -> Result<String> {
        #[derive(Serialize)]
        struct Manifest<'a> {
            package: PackageTable<'a>,
            dependencies: toml::Table,
        }

        #[derive(Serialize)]
        struct PackageTable<'a> {
            name: &'a str,
            version: &'a str,
            runtime: &'a str,
        }

        let mut dependencies = toml::Table::new();
        dependencies.insert(self.dependency.clone(), toml::Value::String(self.pin()));

        let manifest = Manifest {
            package: PackageTable {
                name: &self.name,
                version: &self.version,
                runtime: &self.runtime_marker,
            },
            dependencies,
        };

        toml::to_string_pretty(&manifest).context("Failed to serialize synthetic manifest")
    }
}

/// Builder producing an immutable [`SyntheticPackage`].
#[derive(Debug)]
pub struct SyntheticPackageBuilder {
    name: String,
    version: String,
    runtime_marker: Option<String>,
    dependency: String,
    pinned_version: Version,
}

impl SyntheticPackageBuilder {
    /// Copy the runtime compatibility marker from the active environment.
    #[must_use]
    pub fn runtime_from(mut self, environment: &RuntimeEnvironment) -> Self {
        self.runtime_marker = Some(environment.runtime_marker());
        self
    }

    /// Set the runtime compatibility marker explicitly.
    #[must_use]
    pub fn runtime_marker(mut self, marker: impl Into<String>) -> Self {
        self.runtime_marker = Some(marker.into());
        self
    }

    /// Finish building. The marker defaults to `0.0.0` if never supplied,
    /// which resolvers treat as "no runtime floor".
    #[must_use]
    pub fn build(self) -> SyntheticPackage {
        SyntheticPackage {
            name: self.name,
            version: self.version,
            runtime_marker: self.runtime_marker.unwrap_or_else(|| "0.0.0".to_string()),
            dependency: self.dependency,
            pinned_version: self.pinned_version,
        }
    }
}

/// Immutable resolution request handed to the installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// The synthetic root package to resolve.
    pub root: SyntheticPackage,
    /// Lock handling policy.
    pub lock: LockMode,
    /// Force re-resolution of the pinned dependency and its transitive
    /// closure even if something already satisfies the constraint.
    pub update: bool,
    /// Whether to compute the plan without applying it. Always `false`
    /// on the self-update path: the mutation must actually happen.
    pub dry_run: bool,
}

impl ResolutionRequest {
    /// Build the self-update request: lock disabled, update mode on,
    /// no dry run.
    #[must_use]
    pub fn for_self_update(root: SyntheticPackage, lock_artifact: PathBuf) -> Self {
        Self {
            root,
            lock: LockMode::Disabled {
                artifact: lock_artifact,
            },
            update: true,
            dry_run: false,
        }
    }
}

/// Resolver/installer collaborator.
///
/// Implementations resolve and apply the request, blocking until
/// completion. Resolution internals are entirely outside this crate.
pub trait Installer {
    /// Resolve and apply `request`.
    fn run(&self, request: &ResolutionRequest) -> impl Future<Output = Result<()>> + Send;
}

/// Production installer: drives the self-managed installation's own
/// installer process.
///
/// Materializes the synthetic package as a manifest in a temporary
/// directory and invokes the managed quill executable against it in
/// update mode with the lockfile disabled. The installer's own atomicity
/// guarantees are relied upon; failures propagate unchanged.
pub struct EngineInstaller {
    engine: PathBuf,
}

impl EngineInstaller {
    /// Create an installer adapter around the managed executable.
    #[must_use]
    pub fn new(engine: PathBuf) -> Self {
        Self { engine }
    }
}

impl Installer for EngineInstaller {
    async fn run(&self, request: &ResolutionRequest) -> Result<()> {
        let workspace = tempfile::tempdir().context("Failed to create updater workspace")?;
        let manifest_path = workspace.path().join("quill.toml");

        let manifest = request.root.to_manifest()?;
        tokio::fs::write(&manifest_path, manifest)
            .await
            .context("Failed to write synthetic manifest")?;

        let mut args = vec![
            "install".to_string(),
            "--manifest-path".to_string(),
            manifest_path.display().to_string(),
        ];
        if request.update {
            args.push("--update".to_string());
            args.push(request.root.dependency.clone());
        }
        let LockMode::Disabled { .. } = &request.lock;
        args.push("--no-lock".to_string());
        if request.dry_run {
            args.push("--dry-run".to_string());
        }

        info!(
            "Reinstalling {} {} through the managed installer",
            request.root.dependency, request.root.pinned_version
        );
        debug!("Running {} {}", self.engine.display(), args.join(" "));

        let status = Command::new(&self.engine)
            .args(&args)
            .status()
            .await
            .map_err(|e| QuillError::InstallerFailed {
                status: format!("failed to spawn {}: {e}", self.engine.display()),
            })?;

        if !status.success() {
            return Err(QuillError::InstallerFailed {
                status: status.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package() -> SyntheticPackage {
        SyntheticPackage::builder("quill", Version::new(2, 0, 0))
            .runtime_marker("1.85.0")
            .build()
    }

    #[test]
    fn builder_uses_placeholder_identity() {
        let pkg = package();
        assert_eq!(pkg.name, "quill-updater");
        assert_eq!(pkg.version, "0.0.0");
    }

    #[test]
    fn pin_has_no_constraint_operators_beyond_exact() {
        assert_eq!(package().pin(), "=2.0.0");
    }

    #[test]
    fn manifest_contains_exact_pin_and_runtime() {
        let manifest = package().to_manifest().unwrap();
        assert!(manifest.contains("name = \"quill-updater\""));
        assert!(manifest.contains("runtime = \"1.85.0\""));
        assert!(manifest.contains("quill = \"=2.0.0\""));
    }

    #[test]
    fn self_update_request_policy() {
        let request =
            ResolutionRequest::for_self_update(package(), PathBuf::from("/qh/quill.lock"));

        assert!(request.update);
        assert!(!request.dry_run);
        assert_eq!(
            request.lock,
            LockMode::Disabled {
                artifact: PathBuf::from("/qh/quill.lock")
            }
        );
    }
}
