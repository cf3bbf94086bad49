//! Strategy routing and execution for a selected release.

use anyhow::Result;
use tracing::{debug, info};

use crate::config::UpdateConfig;
use crate::constants::SELF_PACKAGE_NAME;
use crate::index::Release;
use crate::update::environment::RuntimeEnvironment;
use crate::update::facility::{PackageFacility, PinnedSpec};
use crate::update::reinstall::{Installer, ResolutionRequest, SyntheticPackage};

/// The chosen update strategy bound to its target.
///
/// Derived deterministically from the environment classification: the
/// same environment always yields the same strategy. The two variants are
/// mutually exclusive and total: every classified environment maps to
/// exactly one, with no fallback between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    /// Delegate to the environment's own package facility with an
    /// exact-version force request.
    DirectUpgrade {
        /// The pinned package to install.
        spec: PinnedSpec,
    },
    /// Hand a synthetic root package to quill's own resolver/installer.
    ResolverDrivenReinstall {
        /// The complete resolution request (exact pin, update mode on,
        /// lock disabled, no dry run).
        request: ResolutionRequest,
    },
}

/// Classifies the running installation and executes the matching
/// update strategy.
///
/// Planning is pure; only [`execute`](Self::execute) has side effects.
/// Collaborator failures propagate verbatim, with no retry and no rollback.
pub struct UpdateDispatcher<F, N> {
    environment: RuntimeEnvironment,
    config: UpdateConfig,
    facility: F,
    installer: N,
}

impl<F: PackageFacility, N: Installer> UpdateDispatcher<F, N> {
    /// Create a dispatcher over an already-classified environment and
    /// explicitly resolved configuration.
    pub fn new(
        environment: RuntimeEnvironment,
        config: UpdateConfig,
        facility: F,
        installer: N,
    ) -> Self {
        Self {
            environment,
            config,
            facility,
            installer,
        }
    }

    /// Derive the update plan for `release`.
    ///
    /// Routing is a pure function of whether the installation root lies
    /// under the self-managed data directory: under it, quill's own
    /// installer performs a resolver-driven reinstall; anywhere else, the
    /// external package facility performs a direct pinned upgrade.
    #[must_use]
    pub fn plan(&self, release: &Release) -> UpdatePlan {
        if self.environment.is_self_managed(&self.config.data_dir) {
            debug!(
                "Installation at {} is self-managed; planning resolver-driven reinstall",
                self.environment.root.display()
            );

            let root = SyntheticPackage::builder(SELF_PACKAGE_NAME, release.version.clone())
                .runtime_from(&self.environment)
                .build();

            UpdatePlan::ResolverDrivenReinstall {
                request: ResolutionRequest::for_self_update(root, self.config.lock_artifact()),
            }
        } else {
            debug!(
                "Installation at {} is externally managed; planning direct upgrade",
                self.environment.root.display()
            );

            UpdatePlan::DirectUpgrade {
                spec: PinnedSpec::new(SELF_PACKAGE_NAME, release.version.clone()),
            }
        }
    }

    /// Execute a previously derived plan. Runs exactly one branch.
    ///
    /// # Errors
    ///
    /// Facility or installer failures propagate unchanged as fatal
    /// outcomes for this invocation.
    pub async fn execute(&self, plan: &UpdatePlan) -> Result<()> {
        match plan {
            UpdatePlan::DirectUpgrade { spec } => {
                info!("Executing direct upgrade to {spec}");
                self.facility.install_pinned(spec).await
            }
            UpdatePlan::ResolverDrivenReinstall { request } => {
                info!(
                    "Executing resolver-driven reinstall to {}",
                    request.root.pinned_version
                );
                self.installer.run(request).await
            }
        }
    }

    /// Plan and execute in one step.
    pub async fn update(&self, release: &Release) -> Result<()> {
        let plan = self.plan(release);
        self.execute(&plan).await
    }

    /// The facility collaborator. Exposed for test assertions.
    pub const fn facility(&self) -> &F {
        &self.facility
    }

    /// The installer collaborator. Exposed for test assertions.
    pub const fn installer(&self) -> &N {
        &self.installer
    }
}
