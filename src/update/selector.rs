//! Release selection: which published version, if any, to install.

use anyhow::Result;
use semver::Version;
use tracing::debug;

use crate::index::{PackageIndex, Release};
use crate::version::VersionConstraint;

/// Terminal outcome of release selection.
///
/// The four variants map one-to-one onto the user-facing messages of the
/// `self update` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The index returned zero candidates satisfying the constraint.
    NoMatch,
    /// Candidates exist but none is an upgrade: everything eligible is
    /// older than the running version, or the only matches are
    /// prereleases excluded by policy.
    NoNewer,
    /// The best candidate is exactly the running version.
    AlreadyLatest,
    /// A strictly newer, policy-eligible release.
    Found(Release),
}

/// Selects the best applicable release from the package index.
///
/// Holds the index collaborator, the package identifier, and the running
/// version. Selection is a single linear pass: query, sort descending,
/// scan for the first policy-eligible candidate, classify the result.
/// The chosen release, when present, always satisfies the constraint and
/// is never a prerelease unless prereleases were explicitly accepted.
pub struct ReleaseSelector<'a, I> {
    index: &'a I,
    package: &'a str,
    current: Version,
}

impl<'a, I: PackageIndex> ReleaseSelector<'a, I> {
    /// Create a selector for `package` with the given running version.
    pub fn new(index: &'a I, package: &'a str, current: Version) -> Self {
        Self {
            index,
            package,
            current,
        }
    }

    /// The version of the running binary this selector compares against.
    #[must_use]
    pub const fn current_version(&self) -> &Version {
        &self.current
    }

    /// Select the best release satisfying `constraint`.
    ///
    /// Candidates are ordered by version, descending; equal versions are
    /// interchangeable. The scan skips prereleases when prerelease
    /// acceptance is disabled and stops at the first eligible candidate,
    /// which is therefore the unique highest-ranked one.
    ///
    /// A best candidate strictly older than the running version is
    /// reported as [`Outcome::NoNewer`]: an update command never
    /// silently downgrades.
    ///
    /// # Errors
    ///
    /// Index query failures propagate unchanged.
    pub async fn select(&self, constraint: &VersionConstraint) -> Result<Outcome> {
        debug!(
            "Selecting release of {} matching {constraint} (current {})",
            self.package, self.current
        );

        let mut candidates = self.index.find_releases(self.package, constraint).await?;
        if candidates.is_empty() {
            debug!("Index returned no candidates");
            return Ok(Outcome::NoMatch);
        }

        candidates.sort_by(|a, b| b.version.cmp(&a.version));

        let selected = candidates.into_iter().find(|candidate| {
            if candidate.is_prerelease() && !constraint.allows_prerelease() {
                debug!("Skipping prerelease candidate {}", candidate.version);
                return false;
            }
            true
        });

        let Some(release) = selected else {
            debug!("All candidates excluded by prerelease policy");
            return Ok(Outcome::NoNewer);
        };

        if release.version == self.current {
            debug!("Best candidate equals the running version");
            return Ok(Outcome::AlreadyLatest);
        }

        if release.version < self.current {
            debug!(
                "Best candidate {} is older than the running version",
                release.version
            );
            return Ok(Outcome::NoNewer);
        }

        debug!("Selected release {}", release.version);
        Ok(Outcome::Found(release))
    }
}
