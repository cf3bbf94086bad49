//! Version constraint parsing and matching for the self-update command.
//!
//! A [`VersionConstraint`] pairs a semver requirement with the prerelease
//! acceptance flag. It is built once per invocation, either from the
//! user's positional `VERSION` argument or, when that argument is absent,
//! as `>= current`. "Update to latest" is expressed as an ordinary
//! constraint rather than a special case.
//!
//! # Accepted syntax
//!
//! - bare versions are exact pins: `1.9.0` means `=1.9.0`
//! - a leading `v` is tolerated: `v1.9.0`
//! - explicit operators and ranges pass through to [`semver::VersionReq`]:
//!   `>=1.8`, `<=1.9.0-rc1`, `>=1.8, <2`
//!
//! # Prerelease policy
//!
//! Stable versions are matched with [`VersionReq::matches`]. When
//! prereleases are accepted (`--preview`), a prerelease version that the
//! plain check rejects is retried with its prerelease segment stripped,
//! so that a constraint such as `>=1.8` can select `2.0.0-rc.1`. The
//! constraint only *admits* prereleases; the release selector still
//! decides whether one is chosen.

use semver::{Version, VersionReq};

use crate::core::QuillError;

/// An immutable version constraint plus prerelease acceptance flag.
///
/// Supplied once per invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionConstraint {
    /// The parsed semver requirement.
    req: VersionReq,
    /// Whether prerelease versions may satisfy this constraint.
    allow_prerelease: bool,
    /// The constraint as the user (or the default rule) wrote it.
    raw: String,
}

impl VersionConstraint {
    /// Parse a user-supplied constraint string.
    ///
    /// Bare versions (optionally `v`-prefixed) are treated as exact pins;
    /// anything else must be a valid semver requirement.
    ///
    /// # Errors
    ///
    /// Returns [`QuillError::InvalidConstraint`] when the input is not a
    /// valid version or requirement.
    pub fn parse(input: &str, allow_prerelease: bool) -> Result<Self, QuillError> {
        let trimmed = input.trim();
        let normalized = normalize(trimmed);

        let req = VersionReq::parse(&normalized).map_err(|e| QuillError::InvalidConstraint {
            constraint: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            req,
            allow_prerelease,
            raw: trimmed.to_string(),
        })
    }

    /// Build the default "greater than or equal to the running version"
    /// constraint used when no version argument is supplied.
    #[must_use]
    pub fn latest_from(current: &Version, allow_prerelease: bool) -> Self {
        let raw = format!(">={current}");
        let req = VersionReq::parse(&raw).expect("formatted semver requirement is always valid");

        Self {
            req,
            allow_prerelease,
            raw,
        }
    }

    /// Whether prereleases may satisfy this constraint.
    #[must_use]
    pub const fn allows_prerelease(&self) -> bool {
        self.allow_prerelease
    }

    /// Check a version against the requirement under the prerelease policy.
    #[must_use]
    pub fn matches(&self, version: &Version) -> bool {
        if self.req.matches(version) {
            return true;
        }

        if self.allow_prerelease && !version.pre.is_empty() {
            let stripped = Version::new(version.major, version.minor, version.patch);
            return self.req.matches(&stripped);
        }

        false
    }

    /// The constraint string as supplied (or derived by the default rule).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Turn bare versions into exact pins and strip a leading `v`.
fn normalize(input: &str) -> String {
    let unprefixed = input.strip_prefix('v').unwrap_or(input);

    if Version::parse(unprefixed).is_ok() {
        format!("={unprefixed}")
    } else {
        input.to_string()
    }
}
