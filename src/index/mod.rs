//! Package index access for release discovery.
//!
//! The self-update command treats the registry as an external collaborator
//! behind the [`PackageIndex`] trait: given a package name and a
//! [`VersionConstraint`], it returns every known matching [`Release`], in
//! no guaranteed order. Sorting and prerelease policy are the release
//! selector's job, not the index's.
//!
//! [`HttpPackageIndex`] is the production implementation. It queries the
//! quill registry's JSON version listing, drops yanked entries, skips
//! version numbers that do not parse as semver (with a warning), and
//! filters by the constraint.

use anyhow::{Context, Result};
use semver::Version;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::constants::DEFAULT_REGISTRY_URL;
use crate::core::QuillError;
use crate::version::VersionConstraint;

/// A single published version of a package, as reported by the index.
///
/// Read-only within the update path; carries just enough metadata to
/// identify and install the candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Package identifier on the registry.
    pub name: String,
    /// Published version.
    pub version: Version,
}

impl Release {
    /// Create a release value.
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }

    /// Whether this release is flagged as not fully stable
    /// (alpha/beta/rc), i.e. carries a semver prerelease segment.
    #[must_use]
    pub fn is_prerelease(&self) -> bool {
        !self.version.pre.is_empty()
    }
}

/// External package index collaborator.
///
/// Implementations query whatever backs the registry. Ordering of the
/// returned list is unspecified.
pub trait PackageIndex {
    /// Find all releases of `name` satisfying `constraint`.
    fn find_releases(
        &self,
        name: &str,
        constraint: &VersionConstraint,
    ) -> impl Future<Output = Result<Vec<Release>>> + Send;
}

/// Version listing payload returned by the registry.
#[derive(Debug, Deserialize)]
struct VersionListing {
    versions: Vec<VersionEntry>,
}

/// One published version in the registry listing.
#[derive(Debug, Deserialize)]
struct VersionEntry {
    /// Version number as published.
    num: String,
    /// Whether the version has been withdrawn from installation.
    #[serde(default)]
    yanked: bool,
}

/// Production index backed by the quill registry's HTTP API.
pub struct HttpPackageIndex {
    client: reqwest::Client,
    base_url: String,
}

impl Default for HttpPackageIndex {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL)
    }
}

impl HttpPackageIndex {
    /// Create an index client against the given registry base URL.
    ///
    /// The base URL is injectable so tests and alternate registries can
    /// point elsewhere; the default is the official registry.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn listing_url(&self, name: &str) -> String {
        format!("{}/api/v1/packages/{name}", self.base_url)
    }
}

impl PackageIndex for HttpPackageIndex {
    async fn find_releases(
        &self,
        name: &str,
        constraint: &VersionConstraint,
    ) -> Result<Vec<Release>> {
        let url = self.listing_url(name);
        debug!("Querying package index: {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|_| QuillError::RegistryUnavailable { url: url.clone() })?;

        let response = response
            .error_for_status()
            .map_err(|_| QuillError::RegistryUnavailable { url: url.clone() })?;

        let listing: VersionListing =
            response
                .json()
                .await
                .map_err(|e| QuillError::RegistryResponseInvalid {
                    package: name.to_string(),
                    reason: e.to_string(),
                })?;

        let releases = filter_listing(name, listing.versions, constraint);
        debug!(
            "Index returned {} candidate(s) for {name} matching {constraint}",
            releases.len()
        );

        Ok(releases)
    }
}

/// Turn a raw registry listing into constraint-matching releases.
///
/// Yanked versions are dropped, unparseable version numbers are skipped
/// with a warning. No ordering is imposed.
fn filter_listing(
    name: &str,
    entries: Vec<VersionEntry>,
    constraint: &VersionConstraint,
) -> Vec<Release> {
    entries
        .into_iter()
        .filter(|entry| !entry.yanked)
        .filter_map(|entry| match Version::parse(&entry.num) {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("Skipping unparseable version '{}' of {name}: {e}", entry.num);
                None
            }
        })
        .filter(|version| constraint.matches(version))
        .map(|version| Release::new(name, version))
        .collect()
}

/// Parse a raw registry payload into releases. Exposed for the production
/// code path above and exercised directly in tests.
pub fn parse_listing(
    name: &str,
    body: &str,
    constraint: &VersionConstraint,
) -> Result<Vec<Release>> {
    let listing: VersionListing = serde_json::from_str(body).with_context(|| {
        format!("Failed to parse registry version listing for package '{name}'")
    })?;

    Ok(filter_listing(name, listing.versions, constraint))
}
