//! Release-selection properties over synthetic candidate sets.

use anyhow::Result;
use semver::Version;

use quill_cli::index::{PackageIndex, Release};
use quill_cli::update::{Outcome, ReleaseSelector};
use quill_cli::version::VersionConstraint;

/// Index fake that applies the constraint filter the way a real index
/// would, returning candidates in whatever order it holds them.
struct FakeIndex {
    versions: Vec<String>,
}

impl FakeIndex {
    fn new(versions: &[&str]) -> Self {
        Self {
            versions: versions.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PackageIndex for FakeIndex {
    async fn find_releases(
        &self,
        name: &str,
        constraint: &VersionConstraint,
    ) -> Result<Vec<Release>> {
        Ok(self
            .versions
            .iter()
            .map(|v| Version::parse(v).unwrap())
            .filter(|v| constraint.matches(v))
            .map(|v| Release::new(name, v))
            .collect())
    }
}

fn version(s: &str) -> Version {
    Version::parse(s).unwrap()
}

async fn outcome(versions: &[&str], current: &str, constraint: &VersionConstraint) -> Outcome {
    let index = FakeIndex::new(versions);
    ReleaseSelector::new(&index, "quill", version(current))
        .select(constraint)
        .await
        .unwrap()
}

/// For every candidate set, the chosen release is the maximum eligible
/// element: no other candidate satisfying the constraint and the
/// prerelease policy has a strictly greater version.
#[tokio::test]
async fn chosen_release_is_maximal_across_sets() {
    let sets: [&[&str]; 5] = [
        &["2.0.0", "1.9.0-rc1", "1.8.0"],
        &["0.2.0", "3.1.4", "3.1.5", "2.9.9"],
        &["1.8.1", "1.8.2", "1.8.10"],
        &["5.0.0-alpha.1", "4.9.0", "5.0.0-beta.2"],
        &["1.8.0", "1.8.0", "2.0.0"],
    ];

    for set in sets {
        let constraint = VersionConstraint::latest_from(&version("0.1.0"), false);
        let index = FakeIndex::new(set);
        let selected = ReleaseSelector::new(&index, "quill", version("0.1.0"))
            .select(&constraint)
            .await
            .unwrap();

        let Outcome::Found(release) = selected else {
            panic!("expected a selection from {set:?}");
        };

        for candidate in set {
            let candidate = version(candidate);
            if candidate.pre.is_empty() && constraint.matches(&candidate) {
                assert!(
                    candidate <= release.version,
                    "{candidate} beats chosen {} in {set:?}",
                    release.version
                );
            }
        }
    }
}

/// With prerelease acceptance off, the chosen release is never a
/// prerelease, even when prereleases outrank every stable candidate.
#[tokio::test]
async fn stable_policy_never_selects_prerelease() {
    let constraint = VersionConstraint::latest_from(&version("1.0.0"), false);
    let result = outcome(
        &["3.0.0-alpha.1", "3.0.0-beta.1", "2.5.0", "2.4.0"],
        "1.0.0",
        &constraint,
    )
    .await;

    assert_eq!(
        result,
        Outcome::Found(Release::new("quill", version("2.5.0")))
    );
}

#[tokio::test]
async fn preview_policy_may_select_prerelease() {
    let constraint = VersionConstraint::latest_from(&version("1.0.0"), true);
    let result = outcome(&["3.0.0-alpha.1", "2.5.0"], "1.0.0", &constraint).await;

    assert_eq!(
        result,
        Outcome::Found(Release::new("quill", version("3.0.0-alpha.1")))
    );
}

#[tokio::test]
async fn exact_match_of_current_is_already_latest() {
    let constraint = VersionConstraint::latest_from(&version("1.8.0"), false);
    let result = outcome(&["1.8.0"], "1.8.0", &constraint).await;

    assert_eq!(result, Outcome::AlreadyLatest);
}

#[tokio::test]
async fn empty_set_is_no_match() {
    let constraint = VersionConstraint::latest_from(&version("1.8.0"), false);
    let result = outcome(&[], "1.8.0", &constraint).await;

    assert_eq!(result, Outcome::NoMatch);
}

#[tokio::test]
async fn constraint_below_current_is_no_newer() {
    let constraint = VersionConstraint::parse("<1.0.0", false).unwrap();
    let result = outcome(&["0.9.0", "0.8.0"], "1.8.0", &constraint).await;

    assert_eq!(result, Outcome::NoNewer);
}

#[tokio::test]
async fn exact_pin_selects_that_version() {
    let constraint = VersionConstraint::parse("1.9.0", false).unwrap();
    let result = outcome(&["2.0.0", "1.9.0", "1.8.0"], "1.8.0", &constraint).await;

    assert_eq!(
        result,
        Outcome::Found(Release::new("quill", version("1.9.0")))
    );
}

#[tokio::test]
async fn prerelease_pin_requires_preview() {
    let pinned = VersionConstraint::parse("<=1.9.0-rc1", true).unwrap();
    let result = outcome(&["2.0.0", "1.9.0-rc1", "1.8.0"], "1.8.0", &pinned).await;

    assert_eq!(
        result,
        Outcome::Found(Release::new("quill", version("1.9.0-rc1")))
    );
}
