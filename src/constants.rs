//! Global constants used throughout the quill codebase.
//!
//! Defining these centrally keeps the package identity, environment
//! variables, and registry endpoints discoverable and consistent across
//! modules.

/// Name under which quill publishes itself on its own registry.
///
/// The self-update path installs exactly this package, pinned to the
/// selected release version.
pub const SELF_PACKAGE_NAME: &str = "quill";

/// Environment variable overriding the self-managed data directory.
///
/// When set, its value (tilde-expanded) replaces the platform-standard
/// per-user data directory as the root under which quill-managed
/// installations live.
pub const DATA_DIR_ENV: &str = "QUILL_HOME";

/// Default base URL of the quill package registry.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.quill-pm.dev";

/// Placeholder name for the synthetic root package used by the
/// resolver-driven reinstall path.
pub const UPDATER_PACKAGE_NAME: &str = "quill-updater";

/// Placeholder version for the synthetic root package.
pub const UPDATER_PACKAGE_VERSION: &str = "0.0.0";
