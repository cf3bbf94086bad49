//! Quill - a package manager that can upgrade itself in place.
//!
//! This crate implements the self-update path of the quill CLI: given an
//! optional version constraint, it locates the best matching release of
//! quill on the package index, compares it to the running version, and
//! performs an in-place upgrade when a newer release exists.
//!
//! # Architecture Overview
//!
//! Two components run sequentially with no concurrency of their own:
//!
//! 1. **Release selection** ([`update::ReleaseSelector`]) queries the
//!    package index for candidates matching a version constraint, filters
//!    by prerelease policy, orders by version, and returns the best
//!    applicable release or one of three "no update" terminals.
//! 2. **Update dispatch** ([`update::UpdateDispatcher`]) classifies the
//!    running installation (self-managed vs. externally installed) and
//!    routes to exactly one of two mutually exclusive strategies: a direct
//!    pinned upgrade through the environment's package facility, or a
//!    resolver-driven reinstall through quill's own installer.
//!
//! Data flows strictly one way: constraint, candidate list, selected
//! release, environment classification, execution strategy, side effect.
//! Everything is created fresh per invocation; nothing persists beyond the
//! process except the upgraded installation.
//!
//! # Core Modules
//!
//! - [`cli`]: command-line interface (`quill self update`)
//! - [`config`]: data/bin directory resolution and the platform enum
//! - [`core`]: error taxonomy and user-facing error rendering
//! - [`index`]: package index collaborator and the registry HTTP client
//! - [`update`]: release selection, environment classification, strategy
//!   routing, and the two execution adapters
//! - [`version`]: version constraints with prerelease policy
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Update to the latest stable release
//! quill self update
//!
//! # Update to an exact version
//! quill self update 1.9.0
//!
//! # Accept prereleases
//! quill self update --preview
//!
//! # Constrain the selection
//! quill self update "<=1.9.0-rc1" --preview
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod index;
pub mod update;
pub mod version;
