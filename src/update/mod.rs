//! Self-update for the quill binary.
//!
//! Given an optional version constraint, this module locates the best
//! matching release of quill on the package index, compares it to the
//! running version, and performs an in-place upgrade when a newer release
//! exists.
//!
//! # Components
//!
//! Two components run sequentially with no concurrency of their own:
//!
//! - **[`ReleaseSelector`]** filters and orders index candidates and
//!   returns the best applicable release (or one of three "no update"
//!   terminals).
//! - **[`UpdateDispatcher`]** classifies the running installation and
//!   routes to exactly one of two mutually exclusive strategies:
//!   - *direct upgrade* through the environment's own package facility
//!     when quill was installed externally;
//!   - *resolver-driven reinstall* through quill's own installer when the
//!     installation lives under the self-managed data directory.
//!
//! Data flows strictly one way: constraint, candidate list, selected
//! release, environment classification, execution strategy, side effect.
//! There is no feedback loop and no retry of selection once execution
//! begins; every entity is created fresh per invocation and discarded at
//! exit.
//!
//! # Failure semantics
//!
//! Collaborator failures (index query, facility, installer) propagate
//! verbatim as fatal outcomes. No rollback or retry is performed here;
//! re-running the command re-derives the same plan from scratch.

pub mod dispatcher;
pub mod environment;
pub mod facility;
pub mod reinstall;
pub mod selector;


pub use dispatcher::{UpdateDispatcher, UpdatePlan};
pub use environment::RuntimeEnvironment;
pub use facility::{CargoFacility, PackageFacility, PinnedSpec};
pub use reinstall::{EngineInstaller, Installer, LockMode, ResolutionRequest, SyntheticPackage};
pub use selector::{Outcome, ReleaseSelector};
