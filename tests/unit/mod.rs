//! Unit test suite for quill.
//!
//! Exercises the self-update internals through the public library API with
//! mock collaborators: selection properties over synthetic candidate sets,
//! and strategy routing over synthetic installation paths.
//!
//! # Running Unit Tests
//!
//! ```bash
//! cargo test --test unit
//! ```

mod routing;
mod selection;
