//! Core types and error handling for quill.
//!
//! This module provides the foundation shared by the rest of the crate:
//! the typed error taxonomy, the user-facing error renderer, and their
//! re-exports.

pub mod error;

pub use error::{ErrorContext, QuillError, user_friendly_error};
