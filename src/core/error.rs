//! Error handling for quill's self-update path.
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** ([`QuillError`]) for precise handling in code
//! 2. **User-friendly reporting** ([`ErrorContext`]) with actionable
//!    suggestions at the binary boundary
//!
//! Library code propagates `anyhow::Result` with context attached via
//! `.context(...)`; `main` converts whatever surfaces into an
//! [`ErrorContext`] through [`user_friendly_error`] before exiting.
//!
//! Collaborator failures (registry, package facility, installer) are
//! surfaced verbatim as fatal outcomes for the invocation. No retries or
//! partial-state cleanup happen at this layer; the command's only
//! responsibility is correct decision-making, not resilience around I/O.

use colored::Colorize;
use thiserror::Error;

/// Typed errors produced by the self-update command and its collaborators.
///
/// Each variant corresponds to a distinct failure surface: user input
/// (constraint parsing), the package registry, environment detection, and
/// the two mutually exclusive execution facilities.
#[derive(Error, Debug)]
pub enum QuillError {
    /// The user-supplied version argument could not be parsed as a
    /// version constraint.
    #[error("Invalid version constraint: {constraint}")]
    InvalidConstraint {
        /// The constraint string as supplied on the command line.
        constraint: String,
        /// Parser diagnostic explaining why it was rejected.
        reason: String,
    },

    /// The registry could not be reached or returned a failure status.
    #[error("Cannot reach package registry at {url}")]
    RegistryUnavailable {
        /// The endpoint that was queried.
        url: String,
    },

    /// The registry answered but the payload was not understood.
    #[error("Invalid registry response for package '{package}': {reason}")]
    RegistryResponseInvalid {
        /// Package whose version listing was requested.
        package: String,
        /// What was wrong with the payload.
        reason: String,
    },

    /// The running installation's root path could not be determined.
    #[error("Failed to locate the current quill installation: {reason}")]
    EnvironmentDetectionFailed {
        /// Why detection failed (usually an OS-level lookup error).
        reason: String,
    },

    /// The external package facility needed for a direct upgrade is not
    /// installed or not on `PATH`.
    #[error("Package facility '{name}' not found in PATH")]
    FacilityNotFound {
        /// Name of the missing executable.
        name: String,
    },

    /// The external package facility ran but reported failure.
    #[error("Package facility command failed: {command}")]
    FacilityFailed {
        /// The command line that was executed.
        command: String,
        /// Exit status description.
        status: String,
    },

    /// The resolver-driven installer ran but reported failure.
    #[error("Installer failed while reinstalling quill: {status}")]
    InstallerFailed {
        /// Exit status description.
        status: String,
    },
}

/// An error paired with user-facing guidance.
///
/// Wraps a [`QuillError`] (or a generic message) with an optional
/// suggestion and detail text, rendered with color at program exit.
pub struct ErrorContext {
    /// Human-readable error message.
    pub message: String,
    /// Actionable next step for the user, if one is known.
    pub suggestion: Option<String>,
    /// Additional background on why the error occurs.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a context from a typed error with no guidance attached.
    pub fn new(error: &QuillError) -> Self {
        Self {
            message: error.to_string(),
            suggestion: None,
            details: None,
        }
    }

    /// Create a context from a plain message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach background details about the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, suggestion, and details to stderr.
    pub fn display(&self) {
        eprintln!("{} {}", "Error:".red().bold(), self.message);

        if let Some(details) = &self.details {
            eprintln!("  {}", details.dimmed());
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!();
            eprintln!("{} {}", "Hint:".yellow().bold(), suggestion);
        }
    }
}

/// Convert any error surfacing at the binary boundary into a user-friendly
/// [`ErrorContext`] with suggestions for the known failure surfaces.
///
/// Unknown errors fall through with their display chain intact so that
/// context attached via `anyhow` is not lost.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(quill_error) = error.downcast_ref::<QuillError>() {
        return match quill_error {
            QuillError::InvalidConstraint { .. } => ErrorContext::new(quill_error)
                .with_suggestion(
                    "Use a semver version or range, e.g. `quill self update 1.9.0` or `quill self update \">=1.8, <2\"`",
                ),
            QuillError::RegistryUnavailable { .. } => ErrorContext::new(quill_error)
                .with_suggestion("Check your network connection and try again")
                .with_details("The registry must be reachable to list available releases"),
            QuillError::RegistryResponseInvalid { .. } => ErrorContext::new(quill_error)
                .with_details("The registry answered with a payload quill could not parse"),
            QuillError::FacilityNotFound { name } => ErrorContext::new(quill_error)
                .with_suggestion(format!(
                    "Install `{name}` or reinstall quill with the official installer so it manages its own updates"
                )),
            QuillError::FacilityFailed { .. } | QuillError::InstallerFailed { .. } => {
                ErrorContext::new(quill_error).with_details(
                    "The installation may be partially upgraded; re-running the command re-derives the same plan",
                )
            }
            QuillError::EnvironmentDetectionFailed { .. } => ErrorContext::new(quill_error),
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::PermissionDenied {
            return ErrorContext::from_message(format!("{error:#}")).with_suggestion(
                "Check permissions on the installation directory or re-run with elevated privileges",
            );
        }
    }

    ErrorContext::from_message(format!("{error:#}"))
}
