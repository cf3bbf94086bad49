//! Configuration for the self-update command.
//!
//! The update path needs exactly two resolved locations: the self-managed
//! **data directory** (the root under which quill's own installer places
//! installations) and the **bin directory** inside it. Both are computed
//! once per invocation and passed explicitly into the components that need
//! them; nothing here is lazily memoized process-wide, so there is no
//! order-of-initialization ambiguity.
//!
//! # Resolution order
//!
//! 1. `QUILL_HOME` environment variable, tilde-expanded, when set
//! 2. the platform-standard per-user data directory joined with `quill`
//!
//! The platform family is detected once at startup as a small enum and
//! threaded through as data rather than queried ad hoc.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::constants::DATA_DIR_ENV;

/// Platform family, resolved once at startup.
///
/// Only the conventions that differ between families live here: the name
/// of the executable directory inside an installation and the executable
/// file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux and other unix-likes that are not macOS.
    Linux,
    /// macOS.
    MacOs,
    /// Windows.
    Windows,
}

impl Platform {
    /// Detect the platform family of the running binary.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }

    /// Directory name holding executables inside an installation root.
    ///
    /// `Scripts` on Windows, `bin` everywhere else, mirroring the
    /// per-user base layout of the platforms themselves.
    #[must_use]
    pub const fn bin_dir_name(self) -> &'static str {
        match self {
            Self::Windows => "Scripts",
            Self::Linux | Self::MacOs => "bin",
        }
    }

    /// File name of the quill executable on this platform.
    #[must_use]
    pub const fn exe_name(self) -> &'static str {
        match self {
            Self::Windows => "quill.exe",
            Self::Linux | Self::MacOs => "quill",
        }
    }
}

/// Resolved locations consumed by the update dispatcher.
///
/// Built once per command invocation via [`UpdateConfig::resolve`] and
/// passed by reference into the components that need it. The same
/// configuration always classifies the same environment the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
    /// Root of quill's self-managed data directory.
    pub data_dir: PathBuf,
    /// Executable directory inside the self-managed installation.
    pub bin_dir: PathBuf,
    /// Platform family detected at startup.
    pub platform: Platform,
}

impl UpdateConfig {
    /// Resolve the configuration from the process environment.
    ///
    /// Honors the `QUILL_HOME` override before falling back to the
    /// platform-standard per-user data directory.
    ///
    /// # Errors
    ///
    /// Fails only when no override is set and the platform provides no
    /// per-user data directory.
    pub fn resolve(platform: Platform) -> Result<Self> {
        let override_dir = std::env::var(DATA_DIR_ENV).ok();
        Self::resolve_with(platform, override_dir.as_deref())
    }

    /// Resolve with an explicit override value instead of reading the
    /// environment. This is the testable core of [`resolve`](Self::resolve).
    pub fn resolve_with(platform: Platform, override_dir: Option<&str>) -> Result<Self> {
        let data_dir = match override_dir {
            Some(raw) if !raw.trim().is_empty() => {
                PathBuf::from(shellexpand::tilde(raw).into_owned())
            }
            _ => dirs::data_dir()
                .context("Could not determine the per-user data directory")?
                .join("quill"),
        };

        let bin_dir = data_dir.join(platform.bin_dir_name());

        Ok(Self {
            data_dir,
            bin_dir,
            platform,
        })
    }

    /// Path of the quill executable inside the self-managed installation.
    #[must_use]
    pub fn managed_exe(&self) -> PathBuf {
        self.bin_dir.join(self.platform.exe_name())
    }

    /// Reference to the (inert) lock artifact inside the data directory.
    ///
    /// The resolver-driven reinstall never reads or writes it; the path
    /// only identifies which lock the disabled lock mechanism stands in
    /// for.
    #[must_use]
    pub fn lock_artifact(&self) -> PathBuf {
        self.data_dir.join("quill.lock")
    }
}

/// Check whether `path` lies under `root`.
///
/// Both sides are canonicalized when possible so that symlinked
/// installation roots classify the same as their targets. Paths that do
/// not exist are compared lexically.
#[must_use]
pub fn is_under_directory(path: &Path, root: &Path) -> bool {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    path.starts_with(&root)
}
