//! Detection and classification of the running installation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use semver::Version;

use crate::config::is_under_directory;
use crate::core::QuillError;

/// The installation the current process is executing from.
///
/// Carries the installation root and the environment's runtime
/// compatibility triple. Computed once per update invocation and never
/// cached across invocations; classification never changes after it is
/// computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    /// Root directory of the installation (parent of the bin directory).
    pub root: PathBuf,
    /// Runtime compatibility triple of the active environment, copied
    /// into the synthetic root package on the reinstall path.
    pub runtime: Version,
}

impl RuntimeEnvironment {
    /// Build an environment from explicit values. Used by tests and by
    /// callers that already know the installation layout.
    #[must_use]
    pub fn new(root: PathBuf, runtime: Version) -> Self {
        Self { root, runtime }
    }

    /// Detect the environment of the running process.
    ///
    /// The installation root is derived from the executable's location
    /// (`<root>/bin/quill`, `<root>\Scripts\quill.exe` on Windows);
    /// symlinks are resolved so that a linked binary classifies as its
    /// target. The runtime triple is the toolchain floor the binary was
    /// built against.
    ///
    /// # Errors
    ///
    /// Fails when the OS cannot report the executable path or the path
    /// has no grandparent directory.
    pub fn current() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|e| QuillError::EnvironmentDetectionFailed {
            reason: format!("cannot determine the current executable path: {e}"),
        })?;
        let exe = exe.canonicalize().unwrap_or(exe);

        let root = exe
            .parent()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .ok_or_else(|| QuillError::EnvironmentDetectionFailed {
                reason: format!("executable path {} has no installation root", exe.display()),
            })?;

        let runtime = Version::parse(env!("CARGO_PKG_RUST_VERSION"))
            .map_err(|e| QuillError::EnvironmentDetectionFailed {
                reason: format!("invalid runtime version triple: {e}"),
            })?;

        Ok(Self { root, runtime })
    }

    /// Whether this installation lives under quill's self-managed data
    /// directory, implying it was installed by quill's own installer
    /// rather than a third-party package manager.
    #[must_use]
    pub fn is_self_managed(&self, data_dir: &Path) -> bool {
        is_under_directory(&self.root, data_dir)
    }

    /// The runtime triple rendered as `X.Y.Z`.
    #[must_use]
    pub fn runtime_marker(&self) -> String {
        format!(
            "{}.{}.{}",
            self.runtime.major, self.runtime.minor, self.runtime.patch
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_at(root: &str) -> RuntimeEnvironment {
        RuntimeEnvironment::new(PathBuf::from(root), Version::new(1, 85, 0))
    }

    #[test]
    fn classification_under_data_dir() {
        let env = env_at("/home/user/.local/share/quill");
        assert!(env.is_self_managed(Path::new("/home/user/.local/share/quill")));
    }

    #[test]
    fn classification_outside_data_dir() {
        let env = env_at("/home/user/.cargo");
        assert!(!env.is_self_managed(Path::new("/home/user/.local/share/quill")));
    }

    #[test]
    fn runtime_marker_drops_prerelease() {
        let env = RuntimeEnvironment::new(
            PathBuf::from("/x"),
            Version::parse("1.85.0-nightly").unwrap(),
        );
        assert_eq!(env.runtime_marker(), "1.85.0");
    }

    #[test]
    fn current_resolves_some_root() {
        let env = RuntimeEnvironment::current().unwrap();
        assert!(env.root.components().count() > 0);
    }
}
