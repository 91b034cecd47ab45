//! Where stardrift keeps its files on each OS.

use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "stardrift";

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS exposes no configuration home.
    #[error("no OS configuration directory is available")]
    NoConfigDir,

    /// A directory could not be created.
    #[error("could not create {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
}

/// The app's on-disk homes: `config.ron` lives under `config_dir`,
/// debug-build JSON logs under `log_dir`.
///
/// Both sit inside the platform config home (XDG config on Linux, Application
/// Support on macOS, AppData on Windows), resolved through `dirs`.
#[derive(Debug, Clone)]
pub struct PlatformDirs {
    pub config_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the directories under the OS config home and create them.
    pub fn create() -> Result<Self, PlatformError> {
        let base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let dirs = Self::under(&base.join(APP_NAME));
        dirs.ensure_created()?;
        Ok(dirs)
    }

    /// Resolve under an explicit root instead of the OS config home. Tests
    /// use this to stay inside a temp directory.
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.join("config"),
            log_dir: root.join("logs"),
        }
    }

    /// Create every directory that does not exist yet.
    pub fn ensure_created(&self) -> Result<(), PlatformError> {
        for path in [&self.config_dir, &self.log_dir] {
            std::fs::create_dir_all(path).map_err(|e| PlatformError::CreateDir {
                path: path.clone(),
                source: e,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_created_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::under(tmp.path());
        dirs.ensure_created().unwrap();

        assert!(dirs.config_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
        assert!(dirs.config_dir.starts_with(tmp.path()));
    }

    #[test]
    fn test_ensure_created_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::under(tmp.path());
        dirs.ensure_created().unwrap();
        dirs.ensure_created().unwrap();
    }

    #[test]
    fn test_create_error_names_the_path() {
        let tmp = tempfile::tempdir().unwrap();
        // A file where the root directory should go.
        let blocked = tmp.path().join("blocked");
        std::fs::write(&blocked, b"").unwrap();

        let err = PlatformDirs::under(&blocked).ensure_created().unwrap_err();
        assert!(matches!(err, PlatformError::CreateDir { .. }));
        assert!(err.to_string().contains("blocked"));
    }
}
