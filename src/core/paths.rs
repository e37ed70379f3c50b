//! core::paths
//!
//! Centralized path routing for the configuration store.
//!
//! # Storage Layout
//!
//! All persisted state lives in one directory:
//! - `config.toml` - Default user and repository
//! - short-lived scratch files created by each atomic write
//!
//! # Location
//!
//! Resolved once per process, in order:
//! 1. `$GERRIT_CONFIG_DIR` if set
//! 2. `<config dir>/gerrit` (e.g. `~/.config/gerrit` on Linux)
//! 3. `<temp dir>/gerrit` when the platform has no config dir
//!
//! # Example
//!
//! ```
//! use gerrit_cli::core::paths::ConfigPaths;
//! use std::path::PathBuf;
//!
//! let paths = ConfigPaths::new(PathBuf::from("/tmp/gerrit"));
//! assert_eq!(paths.config_file(), PathBuf::from("/tmp/gerrit/config.toml"));
//! ```

use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "GERRIT_CONFIG_DIR";

/// Subdirectory created under the platform config (or temp) dir.
pub const CONFIG_SUBDIR: &str = "gerrit";

/// Name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Location of the configuration store.
///
/// No code outside this module should join config file names onto a
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// Use `dir` as the config directory.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolve the process-wide default location.
    pub fn resolve() -> Self {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Self::new(PathBuf::from(dir));
        }

        let base = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join(CONFIG_SUBDIR))
    }

    /// The directory holding the config file.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path to the config file.
    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_live_in_dir() {
        let paths = ConfigPaths::new(PathBuf::from("/var/gerrit"));
        assert_eq!(paths.dir(), Path::new("/var/gerrit"));
        assert_eq!(paths.config_file(), PathBuf::from("/var/gerrit/config.toml"));
    }

    #[test]
    fn config_file_is_in_dir() {
        let paths = ConfigPaths::new(PathBuf::from("/x"));
        assert_eq!(paths.config_file().parent(), Some(paths.dir()));
    }
}
