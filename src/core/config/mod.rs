//! core::config
//!
//! The persistent configuration store.
//!
//! # Overview
//!
//! The store holds the default `user` and `repo` used when `init` is run
//! with fewer than two arguments. It is the only durable state the tool
//! keeps.
//!
//! # Lifecycle
//!
//! - [`ConfigStore::load`] runs once at process start. A missing directory
//!   or file is created empty; anything that cannot be created or parsed is
//!   fatal.
//! - [`ConfigStore::set_and_persist`] mutates one field and rewrites the
//!   whole file through a private scratch file and rename, so readers never
//!   see a partial write.
//!
//! There is no lock. Two processes writing at once both succeed and the
//! last rename wins.
//!
//! # Example
//!
//! ```no_run
//! use gerrit_cli::core::config::ConfigStore;
//! use gerrit_cli::core::paths::ConfigPaths;
//! use gerrit_cli::core::types::ConfigField;
//!
//! let mut store = ConfigStore::load(ConfigPaths::resolve()).unwrap();
//! store.set_and_persist(ConfigField::User, "jdoe").unwrap();
//! assert_eq!(store.get(ConfigField::User), Some("jdoe"));
//! ```

pub mod schema;

pub use schema::{Config, Defaults};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::paths::ConfigPaths;
use super::types::ConfigField;

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Read access to configured defaults.
///
/// The argument resolver only needs lookups, so it depends on this trait
/// rather than on the store itself.
pub trait ConfigLookup {
    /// Get the configured value for `field`, if any.
    fn lookup(&self, field: ConfigField) -> Option<&str>;
}

impl ConfigLookup for Config {
    fn lookup(&self, field: ConfigField) -> Option<&str> {
        self.get(field)
    }
}

/// The loaded configuration together with where it lives.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    paths: ConfigPaths,
    config: Config,
}

impl ConfigStore {
    /// Load the store, creating an empty one first if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or read,
    /// or if the file exists but cannot be parsed.
    pub fn load(paths: ConfigPaths) -> Result<Self, ConfigError> {
        let path = paths.config_file();

        if !path.exists() {
            fs::create_dir_all(paths.dir()).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
            fs::File::create(&path).map_err(|e| ConfigError::WriteError {
                path: path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %path.display(), "created empty config file");
        }

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        // toml renders a multi-line snippet; keep diagnostics on one line
        let config: Config = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.clone(),
            message: e.message().trim().to_string(),
        })?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(Self { paths, config })
    }

    /// Get a configured value.
    pub fn get(&self, field: ConfigField) -> Option<&str> {
        self.config.get(field)
    }

    /// Path to the backing file.
    pub fn path(&self) -> PathBuf {
        self.paths.config_file()
    }

    /// Set one field and write the whole store back atomically.
    ///
    /// The in-memory value is only updated once the write succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is invalid or the file cannot be
    /// written.
    pub fn set_and_persist(
        &mut self,
        field: ConfigField,
        value: impl Into<String>,
    ) -> Result<PathBuf, ConfigError> {
        let mut updated = self.config.clone();
        updated.set(field, value);
        updated.validate()?;

        let path = self.paths.config_file();
        write_atomic(self.paths.dir(), &path, &updated)?;
        self.config = updated;

        tracing::debug!(%field, path = %path.display(), "persisted config field");
        Ok(path)
    }
}

impl ConfigLookup for ConfigStore {
    fn lookup(&self, field: ConfigField) -> Option<&str> {
        self.get(field)
    }
}

/// Replace the config file with `config`.
///
/// Each writer gets its own uniquely named scratch file next to the target,
/// so concurrent writers never share one. The rename publishes a complete
/// file; whichever rename lands last wins.
fn write_atomic(dir: &Path, path: &Path, config: &Config) -> Result<(), ConfigError> {
    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
    let write_error = |source: std::io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(dir).map_err(write_error)?;

    let mut scratch = NamedTempFile::new_in(dir).map_err(write_error)?;
    scratch
        .write_all(contents.as_bytes())
        .map_err(write_error)?;
    scratch.as_file().sync_all().map_err(write_error)?;
    scratch.persist(path).map_err(|e| write_error(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ConfigStore {
        ConfigStore::load(ConfigPaths::new(temp.path().join("gerrit"))).unwrap()
    }

    #[test]
    fn load_creates_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        assert!(store.path().exists());
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "");
        assert!(store.get(ConfigField::User).is_none());
        assert!(store.get(ConfigField::Repo).is_none());
    }

    #[test]
    fn load_reads_existing_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gerrit");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "[GERRIT_CONFIG]\nuser = \"jdoe\"\nrepo = \"tools\"\n",
        )
        .unwrap();

        let store = store_in(&temp);
        assert_eq!(store.get(ConfigField::User), Some("jdoe"));
        assert_eq!(store.lookup(ConfigField::Repo), Some("tools"));
    }

    #[test]
    fn malformed_file_is_fatal() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("gerrit");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "user = = broken").unwrap();

        let err = ConfigStore::load(ConfigPaths::new(dir)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn uncreatable_dir_is_fatal() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, "not a dir").unwrap();

        let err = ConfigStore::load(ConfigPaths::new(blocker.join("gerrit"))).unwrap_err();
        assert!(matches!(err, ConfigError::WriteError { .. }));
    }

    #[test]
    fn set_and_persist_round_trips() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.set_and_persist(ConfigField::User, "jdoe").unwrap();
        store.set_and_persist(ConfigField::Repo, "tools").unwrap();

        let reloaded = store_in(&temp);
        assert_eq!(reloaded.get(ConfigField::User), Some("jdoe"));
        assert_eq!(reloaded.get(ConfigField::Repo), Some("tools"));
    }

    #[test]
    fn set_overwrites_only_one_field() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.set_and_persist(ConfigField::User, "first").unwrap();
        store.set_and_persist(ConfigField::Repo, "tools").unwrap();
        store.set_and_persist(ConfigField::User, "second").unwrap();

        let reloaded = store_in(&temp);
        assert_eq!(reloaded.get(ConfigField::User), Some("second"));
        assert_eq!(reloaded.get(ConfigField::Repo), Some("tools"));
    }

    #[test]
    fn persist_leaves_only_config_file() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.set_and_persist(ConfigField::User, "jdoe").unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path().join("gerrit"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["config.toml"]);
    }

    #[test]
    fn concurrent_writers_both_succeed() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::new(temp.path().join("gerrit"));
        ConfigStore::load(paths.clone()).unwrap();

        for round in 0..50 {
            let barrier = Arc::new(Barrier::new(2));
            let values = [format!("alice{}", round), format!("bob{}", round)];

            let handles: Vec<_> = values
                .iter()
                .cloned()
                .map(|value| {
                    let mut store = ConfigStore::load(paths.clone()).unwrap();
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        store.set_and_persist(ConfigField::User, value)
                    })
                })
                .collect();

            for handle in handles {
                assert!(handle.join().unwrap().is_ok());
            }

            let reloaded = ConfigStore::load(paths.clone()).unwrap();
            let user = reloaded.get(ConfigField::User).unwrap();
            assert!(values.iter().any(|v| v == user), "unexpected user {}", user);
        }
    }

    #[test]
    fn invalid_value_not_applied() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        assert!(store.set_and_persist(ConfigField::User, "a\nb").is_err());
        assert!(store.get(ConfigField::User).is_none());
    }
}
