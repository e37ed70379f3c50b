//! core::config::schema
//!
//! On-disk configuration schema.
//!
//! # Format
//!
//! ```toml
//! [GERRIT_CONFIG]
//! user = "jdoe"
//! repo = "platform/tools"
//! ```
//!
//! An empty file is valid and means nothing is configured. Unknown keys and
//! sections are ignored on load and dropped on the next write.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::types::ConfigField;

/// The whole config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The single section holding the defaults.
    #[serde(rename = "GERRIT_CONFIG")]
    pub defaults: Defaults,
}

/// Default identity and repository values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Defaults {
    /// Default Gerrit user name
    pub user: Option<String>,

    /// Default repository path on the Gerrit host
    pub repo: Option<String>,
}

impl Config {
    /// Get a field value.
    pub fn get(&self, field: ConfigField) -> Option<&str> {
        match field {
            ConfigField::User => self.defaults.user.as_deref(),
            ConfigField::Repo => self.defaults.repo.as_deref(),
        }
    }

    /// Set a field value in memory.
    pub fn set(&mut self, field: ConfigField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            ConfigField::User => self.defaults.user = value,
            ConfigField::Repo => self.defaults.repo = value,
        }
    }

    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a value would break the
    /// commands built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for field in [ConfigField::User, ConfigField::Repo] {
            if let Some(value) = self.get(field) {
                if value.contains(['\n', '\r']) {
                    return Err(ConfigError::InvalidValue(format!(
                        "{} cannot contain line breaks",
                        field
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.get(ConfigField::User).is_none());
    }

    #[test]
    fn parses_section() {
        let config: Config = toml::from_str(
            r#"
            [GERRIT_CONFIG]
            user = "jdoe"
            repo = "tools"
            "#,
        )
        .unwrap();
        assert_eq!(config.get(ConfigField::User), Some("jdoe"));
        assert_eq!(config.get(ConfigField::Repo), Some("tools"));
    }

    #[test]
    fn unknown_keys_ignored() {
        let config: Config = toml::from_str(
            r#"
            [GERRIT_CONFIG]
            user = "jdoe"
            host = "example.com"

            [OTHER]
            key = 1
            "#,
        )
        .unwrap();
        assert_eq!(config.get(ConfigField::User), Some("jdoe"));
        assert!(config.get(ConfigField::Repo).is_none());

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(!text.contains("host"));
        assert!(!text.contains("OTHER"));
    }

    #[test]
    fn serializes_only_set_fields() {
        let mut config = Config::default();
        config.set(ConfigField::Repo, "tools");
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[GERRIT_CONFIG]"));
        assert!(text.contains("repo = \"tools\""));
        assert!(!text.contains("user"));
    }

    #[test]
    fn line_breaks_rejected() {
        let mut config = Config::default();
        config.set(ConfigField::User, "a\nb");
        assert!(config.validate().is_err());
    }
}
