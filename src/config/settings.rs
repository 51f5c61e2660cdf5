//! Application settings loading from config.toml
//!
//! Every setting has a default, so the file is optional. A missing file falls
//! back to the defaults; a file that exists but cannot be parsed is an error.

use crate::{
    core::{legacy::DEFAULT_STORAGE_KEY, record::Category},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{io::ErrorKind, path::Path, time::Duration};
use tracing::info;

/// Environment variable naming the settings file.
pub const CONFIG_PATH_VAR: &str = "PRICE_BUDDY_CONFIG";

/// Settings file used when `PRICE_BUDDY_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Legacy source settings
    pub legacy: LegacySettings,
    /// Discord interaction settings
    pub bot: BotSettings,
}

/// Where legacy records are read from
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LegacySettings {
    /// `local_storage` key holding the flat JSON product list
    pub storage_key: String,
}

impl Default for LegacySettings {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Discord interaction settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BotSettings {
    /// Seconds a confirmation prompt waits before counting as declined
    pub confirm_timeout_secs: u64,
    /// Category a new session starts on
    pub default_category: Category,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            confirm_timeout_secs: 60,
            default_category: Category::Toilet,
        }
    }
}

impl BotSettings {
    /// Confirmation timeout as a [`Duration`].
    #[must_use]
    pub const fn confirm_timeout(&self) -> Duration {
        Duration::from_secs(self.confirm_timeout_secs)
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns [`Error::Config`] when the TOML is invalid or a value has the wrong type.
pub fn parse_config(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from a TOML file
///
/// # Returns
/// * `Ok(Settings)` - Parsed settings, or the defaults when the file does not exist
/// * `Err(Error::Io)` - The path exists but could not be read
/// * `Err(Error::Config)` - The file was read but is not valid settings
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("No config file at {}, using defaults", path.display());
            Ok(Settings::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Loads settings from `PRICE_BUDDY_CONFIG`, or ./config.toml when unset
pub fn load_default_config() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [legacy]
            storage_key = "old-products"

            [bot]
            confirm_timeout_secs = 30
            default_category = "tissue"
        "#;

        let settings = parse_config(toml_str).unwrap();
        assert_eq!(settings.legacy.storage_key, "old-products");
        assert_eq!(settings.bot.confirm_timeout(), Duration::from_secs(30));
        assert_eq!(settings.bot.default_category, Category::Tissue);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let settings = parse_config("[bot]\nconfirm_timeout_secs = 5\n").unwrap();
        assert_eq!(settings.bot.confirm_timeout_secs, 5);
        assert_eq!(settings.bot.default_category, Category::Toilet);
        assert_eq!(settings.legacy.storage_key, "toilet-products");

        assert_eq!(parse_config("").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let result = parse_config("[bot]\ndefault_category = \"kitchen\"\n");
        assert!(matches!(result, Err(Error::Config { .. })));

        let result = parse_config("not = [valid");
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = load_config("does/not/exist/config.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_unreadable_path_is_an_io_error() {
        let result = load_config(concat!(env!("CARGO_MANIFEST_DIR"), "/src"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_repository_config() {
        let settings = load_config("config.toml").unwrap();
        assert_eq!(settings.legacy.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(settings.bot.default_category, Category::Toilet);
    }
}
