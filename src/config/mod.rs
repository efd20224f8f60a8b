//! Configuration module for sepa-view
//!
//! Manages viewer settings: table height, notification lifetime and key
//! bindings. Configuration is read from the user's config directory
//! (`~/.config/sepa-view/config.toml` on Linux) or from an explicit path.
//! The file is optional and never created by the viewer.

mod keybinds;

pub use keybinds::{KeybindConfig, KeybindDef};

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Viewer configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Number of table rows visible at once
    #[serde(default = "default_table_height")]
    pub table_height: u16,

    /// How long the "Copied" notification stays visible, in milliseconds
    #[serde(default = "default_notification_ms")]
    pub notification_ms: u64,

    /// Key bindings per action
    #[serde(default)]
    pub keybinds: KeybindConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            table_height: default_table_height(),
            notification_ms: default_notification_ms(),
            keybinds: KeybindConfig::default(),
        }
    }
}

const fn default_table_height() -> u16 {
    20
}

const fn default_notification_ms() -> u64 {
    2000
}

impl ViewerConfig {
    /// Get the path to the default config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::Message("Could not determine config directory".to_string())
        })?;

        Ok(config_dir.join("sepa-view").join("config.toml"))
    }

    /// Load configuration from the default location, falling back to
    /// defaults when no file exists
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file exists but cannot be read,
    /// parsed, or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = match Self::config_path() {
            Ok(path) => path,
            Err(e) => {
                tracing::debug!(error = %e, "no config directory, using defaults");
                return Ok(Self::default());
            }
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing, cannot be parsed, or
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "loading configuration");

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the session cannot work with
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.table_height == 0 {
            return Err(ConfigError::Message(
                "table_height must be at least 1".to_string(),
            ));
        }
        if self.notification_ms == 0 {
            return Err(ConfigError::Message(
                "notification_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Notification lifetime as a `Duration`
    #[must_use]
    pub const fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}
