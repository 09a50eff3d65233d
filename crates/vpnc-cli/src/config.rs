//! Client configuration: defaults, optional TOML file, CLI/env overrides.

use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_EVENTS_PATH: &str = "events.json";
pub const DEFAULT_CONFIG_PATH: &str = "vpn-client.toml";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {message}")]
    Io { path: String, message: String },

    #[error("failed to parse config {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Event log location. Relative paths in a config file resolve against
    /// the file's directory.
    pub events_path: PathBuf,
    /// strftime pattern for human-readable history timestamps (UTC).
    pub timestamp_format: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            events_path: PathBuf::from(DEFAULT_EVENTS_PATH),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&text, &path.display().to_string())?;
        if config.events_path.is_relative()
            && let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            config.events_path = parent.join(&config.events_path);
        }
        Ok(config)
    }

    /// Defaults, then the config file, then the explicit events override.
    ///
    /// An explicit `config_path` must exist; the implicit
    /// `./vpn-client.toml` is only read when present.
    pub fn resolve(
        config_path: Option<&str>,
        events_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::load(Path::new(path))?,
            None => {
                let implicit = Path::new(DEFAULT_CONFIG_PATH);
                if implicit.is_file() {
                    Self::load(implicit)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(events) = events_override {
            let trimmed = events.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid("events path must be non-empty".to_string()));
            }
            config.events_path = PathBuf::from(trimmed);
        }
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.events_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "events_path must be non-empty".to_string(),
            ));
        }
        if self.timestamp_format.is_empty()
            || StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error))
        {
            return Err(ConfigError::Invalid(format!(
                "timestamp_format is not a valid strftime pattern: `{}`",
                self.timestamp_format
            )));
        }
        Ok(())
    }
}
