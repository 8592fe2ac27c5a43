use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::WriteMode;

/// User-facing application configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub demo: DemoConfig,
}

impl AppConfig {
    /// Returns the config file path within the given data directory.
    pub fn path(data_dir: &Path) -> std::path::PathBuf {
        data_dir.join("config.toml")
    }

    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.demo.batch_size == 0 {
            errors.push("demo.batch_size must be at least 1".to_string());
        }

        if self.demo.window_days == 0 {
            errors.push("demo.window_days must be at least 1".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = DemoConfig::default();
        Self {
            store: self.store.clone(),
            demo: DemoConfig {
                batch_size: if self.demo.batch_size == 0 {
                    defaults.batch_size
                } else {
                    self.demo.batch_size
                },
                window_days: if self.demo.window_days == 0 {
                    defaults.window_days
                } else {
                    self.demo.window_days
                },
            },
        }
    }
}

/// Store settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub write_mode: WriteMode,
}

/// Demo data settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            window_days: default_window_days(),
        }
    }
}

fn default_batch_size() -> usize {
    20
}

fn default_window_days() -> u32 {
    28
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
