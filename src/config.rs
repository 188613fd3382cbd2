//! Configuration for the wikiseek front-end.
//!
//! Everything has a default, so a config file is optional. The file is TOML:
//!
//! ```toml
//! [api]
//! endpoint = "https://en.wikipedia.org/w/api.php"
//! excluded_category_terms = ["sex"]
//! category_failure_policy = "propagate"
//!
//! [view]
//! stale_policy = "discard_stale"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::view::StalePolicy;
use wikiseek_api::ApiConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Wikipedia client, filter and article settings.
    pub api: ApiConfig,
    /// View state settings.
    pub view: ViewConfig,
}

/// View state settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// How completions of superseded requests are treated.
    pub stale_policy: StalePolicy,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load from `explicit` if given, otherwise from the default path if it
    /// exists, otherwise defaults.
    ///
    /// # Errors
    ///
    /// An explicit path that cannot be loaded is an error; a missing default
    /// file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let path = Self::default_config_path();
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading config");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/wikiseek/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::env::temp_dir().join("wikiseek-config"))
            .join("wikiseek")
            .join("config.toml")
    }
}
