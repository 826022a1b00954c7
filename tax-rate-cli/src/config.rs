//! Application configuration loaded from an optional TOML file.
//!
//! Every key is optional; anything missing falls back to [`AppConfig::default`].
//!
//! ```toml
//! seed_defaults = true
//! currency_symbol = "$"
//!
//! [auto_selection]
//! enabled = false
//!
//! [auto_selection.criteria]
//! region = ""
//! category = "sales"
//! fallback_rate = "0.05"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tax_rate_core::AutoSelectionSettings;
use thiserror::Error;

/// Errors that can occur while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Start with the built-in California/New York/Texas rates.
    pub seed_defaults: bool,
    /// Prefix used when printing amounts.
    pub currency_symbol: String,
    /// Initial auto-selection settings handed to the store.
    pub auto_selection: AutoSelectionSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
            currency_symbol: "$".to_string(),
            auto_selection: AutoSelectionSettings::default(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load the file at `path`, or return defaults when no path is given.
    ///
    /// # Errors
    /// * [`ConfigError::Read`] – the file does not exist or is unreadable.
    /// * [`ConfigError::Parse`] – the contents are not valid configuration.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}
