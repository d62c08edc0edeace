//! TOML configuration for conversions and the batch driver.
//!
//! Every field defaults, so an empty file is a valid configuration:
//!
//! ```toml
//! base_capital = 10000.0
//! row_policy = "skip"
//!
//! [columns]
//! trade_num = "Trade #"
//! type = "Type"
//!
//! [keywords]
//! entry = ["entry", "进场"]
//!
//! [batch]
//! input_dir = "origin-data"
//! output_dir = "converted-data"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tradelog_core::ConvertOptions;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("base_capital must be a positive number, got {0}")]
    BaseCapital(f64),
}

/// Directories used by `batch` when none are given on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchDirs {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for BatchDirs {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("origin-data"),
            output_dir: PathBuf::from("converted-data"),
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    #[serde(flatten)]
    pub options: ConvertOptions,
    pub batch: BatchDirs,
}

impl ConvertConfig {
    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        let base = config.options.base_capital;
        if !(base.is_finite() && base > 0.0) {
            return Err(ConfigError::BaseCapital(base));
        }
        Ok(config)
    }
}
