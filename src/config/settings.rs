//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use serde::Deserialize;

use crate::error::ConfigError;

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Synthetic dataset settings.
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dataset.rows == 0 {
            return Err(ConfigError::ValidationError {
                message: "dataset.rows must be at least 1".to_string(),
            });
        }
        if self.dataset.rows > 100_000 {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "dataset.rows is {} but must not exceed 100000",
                    self.dataset.rows
                ),
            });
        }
        Ok(())
    }
}

/// Settings for the synthetic analytics dataset served by the
/// `data_analysis_*` tools.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetConfig {
    /// Number of daily observations to generate. Default: 365.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// RNG seed. The same seed always produces the same dataset. Default: 42.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// First date of the generated series (ISO 8601). Default: "2023-01-01".
    #[serde(default = "default_start_date")]
    pub start_date: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            seed: default_seed(),
            start_date: default_start_date(),
        }
    }
}

const fn default_rows() -> usize {
    365
}

const fn default_seed() -> u64 {
    42
}

fn default_start_date() -> String {
    "2023-01-01".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
