//! # Configuration
//!
//! Application configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TALLY_*`)
//! 2. Defaults (this file)
//!
//! Configuration is read-only after startup, so it is passed around by
//! reference.

use std::path::PathBuf;

use directories::ProjectDirs;
use tally_core::DEFAULT_LOW_STOCK_THRESHOLD;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory used when the operator gives no usable base directory.
    pub default_data_dir: PathBuf,

    /// Products with fewer units than this appear in the low-stock report.
    pub low_stock_threshold: i64,

    /// Shown on the login screen.
    pub store_name: String,
}

impl Default for AppConfig {
    /// ## Default Values
    /// - Data dir: platform data directory, else `./tally-data`
    /// - Low stock threshold: 20
    /// - Store name: "Tally"
    fn default() -> Self {
        AppConfig {
            default_data_dir: platform_data_dir(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            store_name: "Tally".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// ## Environment Variables
    /// - `TALLY_DATA_DIR`: fallback base directory
    /// - `TALLY_LOW_STOCK_THRESHOLD`: non-negative integer
    /// - `TALLY_STORE_NAME`: login screen heading
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(dir) = lookup("TALLY_DATA_DIR").filter(|v| !v.trim().is_empty()) {
            config.default_data_dir = PathBuf::from(dir.trim());
        }

        if let Some(raw) = lookup("TALLY_LOW_STOCK_THRESHOLD") {
            config.low_stock_threshold = raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or_else(|| ConfigError::InvalidValue {
                    key: "TALLY_LOW_STOCK_THRESHOLD".to_string(),
                    value: raw.clone(),
                })?;
        }

        if let Some(name) = lookup("TALLY_STORE_NAME").filter(|v| !v.trim().is_empty()) {
            config.store_name = name.trim().to_string();
        }

        Ok(config)
    }
}

fn platform_data_dir() -> PathBuf {
    ProjectDirs::from("com", "tally", "tally")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("tally-data"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}
