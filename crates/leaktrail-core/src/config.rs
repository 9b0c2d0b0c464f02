//! Configuration management for Leaktrail.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use crate::settings::ScanSettings;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/leaktrail/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Scan behavior settings
    pub scan: ScanSettings,
    /// Findings storage settings
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `LEAKTRAIL_PARTIAL_MATCH`: Override partial-match mode (true/false)
    /// - `LEAKTRAIL_CASE_INSENSITIVE`: Override case-insensitive flag (true/false)
    /// - `LEAKTRAIL_DB_PATH`: Override the findings database path
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to an already-loaded config.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("LEAKTRAIL_PARTIAL_MATCH") {
            if let Ok(partial) = val.parse() {
                self.scan.partial_match = partial;
                tracing::debug!("Override scan.partial_match from env: {}", partial);
            }
        }

        if let Ok(val) = std::env::var("LEAKTRAIL_CASE_INSENSITIVE") {
            if let Ok(insensitive) = val.parse() {
                self.scan.case_insensitive = insensitive;
                tracing::debug!("Override scan.case_insensitive from env: {}", insensitive);
            }
        }

        if let Ok(val) = std::env::var("LEAKTRAIL_DB_PATH") {
            if !val.is_empty() {
                tracing::debug!("Override storage.db_path from env: {}", val);
                self.storage.db_path = Some(PathBuf::from(val));
            }
        }
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/leaktrail/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "leaktrail", "leaktrail").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/leaktrail`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("io", "leaktrail", "leaktrail").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the findings database path.
    ///
    /// Uses the configured override if present, otherwise
    /// `<data_dir>/findings.db`.
    pub fn db_path(&self) -> ConfigResult<PathBuf> {
        match &self.storage.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("findings.db")),
        }
    }
}

/// Findings storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override path for the findings database (default: XDG data dir)
    pub db_path: Option<PathBuf>,
}
