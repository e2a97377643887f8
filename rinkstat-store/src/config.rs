//! Collector configuration.
//!
//! The config file is optional. A missing file means defaults; present
//! fields override them one by one.

use rinkstat_fetch::{DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT_SECS, FetchSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::default_config_path;
use crate::raw::DEFAULT_DATA_DIR;

/// Base URL of the NHL web API.
pub const DEFAULT_BASE_URL: &str = "https://api-web.nhle.com/v1/";

/// Collector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// API base URL endpoint paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Directory raw payloads are written to.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Maximum requests per second.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: f64,
    /// Maximum attempts per request.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional cap on a single backoff delay, in seconds.
    #[serde(default)]
    pub max_backoff_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_rate_limit() -> f64 {
    DEFAULT_RATE_LIMIT
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            data_dir: default_data_dir(),
            rate_limit: default_rate_limit(),
            max_retries: default_max_retries(),
            timeout_secs: default_timeout_secs(),
            max_backoff_secs: None,
        }
    }
}

impl CollectorConfig {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        default_config_path()
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, StoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: CollectorConfig = serde_json::from_str(&content)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Fetcher settings described by this config.
    pub fn to_fetch_settings(&self) -> FetchSettings {
        let settings = FetchSettings::default()
            .with_rate_limit(self.rate_limit)
            .with_max_retries(self.max_retries)
            .with_timeout(Duration::from_secs(self.timeout_secs));

        match self.max_backoff_secs {
            Some(secs) => settings.with_max_backoff(Duration::from_secs(secs)),
            None => settings,
        }
    }

    /// Checks that the config describes a usable collector.
    pub fn validate(&self) -> Result<(), StoreError> {
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(StoreError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }

        self.to_fetch_settings().validate()?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_fetcher() {
        let config = CollectorConfig::default();
        assert_eq!(config.base_url, "https://api-web.nhle.com/v1/");
        assert_eq!(config.data_dir, PathBuf::from("data/raw"));
        assert_eq!(config.to_fetch_settings(), FetchSettings::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = CollectorConfig::load_from(&temp_dir.path().join("absent.json")).unwrap();
        assert_eq!(config, CollectorConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"rate_limit": 0.5, "max_backoff_secs": 30}"#).unwrap();

        let config = CollectorConfig::load_from(&path).unwrap();
        assert!((config.rate_limit - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.max_retries, 3);

        let settings = config.to_fetch_settings();
        assert_eq!(settings.max_backoff, Some(Duration::from_secs(30)));
        assert_eq!(settings.min_interval().unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = CollectorConfig {
            data_dir: PathBuf::from("/srv/hockey/raw"),
            max_retries: 5,
            ..CollectorConfig::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(CollectorConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = CollectorConfig {
            rate_limit: 0.0,
            ..CollectorConfig::default()
        };
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));

        let config = CollectorConfig {
            base_url: "ftp://example.test/".to_string(),
            ..CollectorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_json_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            CollectorConfig::load_from(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
