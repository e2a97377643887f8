//! File persistence helpers.
//!
//! Loading and saving JSON documents, with atomic writes.

use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the default configuration directory.
///
/// - macOS: `~/Library/Application Support/rinkstat`
/// - Linux: `~/.config/rinkstat`
/// - Windows: `%APPDATA%\rinkstat`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("rinkstat"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns the default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.json")
}

// ============================================================================
// File Operations
// ============================================================================

/// Saves data to a JSON file.
///
/// Creates parent directories if they don't exist and writes atomically
/// (via temp file + rename), so readers never see a half-written file.
pub async fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    let json = serde_json::to_string_pretty(data)?;

    // Write atomically (write to temp file, then rename)
    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    tokio::fs::rename(&temp_path, path).await?;

    debug!(path = %path.display(), bytes = json.len(), "JSON file saved");
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");

    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;

    debug!(path = %path.display(), "JSON file loaded");
    Ok(data)
}

/// Loads data from a JSON file, returning default if not found.
pub async fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path).await {
        Ok(data) => data,
        Err(e) => {
            if !matches!(e, StoreError::Io(_)) {
                warn!(path = %path.display(), error = %e, "Failed to load, using defaults");
            }
            T::default()
        }
    }
}

/// Ensures a directory exists.
pub async fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    if !tokio::fs::try_exists(path).await? {
        debug!(path = %path.display(), "Creating directory");
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
