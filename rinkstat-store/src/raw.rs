//! Raw payload storage.
//!
//! Responses are stored exactly as decoded, one pretty-printed JSON file per
//! endpoint, for analysis downstream.

use rinkstat_core::Payload;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::StoreError;
use crate::persistence::{ensure_dir, load_json, save_json};

/// Default directory for raw payloads, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data/raw";

/// Derives a file stem from an endpoint path or name.
///
/// Separators and anything outside `[A-Za-z0-9._-]` become `_`, and a
/// trailing `.json` is dropped, so `roster/TOR/20232024` becomes
/// `roster_TOR_20232024`. An empty name maps to `index`.
pub fn file_name_for(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_matches('/');
    let trimmed = trimmed.strip_suffix(".json").unwrap_or(trimmed);

    let mut name = String::with_capacity(trimmed.len());
    for c in trimmed.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
            name.push(c);
        } else if !name.ends_with('_') {
            name.push('_');
        }
    }

    let name = name.trim_matches('_');
    if name.is_empty() || name.chars().all(|c| c == '.') {
        "index".to_string()
    } else {
        name.to_string()
    }
}

// ============================================================================
// Raw Store
// ============================================================================

/// Directory of raw JSON payloads.
#[derive(Debug, Clone)]
pub struct RawStore {
    root: PathBuf,
}

impl RawStore {
    /// Creates a store rooted at `root` without touching the filesystem.
    ///
    /// The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Opens the store, creating `root` if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        ensure_dir(&root).await?;
        debug!(root = %root.display(), "Opened raw store");
        Ok(Self { root })
    }

    /// The directory payloads are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a payload named `name` is stored at.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", file_name_for(name)))
    }

    /// Returns true if a payload named `name` is stored.
    pub async fn contains(&self, name: &str) -> bool {
        tokio::fs::try_exists(self.path_for(name))
            .await
            .unwrap_or(false)
    }

    /// Writes `payload` under `name`, replacing any previous file.
    pub async fn save(&self, name: &str, payload: &Payload) -> Result<PathBuf, StoreError> {
        let path = self.path_for(name);
        save_json(&path, payload).await?;
        info!(path = %path.display(), "Saved raw payload");
        Ok(path)
    }

    /// Reads the payload stored under `name`.
    pub async fn load(&self, name: &str) -> Result<Payload, StoreError> {
        let path = self.path_for(name);
        match load_json(&path).await {
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(name.to_string()))
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for_paths() {
        assert_eq!(file_name_for("roster/TOR/20232024"), "roster_TOR_20232024");
        assert_eq!(file_name_for("/standings/now/"), "standings_now");
        assert_eq!(file_name_for("player/8478402/landing"), "player_8478402_landing");
    }

    #[test]
    fn test_file_name_for_odd_input() {
        assert_eq!(file_name_for("schedule?date=2024-01-01"), "schedule_date_2024-01-01");
        assert_eq!(file_name_for("teams.json"), "teams");
        assert_eq!(file_name_for(""), "index");
        assert_eq!(file_name_for("///"), "index");
        assert_eq!(file_name_for(".."), "index");
        assert_eq!(file_name_for("../../etc/passwd"), ".._.._etc_passwd");
    }
}
