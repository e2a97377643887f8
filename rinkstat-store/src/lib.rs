// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # rinkstat Store
//!
//! Persistence for the rinkstat collector.
//!
//! This crate provides:
//!
//! - **RawStore**: raw API payloads written as pretty JSON under a data directory
//! - **CollectorConfig**: the collector's JSON config file
//! - **Persistence**: file I/O helpers for JSON data
//!
//! The request fetcher itself persists nothing; storing what it returns is
//! the collector's job.
//!
//! ## Usage
//!
//! ```ignore
//! use rinkstat_store::{CollectorConfig, RawStore};
//!
//! let config = CollectorConfig::load()?;
//! let store = RawStore::open(&config.data_dir).await?;
//!
//! let path = store.save("standings/now", &payload).await?;
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod raw;

pub use config::CollectorConfig;
pub use error::StoreError;
pub use persistence::{
    default_config_dir, default_config_path, ensure_dir, load_json, load_json_or_default,
    save_json,
};
pub use raw::{DEFAULT_DATA_DIR, RawStore, file_name_for};
