//! Fetch error types.
//!
//! These are construction-time errors. A running fetch never returns an
//! error; it reports a [`FetchFailure`](rinkstat_core::FetchFailure) inside its
//! outcome instead.

use thiserror::Error;

/// Error type for building a fetcher.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// Core error (invalid settings).
    #[error("Core error: {0}")]
    Core(#[from] rinkstat_core::CoreError),
}
