//! Transport abstraction used by the fetcher.
//!
//! The fetcher never talks to `reqwest` directly. It goes through
//! [`Transport`], so tests can script responses and hosts can swap the
//! HTTP stack.

use async_trait::async_trait;
use rinkstat_core::FetchFailure;
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Transport Types
// ============================================================================

/// A response that made it back over the wire, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A request that produced no response at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The connection could not be made or was lost.
    #[error("connection failed: {0}")]
    Connection(String),
}

impl From<TransportError> for FetchFailure {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => FetchFailure::Timeout,
            TransportError::Connection(detail) => FetchFailure::connection(detail),
        }
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Issues a single HTTP GET.
///
/// Implementations return `Ok` for every response received, including
/// non-2xx ones; status classification belongs to the fetcher. `Err` is
/// reserved for requests that never got a response.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs a GET request with the given timeout.
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError>;
}
