//! Failure taxonomy for fetch operations.
//!
//! A fetch either yields a [`Payload`](super::Payload) or one of the
//! [`FetchFailure`] variants below. The split between transient and
//! non-transient failures decides whether the fetcher backs off and tries
//! again or gives up on the spot.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Fetch Failure
// ============================================================================

/// Why a fetch did not produce a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchFailure {
    /// The request did not complete within the request timeout.
    #[error("Request timed out")]
    Timeout,

    /// No response was received (connection refused, DNS failure, reset).
    #[error("Connection error: {detail}")]
    ConnectionError {
        /// Transport-level description.
        detail: String,
    },

    /// The server answered with a non-2xx status that is neither 429 nor 5xx.
    #[error("HTTP client error: {status}")]
    HttpClientError {
        /// HTTP status code.
        status: u16,
    },

    /// The server answered with a 5xx status.
    #[error("HTTP server error: {status}")]
    HttpServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The server answered 429 Too Many Requests.
    #[error("Rate limited: {status}")]
    RateLimited {
        /// HTTP status code.
        status: u16,
    },

    /// A 2xx body that could not be decoded as JSON.
    #[error("Malformed response: {detail}")]
    MalformedResponse {
        /// Decoder error message.
        detail: String,
    },

    /// Every attempt failed with a transient failure.
    #[error("Retries exhausted after {attempts} attempts (last: {last})")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// The failure of the final attempt.
        last: Box<FetchFailure>,
    },
}

impl FetchFailure {
    /// Creates a connection error.
    pub fn connection(detail: impl Into<String>) -> Self {
        Self::ConnectionError {
            detail: detail.into(),
        }
    }

    /// Creates a malformed-response failure.
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }

    /// Wraps the last transient failure once the attempt budget is spent.
    pub fn exhausted(attempts: u32, last: FetchFailure) -> Self {
        Self::RetriesExhausted {
            attempts,
            last: Box::new(last),
        }
    }

    /// Classifies a non-2xx HTTP status.
    ///
    /// Returns `None` for 2xx statuses, which are not failures.
    pub fn classify_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            429 => Some(Self::RateLimited { status }),
            500.. => Some(Self::HttpServerError { status }),
            _ => Some(Self::HttpClientError { status }),
        }
    }

    /// Returns true if this failure is eligible for backoff and retry.
    ///
    /// `RetriesExhausted` is terminal and never retryable itself.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::ConnectionError { .. }
                | Self::RateLimited { .. }
                | Self::HttpServerError { .. }
        )
    }

    /// Returns the HTTP status behind this failure, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpClientError { status }
            | Self::HttpServerError { status }
            | Self::RateLimited { status } => Some(*status),
            Self::RetriesExhausted { last, .. } => last.status(),
            Self::Timeout | Self::ConnectionError { .. } | Self::MalformedResponse { .. } => None,
        }
    }

    /// Returns the concrete failure, looking through `RetriesExhausted`.
    pub fn last_cause(&self) -> &FetchFailure {
        match self {
            Self::RetriesExhausted { last, .. } => last.last_cause(),
            other => other,
        }
    }

    /// Short machine-friendly label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::ConnectionError { .. } => "connection_error",
            Self::HttpClientError { .. } => "http_client_error",
            Self::HttpServerError { .. } => "http_server_error",
            Self::RateLimited { .. } => "rate_limited",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::RetriesExhausted { .. } => "retries_exhausted",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
