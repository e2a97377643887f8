//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::error::FetchError;
use crate::transport::{Transport, TransportError, TransportResponse};

/// User agent string for rinkstat.
const USER_AGENT: &str = concat!("rinkstat/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Production transport over `reqwest` with rustls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Creates a transport with default client settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    /// Wraps an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { inner: client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError> {
        debug!("GET request");

        let response = self.inner.get(url).timeout(timeout).send().await?;
        let status = response.status().as_u16();
        debug!(status, "Response received");

        // A body cut off mid-read is as good as no response
        let body = response.bytes().await?;
        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            // Classified as a connection failure and retried
            TransportError::Connection(format!("invalid request: {err}"))
        } else {
            TransportError::Connection(err.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
