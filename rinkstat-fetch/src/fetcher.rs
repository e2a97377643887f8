//! The request fetcher: pacing gate plus retry loop.
//!
//! [`RequestFetcher::fetch`] turns a URL into a decoded JSON payload or a
//! [`FetchFailure`]. It never returns early with an error and never panics on
//! network trouble: every lower-level failure is classified, retried if it is
//! transient, and reported in the [`FetchOutcome`].

use chrono::Utc;
use rinkstat_core::{AttemptRecord, FetchFailure, Payload};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::FetchError;
use crate::host::http::ReqwestTransport;
use crate::outcome::FetchOutcome;
use crate::pacing::PacingGate;
use crate::retry::BackoffPolicy;
use crate::settings::FetchSettings;
use crate::transport::Transport;

/// A fetcher shared between tasks.
///
/// The mutex keeps one request in flight and keeps the pacing timestamp
/// monotonic across callers.
pub type SharedFetcher = Arc<Mutex<RequestFetcher>>;

// ============================================================================
// Request Fetcher
// ============================================================================

/// Rate-limited, retrying JSON fetcher.
///
/// Each fetcher owns its pacing state. Two fetchers never influence each
/// other; one fetcher serializes its own requests through `&mut self`.
pub struct RequestFetcher {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn DiagnosticSink>,
    settings: FetchSettings,
    pacing: PacingGate,
    backoff: BackoffPolicy,
}

impl RequestFetcher {
    /// Creates a fetcher with the production transport and tracing sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or the HTTP client cannot
    /// be built.
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        Self::builder().settings(settings).build()
    }

    /// Creates a builder for customizing the fetcher.
    pub fn builder() -> RequestFetcherBuilder {
        RequestFetcherBuilder::new()
    }

    /// Returns the settings this fetcher was built with.
    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    /// Returns the configured rate limit in requests per second.
    pub fn rate_limit(&self) -> f64 {
        self.settings.rate_limit
    }

    /// When the last successful request finished, if any has.
    pub fn last_request_time(&self) -> Option<Instant> {
        self.pacing.last_request()
    }

    /// Wraps the fetcher for use from several tasks.
    pub fn into_shared(self) -> SharedFetcher {
        Arc::new(Mutex::new(self))
    }

    /// Fetches `url` using the configured attempt bound.
    pub async fn fetch(&mut self, url: &str) -> FetchOutcome {
        let max_retries = self.settings.max_retries;
        self.fetch_with_retries(url, max_retries).await
    }

    /// Fetches `url` with at most `max_retries` attempts (at least one).
    ///
    /// The pacing gate runs once, before the first attempt. Retries within
    /// the call are spaced only by their backoff delays.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_with_retries(&mut self, url: &str, max_retries: u32) -> FetchOutcome {
        let start = Instant::now();
        let max_retries = max_retries.max(1);
        let mut attempts = Vec::new();

        self.pacing.wait().await;

        let mut attempt_index = 0;
        loop {
            let attempt = attempt_index + 1;
            let started_at = Utc::now();
            let attempt_start = Instant::now();
            debug!(attempt, max_retries, "Making request");

            let result = self.attempt(url).await;
            let elapsed = attempt_start.elapsed();

            let failure = match result {
                Ok((status, payload)) => {
                    self.pacing.mark(Instant::now());
                    self.emit(
                        AttemptRecord::success(url, attempt, status, started_at, elapsed),
                        &mut attempts,
                    );
                    return FetchOutcome {
                        result: Ok(payload),
                        attempts,
                        duration: start.elapsed(),
                    };
                }
                Err(failure) => failure,
            };

            let record = AttemptRecord::failure(url, attempt, failure.clone(), started_at, elapsed);

            if !failure.is_retryable() {
                self.emit(record, &mut attempts);
                return FetchOutcome {
                    result: Err(failure),
                    attempts,
                    duration: start.elapsed(),
                };
            }

            if attempt >= max_retries {
                self.emit(record, &mut attempts);
                return FetchOutcome {
                    result: Err(FetchFailure::exhausted(attempt, failure)),
                    attempts,
                    duration: start.elapsed(),
                };
            }

            let delay = self.backoff.delay_for_attempt(attempt_index);
            self.emit(record.with_backoff(delay), &mut attempts);
            tokio::time::sleep(delay).await;

            attempt_index += 1;
        }
    }

    /// Makes one request and classifies the response.
    async fn attempt(&self, url: &str) -> Result<(u16, Payload), FetchFailure> {
        let response = self.transport.get(url, self.settings.timeout).await?;

        if let Some(failure) = FetchFailure::classify_status(response.status) {
            return Err(failure);
        }

        let payload = serde_json::from_slice(&response.body)
            .map_err(|e| FetchFailure::malformed(e.to_string()))?;

        Ok((response.status, payload))
    }

    fn emit(&self, record: AttemptRecord, attempts: &mut Vec<AttemptRecord>) {
        self.sink.record(&record);
        attempts.push(record);
    }
}

impl std::fmt::Debug for RequestFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestFetcher")
            .field("settings", &self.settings)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Request Fetcher Builder
// ============================================================================

/// Builder for constructing a [`RequestFetcher`].
#[derive(Default)]
pub struct RequestFetcherBuilder {
    transport: Option<Arc<dyn Transport>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    settings: FetchSettings,
}

impl RequestFetcherBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the fetch settings.
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the rate limit.
    pub fn rate_limit(mut self, rate_limit: f64) -> Self {
        self.settings.rate_limit = rate_limit;
        self
    }

    /// Sets the attempt bound.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.settings.max_retries = max_retries;
        self
    }

    /// Sets the transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Sets the diagnostic sink.
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Builds the fetcher.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid or, when no transport was
    /// given, the default HTTP client cannot be built.
    pub fn build(self) -> Result<RequestFetcher, FetchError> {
        self.settings.validate()?;
        let min_interval = self.settings.min_interval()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        Ok(RequestFetcher {
            transport,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            backoff: BackoffPolicy::new().with_max_delay(self.settings.max_backoff),
            pacing: PacingGate::new(min_interval),
            settings: self.settings,
        })
    }
}
