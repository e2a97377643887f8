// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # rinkstat Fetch
//!
//! The request fetcher for rinkstat: one component that turns an API URL
//! into a decoded JSON payload or a typed failure.
//!
//! A fetch runs in two stages that share the fetcher's pacing state:
//!
//! - **Pacing gate** - waits until `1 / rate_limit` seconds have passed since
//!   the last successful request ([`pacing::PacingGate`])
//! - **Attempt loop** - up to `max_retries` requests, backing off `2^n`
//!   seconds after transient failures ([`retry::BackoffPolicy`])
//!
//! Timeouts, connection errors, 429 and 5xx responses are retried. Other
//! non-2xx statuses and undecodable 2xx bodies end the fetch at once.
//!
//! ## Seams
//!
//! - [`transport::Transport`] - the HTTP client ([`ReqwestTransport`] in production)
//! - [`diagnostics::DiagnosticSink`] - per-attempt records ([`TracingSink`] by default)
//!
//! ## Example
//!
//! ```ignore
//! use rinkstat_fetch::{FetchSettings, RequestFetcher};
//!
//! let mut fetcher = RequestFetcher::new(FetchSettings::default().with_rate_limit(2.0))?;
//! let outcome = fetcher.fetch("https://api-web.nhle.com/v1/standings/now").await;
//!
//! match outcome.result {
//!     Ok(payload) => println!("{payload}"),
//!     Err(failure) => eprintln!("fetch failed: {failure}"),
//! }
//! ```

// Core modules
pub mod diagnostics;
pub mod error;
pub mod fetcher;
pub mod host;
pub mod outcome;
pub mod pacing;
pub mod retry;
pub mod settings;
pub mod transport;

// Re-export key types at crate root

// Errors
pub use error::FetchError;

// Fetcher
pub use fetcher::{RequestFetcher, RequestFetcherBuilder, SharedFetcher};
pub use outcome::FetchOutcome;
pub use settings::{DEFAULT_MAX_RETRIES, DEFAULT_RATE_LIMIT, DEFAULT_TIMEOUT_SECS, FetchSettings};

// Seams
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use host::http::ReqwestTransport;
pub use transport::{Transport, TransportError, TransportResponse};

// Building blocks
pub use pacing::PacingGate;
pub use retry::BackoffPolicy;
