//! Domain models for `rinkstat`.
//!
//! ## Submodules
//!
//! - [`failure`] - Failure taxonomy ([`FetchFailure`])
//! - [`attempt`] - Per-attempt diagnostics ([`AttemptRecord`], [`AttemptResult`])

mod attempt;
mod failure;

pub use attempt::{AttemptRecord, AttemptResult};
pub use failure::FetchFailure;

/// A decoded JSON document.
///
/// The fetcher never looks inside a payload; endpoint-specific mapping is the
/// caller's business.
pub type Payload = serde_json::Value;
