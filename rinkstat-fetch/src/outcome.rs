//! Fetch outcome returned by the request fetcher.

use rinkstat_core::{AttemptRecord, FetchFailure, Payload};
use std::time::Duration;

/// The outcome of one `fetch` call.
///
/// `result` is the terminal value: the decoded payload, or the failure that
/// ended the call. `attempts` holds one record per transport call, so
/// `attempts_count()` is the number of requests actually made.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Payload on success, failure otherwise.
    pub result: Result<Payload, FetchFailure>,
    /// Every attempt made, in order.
    pub attempts: Vec<AttemptRecord>,
    /// Total time spent, pacing wait and backoff included.
    pub duration: Duration,
}

impl FetchOutcome {
    /// Returns true if the fetch produced a payload.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Returns the payload, if any.
    pub fn payload(&self) -> Option<&Payload> {
        self.result.as_ref().ok()
    }

    /// Returns the failure, if any.
    pub fn failure(&self) -> Option<&FetchFailure> {
        self.result.as_ref().err()
    }

    /// Returns the number of attempts (transport calls) made.
    pub fn attempts_count(&self) -> usize {
        self.attempts.len()
    }

    /// Consumes the outcome, keeping only the result.
    pub fn into_result(self) -> Result<Payload, FetchFailure> {
        self.result
    }
}
