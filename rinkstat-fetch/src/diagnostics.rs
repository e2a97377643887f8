//! Per-attempt diagnostics.
//!
//! The fetcher hands every [`AttemptRecord`] to a [`DiagnosticSink`]. Sinks
//! observe; they cannot change what the fetcher does next.

use rinkstat_core::{AttemptRecord, AttemptResult};
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Receives one record per network attempt.
pub trait DiagnosticSink: Send + Sync {
    /// Called after each attempt, before any backoff sleep.
    fn record(&self, record: &AttemptRecord);
}

// ============================================================================
// Tracing Sink
// ============================================================================

/// Emits each attempt as a `tracing` event.
///
/// Successes log at `info`, failures that will be retried at `warn`, and
/// failures that end the fetch at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn record(&self, record: &AttemptRecord) {
        match &record.result {
            AttemptResult::Succeeded { status } => {
                info!(
                    url = %record.url,
                    attempt = record.attempt,
                    outcome = record.outcome_label(),
                    status,
                    elapsed = ?record.elapsed,
                    "Request succeeded"
                );
            }
            AttemptResult::Failed { failure } => match record.backoff {
                Some(backoff) => {
                    warn!(
                        url = %record.url,
                        attempt = record.attempt,
                        outcome = record.outcome_label(),
                        error = %failure,
                        backoff_secs = backoff.as_secs_f64(),
                        elapsed = ?record.elapsed,
                        "Attempt failed, backing off"
                    );
                }
                None => {
                    error!(
                        url = %record.url,
                        attempt = record.attempt,
                        outcome = record.outcome_label(),
                        error = %failure,
                        elapsed = ?record.elapsed,
                        "Attempt failed"
                    );
                }
            },
        }
    }
}

// ============================================================================
// Memory Sink
// ============================================================================

/// Keeps every record in memory.
///
/// Useful for hosts that want an attempt log without parsing trace output.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<AttemptRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every record seen so far.
    pub fn records(&self) -> Vec<AttemptRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    /// Number of records seen so far.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticSink for MemorySink {
    fn record(&self, record: &AttemptRecord) {
        // A poisoned lock only loses diagnostics
        if let Ok(mut records) = self.records.lock() {
            records.push(record.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rinkstat_core::FetchFailure;
    use std::time::Duration;

    #[test]
    fn test_memory_sink_collects_records() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        let now = Utc::now();
        sink.record(&AttemptRecord::failure(
            "https://example.test/a",
            1,
            FetchFailure::RateLimited { status: 429 },
            now,
            Duration::ZERO,
        ));
        sink.record(&AttemptRecord::success(
            "https://example.test/a",
            2,
            200,
            now,
            Duration::ZERO,
        ));

        let records = sink.records();
        assert_eq!(sink.len(), 2);
        assert_eq!(records[0].attempt, 1);
        assert!(records[1].result.is_success());
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        let now = Utc::now();
        let sink = TracingSink;
        sink.record(&AttemptRecord::success("u", 1, 200, now, Duration::ZERO));
        sink.record(
            &AttemptRecord::failure("u", 1, FetchFailure::Timeout, now, Duration::ZERO)
                .with_backoff(Duration::from_secs(1)),
        );
        sink.record(&AttemptRecord::failure(
            "u",
            2,
            FetchFailure::HttpClientError { status: 404 },
            now,
            Duration::ZERO,
        ));
    }
}
