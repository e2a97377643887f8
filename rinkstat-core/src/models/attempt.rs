//! Per-attempt diagnostic records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::FetchFailure;
use crate::error::CoreError;

// ============================================================================
// Attempt Result
// ============================================================================

/// What a single network attempt produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AttemptResult {
    /// A 2xx response whose body decoded.
    Succeeded {
        /// HTTP status code.
        status: u16,
    },
    /// The attempt failed.
    Failed {
        /// Failure class of this attempt.
        failure: FetchFailure,
    },
}

impl AttemptResult {
    /// Returns true if the attempt succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Returns the failure, if the attempt failed.
    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            Self::Succeeded { .. } => None,
            Self::Failed { failure } => Some(failure),
        }
    }
}

// ============================================================================
// Attempt Record
// ============================================================================

/// Structured record of one attempt within a fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Target URL.
    pub url: String,
    /// Attempt number, starting at 1.
    pub attempt: u32,
    /// Outcome of the attempt.
    pub result: AttemptResult,
    /// Backoff scheduled before the next attempt, if any.
    pub backoff: Option<Duration>,
    /// How long the attempt took.
    pub elapsed: Duration,
    /// Wall-clock time the attempt started.
    pub started_at: DateTime<Utc>,
}

impl AttemptRecord {
    /// Creates a record for a successful attempt.
    pub fn success(
        url: impl Into<String>,
        attempt: u32,
        status: u16,
        started_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            attempt,
            result: AttemptResult::Succeeded { status },
            backoff: None,
            elapsed,
            started_at,
        }
    }

    /// Creates a record for a failed attempt.
    pub fn failure(
        url: impl Into<String>,
        attempt: u32,
        failure: FetchFailure,
        started_at: DateTime<Utc>,
        elapsed: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            attempt,
            result: AttemptResult::Failed { failure },
            backoff: None,
            elapsed,
            started_at,
        }
    }

    /// Attaches the backoff that follows this attempt.
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = Some(backoff);
        self
    }

    /// Short outcome label for logs ("ok" or the failure label).
    pub fn outcome_label(&self) -> &'static str {
        match &self.result {
            AttemptResult::Succeeded { .. } => "ok",
            AttemptResult::Failed { failure } => failure.label(),
        }
    }

    /// Serializes the record as a single JSON line.
    pub fn to_json_line(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }
}
