//! Fetcher settings.
//!
//! Everything the fetcher needs is fixed at construction. Nothing here reads
//! the environment or the filesystem; callers that want a config file build
//! a [`FetchSettings`] from it.

use rinkstat_core::CoreError;
use std::time::Duration;

/// Default rate limit in requests per second.
pub const DEFAULT_RATE_LIMIT: f64 = 1.0;

/// Default number of attempts per fetch.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for a [`RequestFetcher`](crate::RequestFetcher).
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    /// Maximum requests per second. Must be positive and finite.
    pub rate_limit: f64,
    /// Maximum attempts per fetch (at least 1).
    pub max_retries: u32,
    /// Timeout applied to each request.
    pub timeout: Duration,
    /// Optional upper bound on a single backoff delay. `None` means uncapped.
    pub max_backoff: Option<Duration>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            rate_limit: DEFAULT_RATE_LIMIT,
            max_retries: DEFAULT_MAX_RETRIES,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_backoff: None,
        }
    }
}

impl FetchSettings {
    /// Sets the rate limit.
    pub fn with_rate_limit(mut self, rate_limit: f64) -> Self {
        self.rate_limit = rate_limit;
        self
    }

    /// Sets the attempt bound.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Caps each backoff delay.
    pub fn with_max_backoff(mut self, max_backoff: Duration) -> Self {
        self.max_backoff = Some(max_backoff);
        self
    }

    /// Minimum spacing between successful requests, `1 / rate_limit`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] if the rate limit is not a positive
    /// finite number or its interval does not fit in a [`Duration`].
    pub fn min_interval(&self) -> Result<Duration, CoreError> {
        if !self.rate_limit.is_finite() || self.rate_limit <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "rate_limit must be a positive number, got {}",
                self.rate_limit
            )));
        }

        Duration::try_from_secs_f64(1.0 / self.rate_limit).map_err(|e| {
            CoreError::InvalidConfig(format!(
                "rate_limit {} gives an unusable interval: {e}",
                self.rate_limit
            ))
        })
    }

    /// Checks that the settings are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidConfig`] describing the first bad field.
    pub fn validate(&self) -> Result<(), CoreError> {
        self.min_interval()?;

        if self.max_retries == 0 {
            return Err(CoreError::InvalidConfig(
                "max_retries must be at least 1".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FetchSettings::default();
        assert!((settings.rate_limit - 1.0).abs() < f64::EPSILON);
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert_eq!(settings.max_backoff, None);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_min_interval() {
        let settings = FetchSettings::default().with_rate_limit(4.0);
        assert_eq!(settings.min_interval().unwrap(), Duration::from_millis(250));

        let settings = FetchSettings::default().with_rate_limit(0.5);
        assert_eq!(settings.min_interval().unwrap(), Duration::from_secs(2));
    }

    #[test]
    fn test_rejects_bad_rate_limit() {
        for rate in [0.0, -1.0, f64::NAN, f64::INFINITY, 1e-320] {
            let settings = FetchSettings::default().with_rate_limit(rate);
            assert!(settings.validate().is_err(), "rate {rate} should be rejected");
        }
    }

    #[test]
    fn test_rejects_zero_retries_and_timeout() {
        assert!(FetchSettings::default().with_max_retries(0).validate().is_err());
        assert!(
            FetchSettings::default()
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
