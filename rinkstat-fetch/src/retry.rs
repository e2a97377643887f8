//! Backoff between retry attempts.

use std::time::Duration;

/// Exponential backoff: `base * 2^attempt_index`, no jitter.
///
/// With the default one-second base the delays after attempts 1, 2, 3 are
/// 1s, 2s, 4s. There is no cap unless one is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay after the first failed attempt.
    pub base: Duration,
    /// Upper bound on a single delay.
    pub max_delay: Option<Duration>,
}

impl BackoffPolicy {
    /// Creates an uncapped policy with a one-second base.
    pub fn new() -> Self {
        Self {
            base: Duration::from_secs(1),
            max_delay: None,
        }
    }

    /// Sets the base delay.
    pub fn with_base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Caps each delay at `max_delay`.
    pub fn with_max_delay(mut self, max_delay: Option<Duration>) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay to sleep after the attempt with the given 0-based index.
    pub fn delay_for_attempt(&self, attempt_index: u32) -> Duration {
        let multiplier = 2_u32.saturating_pow(attempt_index);
        let delay = self.base.saturating_mul(multiplier);

        match self.max_delay {
            Some(max) => delay.min(max),
            None => delay,
        }
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = BackoffPolicy::default();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(8));
    }

    #[test]
    fn test_uncapped_by_default() {
        let policy = BackoffPolicy::default();
        assert_eq!(policy.delay_for_attempt(10), Duration::from_secs(1024));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = BackoffPolicy::new().with_max_delay(Some(Duration::from_secs(5)));

        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(5));
    }

    #[test]
    fn test_large_index_saturates() {
        let policy = BackoffPolicy::default();
        // 2^40 saturates the u32 multiplier instead of panicking
        assert_eq!(policy.delay_for_attempt(40), Duration::from_secs(u64::from(u32::MAX)));
    }

    #[test]
    fn test_custom_base() {
        let policy = BackoffPolicy::new().with_base(Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
    }
}
