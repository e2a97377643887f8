//! Pacing gate enforcing the minimum interval between successful requests.

use tokio::time::{Duration, Instant};
use tracing::debug;

/// Tracks when the last successful request finished and delays the next one.
///
/// Only successes move the clock. A failed fetch leaves the last timestamp
/// where it was, so a run of failures does not push later requests back.
#[derive(Debug, Clone)]
pub struct PacingGate {
    min_interval: Duration,
    last_request: Option<Instant>,
}

impl PacingGate {
    /// Creates a gate that spaces requests `min_interval` apart.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// The configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// When the last successful request finished, if any.
    pub fn last_request(&self) -> Option<Instant> {
        self.last_request
    }

    /// How long a request starting at `now` has to wait.
    pub fn wait_time(&self, now: Instant) -> Duration {
        match self.last_request {
            Some(last) => self
                .min_interval
                .saturating_sub(now.saturating_duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Sleeps until a request may start. Returns the time slept.
    pub async fn wait(&self) -> Duration {
        let wait = self.wait_time(Instant::now());
        if !wait.is_zero() {
            debug!(wait = ?wait, "Pacing gate delaying request");
            tokio::time::sleep(wait).await;
        }
        wait
    }

    /// Records a successful request finishing at `at`.
    ///
    /// The timestamp never moves backwards.
    pub fn mark(&mut self, at: Instant) {
        self.last_request = Some(match self.last_request {
            Some(last) if last > at => last,
            _ => at,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_before_first_request() {
        let gate = PacingGate::new(Duration::from_secs(1));
        assert_eq!(gate.min_interval(), Duration::from_secs(1));
        assert_eq!(gate.last_request(), None);
        assert_eq!(gate.wait_time(Instant::now()), Duration::ZERO);
        assert_eq!(gate.wait().await, Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_remaining_interval() {
        let mut gate = PacingGate::new(Duration::from_secs(1));
        gate.mark(Instant::now());

        tokio::time::advance(Duration::from_millis(300)).await;
        assert_eq!(gate.wait_time(Instant::now()), Duration::from_millis(700));

        let before = Instant::now();
        let slept = gate.wait().await;
        assert_eq!(slept, Duration::from_millis(700));
        assert!(before.elapsed() >= Duration::from_millis(700));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_wait_after_interval_passed() {
        let mut gate = PacingGate::new(Duration::from_millis(500));
        gate.mark(Instant::now());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(gate.wait_time(Instant::now()), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_mark_is_monotonic() {
        let mut gate = PacingGate::new(Duration::from_secs(1));
        let early = Instant::now();
        tokio::time::advance(Duration::from_secs(5)).await;
        let late = Instant::now();

        gate.mark(late);
        gate.mark(early);
        assert_eq!(gate.last_request(), Some(late));
    }
}
