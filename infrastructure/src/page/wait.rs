//! Polling until a page condition holds.

use mad_application::ChannelError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Attempts at the base interval before backing off
const BASE_INTERVAL_ATTEMPTS: u32 = 10;

/// Options for [`wait_for_condition`]
#[derive(Debug, Clone)]
pub struct WaitOptions {
    pub timeout: Duration,
    pub interval: Duration,
    pub max_attempts: u32,
    /// Upper bound for the backed-off interval
    pub max_interval: Duration,
    pub description: String,
}

impl WaitOptions {
    pub fn new(timeout: Duration, interval: Duration, description: impl Into<String>) -> Self {
        Self {
            timeout,
            interval,
            max_attempts: 60,
            max_interval: Duration::from_secs(2),
            description: description.into(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    fn interval_for(&self, attempt: u32) -> Duration {
        if attempt <= BASE_INTERVAL_ATTEMPTS {
            self.interval
        } else {
            (self.interval * 2).min(self.max_interval)
        }
    }
}

/// Poll `check` until it returns `true`, the timeout elapses, or the attempt
/// budget runs out.
///
/// A check that errors counts as `false`. Sleeps are clamped to the time
/// left, so the call returns at most one check after the deadline.
pub async fn wait_for_condition<F, Fut>(mut check: F, options: WaitOptions) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ChannelError>>,
{
    let deadline = Instant::now() + options.timeout;
    let mut attempt = 0;

    loop {
        match check().await {
            Ok(true) => {
                debug!(
                    "Condition met: {} (attempt {})",
                    options.description,
                    attempt + 1
                );
                return true;
            }
            Ok(false) => {}
            Err(e) => warn!("Check for {} failed: {}", options.description, e),
        }

        attempt += 1;
        if attempt >= options.max_attempts {
            debug!(
                "Gave up waiting for {} after {} attempts",
                options.description, attempt
            );
            return false;
        }

        let now = Instant::now();
        if now >= deadline {
            debug!(
                "Timed out waiting for {} after {:?}",
                options.description, options.timeout
            );
            return false;
        }

        let sleep = options.interval_for(attempt).min(deadline - now);
        tokio::time::sleep(sleep).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_never_true_returns_false_near_timeout() {
        let started = Instant::now();
        let met = wait_for_condition(
            || async { Ok(false) },
            WaitOptions::new(
                Duration::from_millis(500),
                Duration::from_millis(100),
                "nothing",
            ),
        )
        .await;

        assert!(!met);
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_at_first_true() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let met = wait_for_condition(
            move || {
                let counter = counter.clone();
                async move { Ok(counter.fetch_add(1, Ordering::SeqCst) == 2) }
            },
            WaitOptions::new(Duration::from_secs(10), Duration::from_millis(300), "third"),
        )
        .await;

        assert!(met);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_max_attempts_bounds_checks() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let met = wait_for_condition(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok(false) }
            },
            WaitOptions::new(Duration::from_secs(60), Duration::from_millis(10), "capped")
                .with_max_attempts(5),
        )
        .await;

        assert!(!met);
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_errors_count_as_false() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let met = wait_for_condition(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(ChannelError::Timeout)
                    } else {
                        Ok(true)
                    }
                }
            },
            WaitOptions::new(Duration::from_secs(1), Duration::from_millis(50), "flaky"),
        )
        .await;

        assert!(met);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_ten_sleeps_use_base_interval() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let started = Instant::now();
        let met = wait_for_condition(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok(n == 11) }
            },
            WaitOptions::new(Duration::from_secs(60), Duration::from_millis(100), "twelfth"),
        )
        .await;

        assert!(met);
        // ten sleeps of 100ms, then one of 200ms
        assert_eq!(started.elapsed(), Duration::from_millis(1200));
    }

    #[test]
    fn test_backoff_after_ten_attempts() {
        let options = WaitOptions::new(
            Duration::from_secs(30),
            Duration::from_millis(1500),
            "slow",
        );
        assert_eq!(options.interval_for(3), Duration::from_millis(1500));
        assert_eq!(options.interval_for(10), Duration::from_millis(1500));
        assert_eq!(options.interval_for(11), Duration::from_secs(2));

        let fast = WaitOptions::new(Duration::from_secs(30), Duration::from_millis(300), "fast");
        assert_eq!(fast.interval_for(12), Duration::from_millis(600));
    }
}
