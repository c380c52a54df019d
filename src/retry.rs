//! Opt-in retry for locale notifications.
//!
//! A notification is attempted once unless `NOTIFY_MAX_ATTEMPTS` asks for
//! more. Retries wait `first_delay`, then twice that, and so on up to `ceiling`.

use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// How often and how patiently to retry a failing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts in total, never below 1
    pub max_attempts: u32,
    /// Wait before the second attempt
    pub first_delay: Duration,
    /// No single wait exceeds this
    pub ceiling: Duration,
}

impl RetryConfig {
    /// Create a config with the default 2s ceiling.
    ///
    /// # Arguments
    /// * `max_attempts` - Attempts in total; 0 is raised to 1
    /// * `first_delay` - Wait before the second attempt
    pub fn new(max_attempts: u32, first_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            first_delay,
            ceiling: Duration::from_secs(2),
        }
    }

    /// Replace the cap on a single wait.
    pub fn with_ceiling(self, ceiling: Duration) -> Self {
        Self { ceiling, ..self }
    }

    /// Fire once.
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Preset for locale notifications.
    ///
    /// # Arguments
    /// * `max_attempts` - Attempts in total, usually `NOTIFY_MAX_ATTEMPTS`
    ///
    /// # Returns
    /// A config waiting 250ms, 500ms, 1s, then 2s between attempts.
    pub fn notification(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::from_millis(250))
    }

    /// Wait before `retry` (1 for the first retry).
    fn backoff(&self, retry: u32) -> Duration {
        let doublings = retry.saturating_sub(1).min(31);
        self.first_delay
            .checked_mul(1 << doublings)
            .unwrap_or(self.ceiling)
            .min(self.ceiling)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::once()
    }
}

/// Run `attempt` until it returns `Ok` or `config.max_attempts` is spent.
///
/// # Arguments
/// * `config` - Attempt count and backoff
/// * `what` - Name of the operation for logging
/// * `attempt` - Closure producing a fresh future per attempt
///
/// # Returns
/// The first `Ok`, or the error of the final attempt.
///
/// # Panics
/// Never. A hand-built config with `max_attempts` of 0 still makes one attempt.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, what: &str, mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retry = 0;
    loop {
        let err = match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        retry += 1;
        if retry >= config.max_attempts {
            return Err(err);
        }

        let wait = config.backoff(retry);
        debug!(
            "{} failed ({}), attempt {} of {} in {:?}",
            what,
            err,
            retry + 1,
            config.max_attempts,
            wait
        );
        tokio::time::sleep(wait).await;
    }
}
