//! Bounded retries with jittered exponential backoff.

use std::future::Future;
use std::time::Duration;

use backoff::backoff::Backoff;
use backoff::ExponentialBackoff;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::models::RetryConfig;

use super::error::TaskclusterError;

/// Factor by which each computed delay is randomized.
const RANDOMIZATION_FACTOR: f64 = 0.25;

/// Retry policy for Taskcluster requests.
///
/// Transient failures are retried up to `max_retries` times, with the delay
/// between attempts doubling from `initial_backoff` and capped at
/// `max_backoff`, jittered by [`RANDOMIZATION_FACTOR`]. Permanent failures
/// surface immediately.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
            max_backoff: Duration::from_millis(config.max_backoff_ms),
        }
    }

    fn delays(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_backoff,
            randomization_factor: RANDOMIZATION_FACTOR,
            multiplier: 2.0,
            max_interval: self.max_backoff,
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        }
    }

    /// Execute `operation`, retrying transient errors.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, TaskclusterError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TaskclusterError>>,
    {
        let mut delays = self.delays();
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!("request succeeded after {attempt} retries");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_transient() && attempt < self.max_retries => {
                    let delay = delays.next_backoff().unwrap_or(self.max_backoff);
                    warn!(
                        "attempt {} failed: {err}; retrying in {delay:?}",
                        attempt + 1
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
