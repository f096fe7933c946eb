//! Bounded fixed-delay retry.
//!
//! [`RetryPolicy::execute`] runs an operation up to `max_attempts` times,
//! sleeping `fixed_delay` between attempts, but only while the caller's
//! predicate says the failure is worth retrying. When the budget runs out
//! the last observed error is returned as is, so callers can still tell a
//! 404 from a 500 after retries.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Configuration for fixed-delay retry behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one, never less than 1
    pub max_attempts: u32,
    /// Wait between two consecutive attempts
    pub fixed_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::upstream_default()
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, fixed_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            fixed_delay,
        }
    }

    /// Policy used for upstream calls: 3 attempts, 1 second apart
    pub fn upstream_default() -> Self {
        Self::new(3, Duration::from_secs(1))
    }

    /// Single attempt, failures are returned immediately
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the attempt budget is spent.
    pub async fn execute<F, Fut, T, E, P>(&self, mut operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "operation succeeded after {} retries", attempt - 1);
                    }
                    return Ok(value);
                }
                Err(error) if !is_retryable(&error) => {
                    debug!(attempt, %error, "non-retryable failure");
                    return Err(error);
                }
                Err(error) if attempt >= max_attempts => {
                    warn!(attempt, %error, "failed on final attempt, giving up");
                    return Err(error);
                }
                Err(error) => {
                    warn!(
                        attempt,
                        max_attempts,
                        %error,
                        "attempt failed, retrying in {:?}",
                        self.fixed_delay
                    );
                    sleep(self.fixed_delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Same as [`execute`](Self::execute) but abandons the work once `cancel`
    /// fires. Returns `None` when cancelled; the in-flight attempt and any
    /// pending delay are dropped, so no later attempt starts.
    pub async fn execute_with_cancel<F, Fut, T, E, P>(
        &self,
        operation: F,
        is_retryable: P,
        cancel: &CancellationToken,
    ) -> Option<Result<T, E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("retry loop cancelled");
                None
            }
            outcome = self.execute(operation, is_retryable) => Some(outcome),
        }
    }
}
