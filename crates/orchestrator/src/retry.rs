//! Bounded exponential-backoff retry for remote calls.

use std::time::Duration;

use tokio::time::sleep;

/// Retry policy: a fixed number of retries with exponential backoff.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_backoff: Duration,
    /// Backoff multiplier per retry.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Total attempts this policy allows (1 initial + retries).
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }
}

/// All attempts allowed by the policy failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetriesExhausted<E> {
    /// Attempts made, counting the initial one.
    pub attempts: u32,
    /// The error of the final attempt.
    pub last: E,
}

/// Runs `operation` until it succeeds or the policy is exhausted.
///
/// The closure receives the 1-based attempt number. Every error is treated
/// as retryable; callers that need to fail fast on certain outcomes should
/// encode them as `Ok` values.
pub async fn retry_with_backoff<F, Fut, T, E>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetriesExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = policy.initial_backoff;
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempt, "operation succeeded after retry");
                }
                return Ok(result);
            }
            Err(error) => {
                if attempt >= policy.max_attempts() {
                    tracing::error!(attempt, error = %error, "operation failed, retries exhausted");
                    return Err(RetriesExhausted {
                        attempts: attempt,
                        last: error,
                    });
                }

                tracing::warn!(
                    attempt,
                    error = %error,
                    delay_ms = delay.as_millis(),
                    "operation failed, retrying after delay"
                );
                sleep(delay).await;
                delay = Duration::from_millis(
                    (delay.as_millis() as f64 * policy.multiplier) as u64,
                );
            }
        }
    }
}
