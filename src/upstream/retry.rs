use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    pub backoff: Duration,
    /// Hard limit for one attempt; the attempt is dropped when it elapses
    pub attempt_timeout: Duration,
}

/// Every attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted {
    pub attempts: u32,
    pub last_error: FetchError,
}

/// Loop state: attempts made so far and the most recent failure
#[derive(Debug)]
struct RetryState {
    attempt: u32,
    last_error: Option<FetchError>,
}

impl RetryState {
    fn new() -> Self {
        Self { attempt: 0, last_error: None }
    }

    fn can_retry(&self, policy: &RetryPolicy) -> bool {
        self.attempt < policy.max_attempts.max(1)
    }

    fn into_exhausted(self, policy: &RetryPolicy) -> RetryExhausted {
        RetryExhausted {
            attempts: self.attempt,
            last_error: self
                .last_error
                .unwrap_or(FetchError::Timeout(policy.attempt_timeout)),
        }
    }
}

/// Runs `op` until it succeeds or the policy runs out of attempts
///
/// `op` receives the 1-based attempt number. Each attempt is bounded by
/// `policy.attempt_timeout`; the backoff sleep only delays this loop.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, RetryExhausted>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut state = RetryState::new();

    while state.can_retry(policy) {
        if state.attempt > 0 {
            tokio::time::sleep(policy.backoff).await;
        }
        state.attempt += 1;
        tracing::debug!("[{}] attempt {}/{}", label, state.attempt, policy.max_attempts);

        let outcome = match tokio::time::timeout(policy.attempt_timeout, op(state.attempt)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(policy.attempt_timeout)),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(FetchError::ServiceUnavailable) => {
                tracing::warn!(
                    "[{}] attempt {} got 503, retrying in {:?}",
                    label, state.attempt, policy.backoff
                );
                state.last_error = Some(FetchError::ServiceUnavailable);
            }
            Err(e) => {
                tracing::warn!("[{}] attempt {} failed: {}", label, state.attempt, e);
                state.last_error = Some(e);
            }
        }
    }

    Err(state.into_exhausted(policy))
}
