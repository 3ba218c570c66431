//! Bounded retry with per-attempt timeout and exponential backoff.

use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

use super::FetchError;

/// How a fetch is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Total attempts allowed, the first one included
  pub max_attempts: u32,
  /// Upper bound on each individual attempt
  pub timeout: Duration,
  /// Delay unit: after failed attempt `n` the wait is `2^n * backoff_base`
  pub backoff_base: Duration,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_attempts: 3,
      timeout: Duration::from_secs(10),
      backoff_base: Duration::from_secs(1),
    }
  }
}

impl RetryPolicy {
  /// Wait after failed attempt `attempt` (1-based): 2s, 4s, 8s, ... with the default base.
  pub fn delay_for(&self, attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    self.backoff_base.saturating_mul(factor)
  }

  /// Run `attempt_fn` until it succeeds or the attempt budget is spent.
  ///
  /// Each call receives the 1-based attempt number and is cut off after
  /// `timeout`; a timed-out attempt counts like any other failure. Returns the
  /// value together with the number of attempts used, or the last error.
  pub async fn run<T, F, Fut>(&self, label: &str, mut attempt_fn: F) -> Result<(T, u32), FetchError>
  where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
  {
    let max_attempts = self.max_attempts.max(1);
    let mut attempt = 1;

    loop {
      let outcome = match tokio::time::timeout(self.timeout, attempt_fn(attempt)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(self.timeout)),
      };

      let err = match outcome {
        Ok(value) => return Ok((value, attempt)),
        Err(err) => err,
      };

      if attempt >= max_attempts {
        error!(resource = label, attempt, error = %err, "giving up after final attempt");
        return Err(err);
      }

      let delay = self.delay_for(attempt);
      warn!(
        resource = label,
        attempt,
        delay_ms = delay.as_millis() as u64,
        error = %err,
        "attempt failed, retrying"
      );
      tokio::time::sleep(delay).await;
      attempt += 1;
    }
  }
}
