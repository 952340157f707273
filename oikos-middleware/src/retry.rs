//! Bounded exponential-backoff retry around a single provider fetch.

use std::time::Duration;

use tracing::debug;

use oikos_types::{OikosError, RetryConfig};

/// Executes an attempt function under a bounded retry policy.
///
/// The delay before attempt `n + 1` is `initial_delay * backoff_factor^(n-1)`
/// with no jitter. Classification is delegated to
/// [`OikosError::is_retryable`]: rate-limit pushback and transient transport
/// failures are retried, everything else propagates immediately without
/// consuming further attempts. When the budget is exhausted on a
/// still-rate-limited provider the failure is surfaced as
/// `RateLimitExceeded` so callers can distinguish exhaustion from a single
/// pushback.
pub struct RetryExecutor {
    cfg: RetryConfig,
}

impl RetryExecutor {
    /// Build an executor from a retry policy. `max_attempts` of zero is
    /// treated as one: the first attempt always runs.
    #[must_use]
    pub const fn new(cfg: RetryConfig) -> Self {
        Self { cfg }
    }

    /// The configured policy.
    #[must_use]
    pub const fn config(&self) -> &RetryConfig {
        &self.cfg
    }

    /// Delay inserted before attempt `attempt + 1` after `attempt` failed.
    #[must_use]
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exp = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
        self.cfg.initial_delay.mul_f64(self.cfg.backoff_factor.powi(exp))
    }

    /// Run `attempt_fn` until it succeeds, fails fatally, or the attempt
    /// budget is exhausted.
    ///
    /// # Errors
    /// The last error, with terminal rate limiting mapped to
    /// `RateLimitExceeded`.
    pub async fn run<T, F, Fut>(&self, mut attempt_fn: F) -> Result<T, OikosError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, OikosError>>,
    {
        let max_attempts = self.cfg.max_attempts.max(1);
        let mut attempt = 1u32;
        loop {
            match attempt_fn(attempt).await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt < max_attempts => {
                    let delay = self.backoff_delay(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying after backoff");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(OikosError::RateLimited { provider, .. }) if attempt >= max_attempts => {
                    return Err(OikosError::RateLimitExceeded {
                        provider,
                        attempts: max_attempts,
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oikos_types::ProviderId;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn cfg(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(10),
            backoff_factor: 2.0,
        }
    }

    #[test]
    fn backoff_sequence_is_exponential_without_jitter() {
        let exec = RetryExecutor::new(RetryConfig {
            max_attempts: 4,
            initial_delay: Duration::from_secs(3),
            backoff_factor: 2.0,
        });
        assert_eq!(exec.backoff_delay(1), Duration::from_secs(3));
        assert_eq!(exec.backoff_delay(2), Duration::from_secs(6));
        assert_eq!(exec.backoff_delay(3), Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn retryable_errors_exhaust_the_full_budget() {
        let exec = RetryExecutor::new(cfg(3));
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = exec
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(OikosError::transient(ProviderId::Oecd, Some(503), "down")) }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(OikosError::TransientNetwork { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn fatal_errors_make_exactly_one_attempt() {
        let exec = RetryExecutor::new(cfg(5));
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = exec
            .run(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(OikosError::validation("bad input")) }
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(OikosError::Validation(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_rate_limiting_maps_to_rate_limit_exceeded() {
        let exec = RetryExecutor::new(cfg(2));
        let result: Result<(), _> = exec
            .run(|_| async {
                Err(OikosError::RateLimited {
                    provider: ProviderId::Imf,
                    retry_after_ms: None,
                })
            })
            .await;
        assert!(matches!(
            result,
            Err(OikosError::RateLimitExceeded {
                provider: ProviderId::Imf,
                attempts: 2
            })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_sleeps_sum_to_the_expected_schedule() {
        // Rate limited on attempts 1-3, success on 4: sleeps of 3s, 6s
        // and 12s add up to 21 seconds of paused-clock time.
        let exec = RetryExecutor::new(RetryConfig {
            max_attempts: 4,
            initial_delay: Duration::from_secs(3),
            backoff_factor: 2.0,
        });
        let started = tokio::time::Instant::now();
        let result = exec
            .run(|attempt| async move {
                if attempt < 4 {
                    Err(OikosError::RateLimited {
                        provider: ProviderId::Eurostat,
                        retry_after_ms: None,
                    })
                } else {
                    Ok("data")
                }
            })
            .await;
        assert_eq!(result.unwrap(), "data");
        assert_eq!(started.elapsed(), Duration::from_secs(21));
    }
}
