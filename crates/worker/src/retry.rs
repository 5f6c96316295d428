//! Fixed-delay retry of an async operation with a per-attempt time limit.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How often and how patiently an operation is attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, the first one included.
    pub max_attempts: u32,
    /// Pause between two attempts.
    pub delay: Duration,
    /// Budget of a single attempt.
    pub time_limit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(10),
            time_limit: Duration::from_secs(120),
        }
    }
}

/// Failure of one attempt, as seen by [`run_with_retry`].
pub trait AttemptFailure: Display {
    /// `true` when retrying cannot help.
    fn is_terminal(&self) -> bool;
    /// The failure recorded when an attempt runs out of time.
    fn timed_out(limit: Duration) -> Self;
}

#[derive(Debug)]
pub enum RetryError<E> {
    /// Stopped at a terminal failure.
    Terminal { attempt: u32, error: E },
    /// Every attempt failed.
    Exhausted { attempts: u32, last: E },
}

/// Runs `operation` until it succeeds, fails terminally, or
/// `policy.max_attempts` attempts have run. Each attempt is bounded by
/// `policy.time_limit`; a timeout counts as a retryable failure.
///
/// The closure receives the 1-based attempt number.
pub async fn run_with_retry<T, E, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, RetryError<E>>
where
    E: AttemptFailure,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let outcome = match tokio::time::timeout(policy.time_limit, operation(attempt)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(E::timed_out(policy.time_limit)),
        };
        match outcome {
            Ok(value) => return Ok(value),
            Err(error) if error.is_terminal() => {
                return Err(RetryError::Terminal { attempt, error });
            }
            Err(error) if attempt >= max_attempts => {
                return Err(RetryError::Exhausted {
                    attempts: attempt,
                    last: error,
                });
            }
            Err(error) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay = ?policy.delay,
                    "attempt failed, retrying: {error}"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Flaky,
        Fatal,
        Slow,
    }

    impl Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    impl AttemptFailure for TestError {
        fn is_terminal(&self) -> bool {
            *self == TestError::Fatal
        }

        fn timed_out(_: Duration) -> Self {
            TestError::Slow
        }
    }

    fn quick() -> RetryPolicy {
        RetryPolicy {
            delay: Duration::from_millis(1),
            ..RetryPolicy::default()
        }
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = run_with_retry(&quick(), |attempt| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt < 3 {
                    Err(TestError::Flaky)
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;
        assert!(matches!(result, Ok(3)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_at_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), RetryError<TestError>> = run_with_retry(&quick(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Flaky) }
        })
        .await;
        assert!(matches!(
            result,
            Err(RetryError::Exhausted {
                attempts: 3,
                last: TestError::Flaky
            })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn terminal_failure_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), RetryError<TestError>> = run_with_retry(&quick(), |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(TestError::Fatal) }
        })
        .await;
        assert!(matches!(
            result,
            Err(RetryError::Terminal {
                attempt: 1,
                error: TestError::Fatal
            })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_attempts_time_out() {
        let policy = RetryPolicy::default();
        let start = tokio::time::Instant::now();
        let result: Result<(), RetryError<TestError>> = run_with_retry(&policy, |_| async {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(())
        })
        .await;
        assert!(matches!(
            result,
            Err(RetryError::Exhausted {
                attempts: 3,
                last: TestError::Slow
            })
        ));
        // Three time limits and two delays.
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3 * 120 + 2 * 10), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(3 * 120 + 2 * 10 + 1), "{elapsed:?}");
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..quick()
        };
        let result: Result<(), RetryError<TestError>> =
            run_with_retry(&policy, |_| async { Err(TestError::Flaky) }).await;
        assert!(matches!(result, Err(RetryError::Exhausted { attempts: 1, .. })));
    }
}
