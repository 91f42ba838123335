//! Fixed-delay retry for transient request failures.
//!
//! Every attempt is separated by the same delay. There is no backoff: the
//! app has always waited a flat second between tries and users see the same
//! timing they are used to.
//!
//! # Example
//!
//! ```rust
//! use booking_gateway_runtime::retry::{RetryPolicy, with_retry};
//! use booking_gateway_core::GatewayError;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), GatewayError> {
//! let policy = RetryPolicy::builder()
//!     .max_attempts(3)
//!     .delay(Duration::from_millis(1000))
//!     .build();
//!
//! let value = with_retry(&policy, || async {
//!     // A request executor call goes here
//!     Ok::<_, GatewayError>(42)
//! }).await?;
//! # assert_eq!(value, 42);
//! # Ok(())
//! # }
//! ```

use booking_gateway_core::GatewayError;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Attempts made when nothing else is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pause between attempts when nothing else is configured.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

/// Retry policy configuration.
///
/// # Default Values
///
/// - `max_attempts`: 3 (including the first try)
/// - `delay`: 1000ms between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Zero behaves like one.
    pub max_attempts: u32,
    /// Fixed pause between two attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Create a new policy builder.
    #[must_use]
    pub const fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder {
            max_attempts: None,
            delay: None,
        }
    }

    /// A policy that tries exactly once.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }

    /// Attempts actually made, never less than one.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        if self.max_attempts == 0 {
            1
        } else {
            self.max_attempts
        }
    }
}

/// Builder for [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct RetryPolicyBuilder {
    max_attempts: Option<u32>,
    delay: Option<Duration>,
}

impl RetryPolicyBuilder {
    /// Set the total number of attempts.
    #[must_use]
    pub const fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Set the pause between attempts.
    #[must_use]
    pub const fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Build the [`RetryPolicy`].
    #[must_use]
    pub fn build(self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            delay: self.delay.unwrap_or(DEFAULT_DELAY),
        }
    }
}

/// Retry a gateway call while its failures are transient.
///
/// `AuthRequired` and `AuthExpired` end the loop after the first attempt:
/// the token is already known to be missing or rejected.
///
/// # Errors
///
/// Returns the first non-transient error, or the last error once every
/// attempt has failed. Errors are returned unchanged.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T, GatewayError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GatewayError>>,
{
    retry_with_predicate(policy, operation, GatewayError::is_transient).await
}

/// Retry an async operation with a caller-supplied retryability check.
///
/// # Arguments
///
/// * `policy` - Attempts and delay
/// * `operation` - Called once per attempt
/// * `is_retryable` - Whether an error is worth another attempt
///
/// # Example
///
/// ```rust
/// use booking_gateway_runtime::retry::{RetryPolicy, retry_with_predicate};
///
/// # async fn example() -> Result<(), String> {
/// let result = retry_with_predicate(
///     &RetryPolicy::no_retry(),
///     || async { Ok::<_, String>(42) },
///     |err: &String| err.contains("transient"),
/// ).await?;
/// # assert_eq!(result, 42);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the first non-retryable error, or the last error once every
/// attempt has failed.
pub async fn retry_with_predicate<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    mut operation: F,
    is_retryable: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(attempt, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !is_retryable(&err) {
                    tracing::debug!(error = %err, "Error is not retryable, failing immediately");
                    return Err(err);
                }

                if attempt >= attempts {
                    tracing::warn!(attempt, error = %err, "Request failed after max attempts");
                    return Err(err);
                }

                tracing::warn!(
                    attempt,
                    delay_ms = policy.delay.as_millis(),
                    error = %err,
                    "Request failed, retrying..."
                );

                sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
