//! Retry logic with exponential backoff
//!
//! Wraps a fallible operation with bounded retries. Backoff is deterministic
//! (no jitter), so the waits are exactly reproducible in tests.

use crate::error::FetchError;
use std::time::Duration;

/// Trait for errors that can be classified as retryable or not
///
/// Transient failures (network blip, rate limit, flaky extraction) should
/// return `true`. Permanent failures (removed content, permission denial)
/// should return `false`.
pub trait Retryable {
    /// Returns true if the error is transient and the operation should be retried
    fn is_transient(&self) -> bool;
}

impl Retryable for FetchError {
    fn is_transient(&self) -> bool {
        match self {
            FetchError::Network(_) | FetchError::Transcode(_) => true,
            // Resolution failures, unavailable items and filesystem errors
            // will not succeed on a second try
            FetchError::Resolution(_) | FetchError::Unavailable(_) | FetchError::Io(_) => false,
        }
    }
}

/// Immutable retry configuration.
///
/// Total attempts per operation = `max_retries + 1`.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt. Zero means exactly one attempt.
    pub max_retries: u32,
    /// Wait before the first retry.
    pub base_delay: Duration,
    /// Each subsequent wait multiplies the previous one by this factor.
    pub multiplier: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2,
        }
    }
}

impl RetryConfig {
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Wait after the given failed attempt (1-based):
    /// `base_delay * multiplier^(attempt - 1)`, saturating at `Duration::MAX`
    /// once the exponent no longer fits.
    pub fn backoff_after(&self, attempt: u32) -> Duration {
        match self.multiplier.checked_pow(attempt.saturating_sub(1)) {
            Some(factor) => self
                .base_delay
                .checked_mul(factor)
                .unwrap_or(Duration::MAX),
            None => Duration::MAX,
        }
    }
}

/// A failed retried operation, annotated with how many attempts were made.
#[derive(Debug)]
pub struct RetryError<E> {
    pub error: E,
    pub attempts: u32,
}

/// Execute `op` up to `max_retries + 1` times.
///
/// The first attempt runs immediately. After a transient failure the call
/// waits through the injected `sleep` before trying again; a permanent
/// failure or exhaustion returns the last error. On success the value is
/// returned together with the attempt count. Holds no state between calls.
pub fn run_with_retry<T, E, F, S>(
    config: &RetryConfig,
    mut sleep: S,
    mut op: F,
) -> Result<(T, u32), RetryError<E>>
where
    E: Retryable + std::fmt::Display,
    F: FnMut() -> Result<T, E>,
    S: FnMut(Duration),
{
    let mut attempt = 1;
    loop {
        match op() {
            Ok(value) => return Ok((value, attempt)),
            Err(error) if error.is_transient() && attempt < config.max_attempts() => {
                let wait = config.backoff_after(attempt);
                log::info!(
                    "Attempt {}/{} failed ({}), retrying in {:?}",
                    attempt,
                    config.max_attempts(),
                    error,
                    wait
                );
                sleep(wait);
                attempt += 1;
            }
            Err(error) => return Err(RetryError { error, attempts: attempt }),
        }
    }
}
