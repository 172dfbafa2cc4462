// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Retry logic for LLM API calls with exponential backoff

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::error::{ApiError, AssistantError, Result};

/// Retry policy for provider calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Base delay between attempts (exponentially increased)
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Delay slept after the given failed attempt (1-based): base * 2^(attempt-1).
    /// Growth is bounded only by the attempt ceiling.
    fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(attempt.saturating_sub(1))
    }
}

/// Determine if an error is worth retrying. Only provider rate limiting
/// (HTTP 429) qualifies; every other error is fatal.
pub fn is_retryable(error: &AssistantError) -> bool {
    matches!(error, AssistantError::Api(ApiError::RateLimited(_)))
}

/// Retry a fallible async operation under the given policy.
///
/// The operation succeeds as soon as it returns `Ok`. A failure classified
/// as non-retryable by `retryable` aborts immediately and propagates
/// unchanged; exhausting all attempts returns the last retryable error.
/// The backoff sleep is a plain tokio sleep, so dropping the returned future
/// cancels an in-progress wait.
pub async fn with_retry<F, Fut, T, P>(
    mut operation: F,
    config: &RetryConfig,
    retryable: P,
    operation_name: &str,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&AssistantError) -> bool,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::debug!("{} succeeded after {} attempts", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(error) => {
                if !retryable(&error) {
                    tracing::debug!(
                        "{} failed with non-retryable error: {}",
                        operation_name,
                        error
                    );
                    return Err(error);
                }

                if attempt >= config.max_attempts {
                    tracing::warn!(
                        "{} exhausted all {} attempts",
                        operation_name,
                        config.max_attempts
                    );
                    return Err(error);
                }

                let delay = config.delay_after(attempt);
                tracing::debug!(
                    "{} failed (attempt {}/{}): {}. Retrying in {:.1}s...",
                    operation_name,
                    attempt,
                    config.max_attempts,
                    error,
                    delay.as_secs_f64()
                );

                sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
