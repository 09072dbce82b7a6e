// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Bounded retry with a fixed delay between attempts.
///
/// The collector runs once a day, so a constant pause is enough; there is no
/// backoff curve and no jitter.
use std::{fmt::Display, time::Duration};

use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for the fixed-delay retry loop.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct RetryConfig
{
    /// Maximum number of attempts including the first one (default: 3).
    pub max_attempts: u32,
    /// Pause between attempts in milliseconds (default: 5000).
    pub delay_ms:     u64,
}

impl Default for RetryConfig
{
    fn default() -> Self
    {
        Self {
            max_attempts: 3, delay_ms: 5000,
        }
    }
}

impl RetryConfig
{
    /// Delay between attempts as a [`Duration`].
    pub fn delay(&self,) -> Duration
    {
        Duration::from_millis(self.delay_ms,)
    }
}

/// Executes an async operation until it succeeds or the attempts run out.
///
/// Every error is retried. A `max_attempts` of zero is treated as one attempt.
///
/// # Arguments
///
/// * `config` - Retry configuration (max attempts, delay)
/// * `operation_name` - Name of the operation for logging
/// * `f` - Async function to retry
///
/// # Errors
///
/// Returns the last error encountered if all attempts fail.
///
/// # Example
///
/// ```no_run
/// use stargather::{Error, RetryConfig, retry_with_delay};
///
/// # async fn example() -> Result<(), Error> {
/// let config = RetryConfig::default();
/// let value = retry_with_delay(&config, "fetch page", || async { Ok::<_, Error,>(42,) },).await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_delay<F, Fut, T, E,>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Result<T, E,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E,>,>,
    E: Display,
{
    let max_attempts = config.max_attempts.max(1,);
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result,) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result,);
            }
            Err(error,) => {
                if attempt >= max_attempts {
                    warn!("{} failed after {} attempts: {}", operation_name, max_attempts, error);
                    return Err(error,);
                }

                warn!(
                    "{} failed on attempt {}/{}: {}. Retrying in {}ms...",
                    operation_name, attempt, max_attempts, error, config.delay_ms
                );

                sleep(config.delay(),).await;
                attempt += 1;
            }
        }
    }
}
