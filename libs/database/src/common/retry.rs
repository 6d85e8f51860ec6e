use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse};

/// Fixed-interval retry policy for database connections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, counting the first one
    pub max_attempts: u32,

    /// Pause between attempts
    pub delay: Duration,
}

impl RetryConfig {
    /// `max_attempts` tries in total, `delay` apart.
    ///
    /// A budget of 0 is treated as a single attempt.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

/// Startup policy while waiting for the database: 10 attempts, 2s apart
impl Default for RetryConfig {
    fn default() -> Self {
        Self::fixed(10, Duration::from_secs(2))
    }
}

/// Load the startup retry policy from environment variables
///
/// Environment variables:
/// - `DB_CONNECT_MAX_ATTEMPTS` (optional, default: 10)
/// - `DB_CONNECT_RETRY_DELAY_MS` (optional, default: 2000)
#[cfg(feature = "config")]
impl FromEnv for RetryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_attempts: u32 = env_parse("DB_CONNECT_MAX_ATTEMPTS", "10")?;
        if max_attempts == 0 {
            return Err(ConfigError::ParseError {
                key: "DB_CONNECT_MAX_ATTEMPTS".to_string(),
                details: "must be at least 1".to_string(),
            });
        }
        let delay_ms: u64 = env_parse("DB_CONNECT_RETRY_DELAY_MS", "2000")?;

        Ok(Self::fixed(max_attempts, Duration::from_millis(delay_ms)))
    }
}

/// Retry an async operation until it succeeds or the attempt budget runs out
///
/// The last error is returned once every attempt has failed.
///
/// # Example
/// ```ignore
/// use database::common::retry::{retry_with_delay, RetryConfig};
///
/// let result = retry_with_delay(
///     || async { database::postgres::connect_from_config(config.clone()).await },
///     RetryConfig::fixed(5, Duration::from_millis(500)),
/// ).await?;
/// ```
pub async fn retry_with_delay<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("Operation succeeded on attempt {}", attempt);
                }
                return Ok(result);
            }
            Err(e) if attempt >= config.max_attempts => {
                warn!("Operation failed after {} attempts: {}", attempt, e);
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "Operation failed (attempt {}/{}): {}. Retrying in {:?}...",
                    attempt, config.max_attempts, e, config.delay
                );
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
        }
    }
}
