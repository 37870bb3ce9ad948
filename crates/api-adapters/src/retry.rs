//! Retry with exponential backoff for idempotent board reads.

use std::future::Future;
use std::time::Duration;

use domains::error::ApiError;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Retries after the first attempt; 0 disables retrying
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
    /// Adds up to 25% random extra delay
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Never retries.
    pub fn disabled() -> Self {
        Self::default().max_retries(0)
    }

    /// Delay before retry number `attempt` (0-based), capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let base = self.initial_delay.as_millis() as f64;
        let grown = base * self.multiplier.max(1.0).powi(attempt as i32);
        let capped = grown.min(self.max_delay.as_millis() as f64);
        let delay_ms = if self.jitter {
            capped + capped * 0.25 * rand::random::<f64>()
        } else {
            capped
        };
        Duration::from_millis(delay_ms as u64)
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the retry budget is spent. The last error is returned.
pub async fn retry_api<F, Fut, T>(config: &RetryConfig, what: &str, mut operation: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && attempt < config.max_retries => {
                let delay = config.delay_for(attempt);
                attempt += 1;
                debug!(what, attempt, delay_ms = delay.as_millis() as u64, error = %err, "retrying board request");
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
