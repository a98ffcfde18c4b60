//! Bounded retry for transient CDN failures.

use moonly_cdn_client::CdnClientError;
use moonly_core::RelayConfig;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Additional attempts after the first one
    pub max_retries: u32,
    pub backoff: Duration,
    /// Add random jitter to backoff (±30%)
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff: Duration::from_millis(500),
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }

    pub fn from_config(config: &RelayConfig) -> Self {
        if !config.retry_enabled {
            return Self::disabled();
        }
        Self {
            max_retries: 1,
            backoff: config.retry_backoff,
            jitter: true,
        }
    }
}

/// Run a CDN call, retrying only transient failures (transport errors, 5xx).
///
/// The last error is returned once attempts are exhausted.
pub async fn with_retry<F, Fut, T>(
    config: &RetryConfig,
    operation: &'static str,
    mut f: F,
) -> Result<T, CdnClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CdnClientError>>,
{
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt < config.max_retries => {
                attempt += 1;
                let delay = calculate_backoff(config.backoff, config.jitter);
                warn!(
                    operation = operation,
                    attempt = attempt,
                    max_retries = config.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Transient CDN failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

fn calculate_backoff(base: Duration, jitter: bool) -> Duration {
    if jitter && !base.is_zero() {
        let mut rng = rand::rng();
        let jitter_factor = 1.0 + rng.random_range(-0.3..0.3);
        Duration::from_millis((base.as_millis() as f64 * jitter_factor) as u64)
    } else {
        base
    }
}
