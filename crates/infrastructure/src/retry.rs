//! Retry with exponential backoff
//!
//! Used by the search adapter so that a transient rate limit or a dropped
//! connection does not turn into an empty research report.
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::retry::{RetryConfig, with_retry};
//!
//! let response = with_retry(&RetryConfig::default(), || client.search(query, 5)).await?;
//! ```

use std::{future::Future, time::Duration};

use application::ApplicationError;
use integration_websearch::WebSearchError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Configuration for retry behavior with exponential backoff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Initial delay before first retry in milliseconds (default: 250ms)
    #[serde(default = "default_initial_delay")]
    pub initial_delay_ms: u64,

    /// Maximum delay between retries in milliseconds (default: 4000ms)
    #[serde(default = "default_max_delay")]
    pub max_delay_ms: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,

    /// Maximum number of retry attempts after the first call (default: 2)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Random jitter as a fraction of the delay (0.0 disables it)
    #[serde(default = "default_jitter_factor")]
    pub jitter_factor: f64,
}

const fn default_initial_delay() -> u64 {
    250
}

const fn default_max_delay() -> u64 {
    4_000
}

const fn default_multiplier() -> f64 {
    2.0
}

const fn default_max_retries() -> u32 {
    2
}

const fn default_jitter_factor() -> f64 {
    0.1
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: default_initial_delay(),
            max_delay_ms: default_max_delay(),
            multiplier: default_multiplier(),
            max_retries: default_max_retries(),
            jitter_factor: default_jitter_factor(),
        }
    }
}

impl RetryConfig {
    /// A policy that never retries
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Disable jitter, making delays deterministic
    #[must_use]
    pub const fn without_jitter(mut self) -> Self {
        self.jitter_factor = 0.0;
        self
    }

    /// Delay before retry number `attempt` (0-indexed)
    ///
    /// `initial_delay * multiplier^attempt`, capped at `max_delay`, then
    /// shifted by up to `jitter_factor` in either direction.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = attempt.min(32) as i32;
        let base = (self.initial_delay_ms as f64) * self.multiplier.powi(exponent);
        let capped = base.min(self.max_delay_ms as f64);

        let delay = if self.jitter_factor > 0.0 {
            let range = capped * self.jitter_factor;
            (capped + rand::rng().random_range(-range..=range)).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(delay as u64)
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.multiplier < 1.0 {
            return Err(format!(
                "multiplier must be at least 1.0, got {}",
                self.multiplier
            ));
        }
        if self.initial_delay_ms > self.max_delay_ms {
            return Err("initial_delay_ms must not exceed max_delay_ms".to_string());
        }
        if !(0.0..=1.0).contains(&self.jitter_factor) {
            return Err("jitter_factor must be between 0.0 and 1.0".to_string());
        }
        Ok(())
    }
}

/// Errors that know whether another attempt may succeed
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for ApplicationError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

impl Retryable for WebSearchError {
    fn is_retryable(&self) -> bool {
        Self::is_retryable(self)
    }
}

/// Run `operation`, retrying retryable failures according to `config`
///
/// Non-retryable errors are returned immediately; after `max_retries`
/// retries the last error is returned.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable + std::fmt::Display,
{
    let mut retries = 0u32;

    loop {
        match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(retries, "Operation succeeded after retries");
                }
                return Ok(value);
            },
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if retries >= config.max_retries => {
                if config.max_retries > 0 {
                    warn!(
                        max_retries = config.max_retries,
                        error = %err,
                        "Operation failed after max retries"
                    );
                }
                return Err(err);
            },
            Err(err) => {
                let delay = config.delay_for_attempt(retries);
                retries += 1;
                warn!(
                    attempt = retries,
                    max_retries = config.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
            },
        }
    }
}
