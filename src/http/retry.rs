//! Retry policies for market data requests.
//!
//! The client retries nothing unless asked to. A failed fetch is surfaced to
//! the state container, which keeps its prior state; the user re-triggers.

use crate::error::HttpError;
use std::time::Duration;

/// Retry policy applied to every GET the client issues.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt. The default.
    #[default]
    None,
    /// Retry transport failures, 429 and 502/503/504 with exponential backoff.
    Idempotent,
    /// User-provided retry logic.
    Custom(RetryConfig),
}

/// Backoff parameters.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one.
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub backoff_factor: f64,
    /// Spread each delay by up to ±25%.
    pub jitter: bool,
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::idempotent()
    }
}

impl RetryConfig {
    /// Config behind [`RetryPolicy::Idempotent`]. The public API rate-limits
    /// aggressively, so the first retry waits a full second.
    pub fn idempotent() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(15),
            backoff_factor: 2.0,
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    /// Delay before retry number `attempt + 1` (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exp = self.backoff_factor.powi(attempt.min(i32::MAX as u32) as i32);
        let capped = (self.initial_delay.as_millis() as f64 * exp)
            .min(self.max_delay.as_millis() as f64);

        let millis = if self.jitter {
            let spread = capped * 0.25;
            (capped + (rand::random::<f64>() * 2.0 - 1.0) * spread).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(millis as u64)
    }

    /// How long to wait before retrying after `error`, or `None` when the
    /// error is not worth retrying. A server `Retry-After` hint replaces the
    /// backoff but is still capped at `max_delay`.
    pub(crate) fn delay_after(&self, error: &HttpError, attempt: u32) -> Option<Duration> {
        match error {
            HttpError::ServerError { status, .. } if self.retryable_statuses.contains(status) => {
                Some(self.delay_for_attempt(attempt))
            }
            HttpError::RateLimited {
                retry_after_ms: Some(ms),
            } => Some(Duration::from_millis(*ms).min(self.max_delay)),
            HttpError::RateLimited {
                retry_after_ms: None,
            }
            | HttpError::Timeout => Some(self.delay_for_attempt(attempt)),
            HttpError::Reqwest(e) if is_transient(e) => Some(self.delay_for_attempt(attempt)),
            _ => None,
        }
    }
}

fn is_transient(error: &reqwest::Error) -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    let transient = error.is_connect() || error.is_timeout() || error.is_request();
    #[cfg(target_arch = "wasm32")]
    let transient = error.is_timeout() || error.is_request();
    transient
}
