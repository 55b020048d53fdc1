//! Retry configuration types

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    RETRY_DEFAULT_BACKOFF_FACTOR, RETRY_DEFAULT_DELAY_MS, RETRY_DEFAULT_MAX_ATTEMPTS,
};

/// Default retry policy applied to host calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Base delay between attempts in milliseconds
    pub delay_ms: u64,

    /// Exponent applied to the attempt number (`delay * attempt^factor`)
    pub backoff_factor: f64,
}

impl RetryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Returns default retry configuration with:
/// - 3 attempts
/// - 100ms base delay
/// - quadratic backoff
impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: RETRY_DEFAULT_MAX_ATTEMPTS,
            delay_ms: RETRY_DEFAULT_DELAY_MS,
            backoff_factor: RETRY_DEFAULT_BACKOFF_FACTOR,
        }
    }
}
