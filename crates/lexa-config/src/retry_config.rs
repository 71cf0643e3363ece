use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

// Activation delivery constraints
pub const MIN_MAX_ATTEMPTS: u32 = 1;
pub const MAX_MAX_ATTEMPTS: u32 = 10;
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

pub const MIN_DELAY_MS: u64 = 10;
pub const MAX_DELAY_MS: u64 = 10_000;
pub const DEFAULT_DELAY_MS: u64 = 500;

/// Retry configuration for feature-activation delivery.
///
/// Activation messages race the content context's startup; a fixed short
/// delay between attempts covers the injection window. This is the only
/// retried path, every other send is single-attempt.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the initial one.
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds.
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.max_attempts < MIN_MAX_ATTEMPTS || self.max_attempts > MAX_MAX_ATTEMPTS {
            return Err(ConfigError::config(format!(
                "retry.max_attempts must be {}-{}, got {}",
                MIN_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.delay_ms < MIN_DELAY_MS || self.delay_ms > MAX_DELAY_MS {
            return Err(ConfigError::config(format!(
                "retry.delay_ms must be {}-{}, got {}",
                MIN_DELAY_MS, MAX_DELAY_MS, self.delay_ms
            )));
        }

        Ok(())
    }
}
