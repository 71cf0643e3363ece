use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_BACKEND_URL, DEFAULT_HEALTH_TIMEOUT_MS,
    DEFAULT_INSIGHTS_TIMEOUT_MS, DEFAULT_REQUEST_TIMEOUT_MS,
};

use serde::Deserialize;

pub const MIN_TIMEOUT_MS: u64 = 100;
pub const MAX_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the assistant backend.
    pub base_url: String,
    /// Deadline for the health probe.
    pub health_timeout_ms: u64,
    /// Deadline for the analytics insights call.
    pub insights_timeout_ms: u64,
    /// Deadline for auth and profile calls.
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BACKEND_URL),
            health_timeout_ms: DEFAULT_HEALTH_TIMEOUT_MS,
            insights_timeout_ms: DEFAULT_INSIGHTS_TIMEOUT_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::backend(format!(
                "backend.base_url must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        for (name, value) in [
            ("backend.health_timeout_ms", self.health_timeout_ms),
            ("backend.insights_timeout_ms", self.insights_timeout_ms),
            ("backend.request_timeout_ms", self.request_timeout_ms),
        ] {
            if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&value) {
                return Err(ConfigError::backend(format!(
                    "{} must be {}-{}, got {}",
                    name, MIN_TIMEOUT_MS, MAX_TIMEOUT_MS, value
                )));
            }
        }

        Ok(())
    }
}
