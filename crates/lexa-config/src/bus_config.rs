use crate::{ConfigError, ConfigErrorResult, DEFAULT_INBOX_CAPACITY};

use serde::Deserialize;

pub const MIN_INBOX_CAPACITY: usize = 1;
pub const MAX_INBOX_CAPACITY: usize = 1024;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Bounded inbox size per context. A full inbox fails the send rather
    /// than blocking the sending context.
    pub inbox_capacity: usize,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: DEFAULT_INBOX_CAPACITY,
        }
    }
}

impl BusConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_INBOX_CAPACITY..=MAX_INBOX_CAPACITY).contains(&self.inbox_capacity) {
            return Err(ConfigError::config(format!(
                "bus.inbox_capacity must be {}-{}, got {}",
                MIN_INBOX_CAPACITY, MAX_INBOX_CAPACITY, self.inbox_capacity
            )));
        }

        Ok(())
    }
}
