mod backend_config;
mod bus_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod retry_config;
mod storage_config;

#[cfg(test)]
mod tests;

pub use backend_config::BackendConfig;
pub use bus_config::BusConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use retry_config::RetryConfig;
pub use storage_config::StorageConfig;

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 2000;
const DEFAULT_INSIGHTS_TIMEOUT_MS: u64 = 5000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10000;
const DEFAULT_INBOX_CAPACITY: usize = 32;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_STORAGE_DIR: &str = "data";
const DEFAULT_STORAGE_FILE: &str = "storage.json";
