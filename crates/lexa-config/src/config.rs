use crate::{
    BackendConfig, BusConfig, ConfigError, ConfigErrorResult, LoggingConfig, RetryConfig,
    StorageConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub bus: BusConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for LEXA_CONFIG_DIR env var, else use ./.lexa/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply LEXA_* environment variable overrides
    /// 5. Check for legacy ~/.lexa/config.toml and warn
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Self::warn_on_legacy_config(&config_dir);

        Ok(config)
    }

    /// Early builds read ~/.lexa/; the file there is no longer consulted
    /// unless LEXA_CONFIG_DIR points at it.
    fn warn_on_legacy_config(config_dir: &std::path::Path) {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let legacy = home.join(".lexa").join("config.toml");
        if legacy.exists() && legacy.parent() != Some(config_dir) {
            log::warn!(
                "Ignoring legacy config at {}; active config dir is {}",
                legacy.display(),
                config_dir.display()
            );
        }
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: LEXA_CONFIG_DIR env var > ./.lexa/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("LEXA_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".lexa"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.bus.validate()?;
        self.retry.validate()?;
        self.storage.validate()?;

        Ok(())
    }

    /// Absolute path to the storage document.
    pub fn storage_path(&self) -> ConfigErrorResult<PathBuf> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.storage.dir).join(&self.storage.file))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  backend: {} (health {}ms, insights {}ms, request {}ms)",
            self.backend.base_url,
            self.backend.health_timeout_ms,
            self.backend.insights_timeout_ms,
            self.backend.request_timeout_ms
        );
        info!("  bus: inbox_capacity={}", self.bus.inbox_capacity);
        info!(
            "  retry: attempts={}, delay={}ms",
            self.retry.max_attempts, self.retry.delay_ms
        );
        info!(
            "  logging: {:?} (colored: {})",
            self.logging.level.filter(),
            self.logging.colored
        );
        info!("  storage: {}/{}", self.storage.dir, self.storage.file);
    }

    fn apply_env_overrides(&mut self) {
        // Backend
        Self::apply_env_string("LEXA_BACKEND_URL", &mut self.backend.base_url);
        Self::apply_env_parse(
            "LEXA_BACKEND_HEALTH_TIMEOUT_MS",
            &mut self.backend.health_timeout_ms,
        );
        Self::apply_env_parse(
            "LEXA_BACKEND_INSIGHTS_TIMEOUT_MS",
            &mut self.backend.insights_timeout_ms,
        );
        Self::apply_env_parse(
            "LEXA_BACKEND_REQUEST_TIMEOUT_MS",
            &mut self.backend.request_timeout_ms,
        );

        // Bus
        Self::apply_env_parse("LEXA_BUS_INBOX_CAPACITY", &mut self.bus.inbox_capacity);

        // Retry
        Self::apply_env_parse("LEXA_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse("LEXA_RETRY_DELAY_MS", &mut self.retry.delay_ms);

        // Logging
        Self::apply_env_parse("LEXA_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("LEXA_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("LEXA_LOG_FILE", &mut self.logging.file);

        // Storage
        Self::apply_env_string("LEXA_STORAGE_DIR", &mut self.storage.dir);
        Self::apply_env_string("LEXA_STORAGE_FILE", &mut self.storage.file);
    }

    fn apply_env_string(key: &str, target: &mut String) {
        if let Ok(value) = std::env::var(key) {
            *target = value;
        }
    }

    fn apply_env_option_string(key: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(key) {
            *target = Some(value);
        }
    }

    #[allow(clippy::collapsible_if)]
    fn apply_env_parse<T: FromStr>(key: &str, target: &mut T) {
        if let Ok(value) = std::env::var(key) {
            if let Ok(parsed) = value.parse::<T>() {
                *target = parsed;
            }
        }
    }

    fn apply_env_bool(key: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(key) {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => *target = true,
                "0" | "false" | "no" => *target = false,
                _ => {}
            }
        }
    }
}
