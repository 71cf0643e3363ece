use crate::{ConfigError, ConfigErrorResult, DEFAULT_STORAGE_DIR, DEFAULT_STORAGE_FILE};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for persisted state, relative to the config directory.
    pub dir: String,
    /// Storage document file name.
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: String::from(DEFAULT_STORAGE_DIR),
            file: String::from(DEFAULT_STORAGE_FILE),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Storage must stay inside the config directory.
        for (name, value) in [("storage.dir", &self.dir), ("storage.file", &self.file)] {
            if value.is_empty() {
                return Err(ConfigError::storage(format!("{} must not be empty", name)));
            }
            if std::path::Path::new(value).is_absolute() || value.contains("..") {
                return Err(ConfigError::storage(format!(
                    "{} must be relative and cannot contain '..', got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
