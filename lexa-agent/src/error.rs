use thiserror::Error;

/// Startup and command-level failures.
///
/// Runtime message handling never surfaces these; per the degradation
/// policy, handler failures become log lines and status strings.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: lexa_config::ConfigError,
    },

    #[error("Storage error: {source}")]
    Store {
        #[from]
        source: lexa_store::StoreError,
    },

    #[error("Backend error: {source}")]
    Client {
        #[from]
        source: lexa_client::ClientError,
    },

    #[error("Sync error: {source}")]
    Sync {
        #[from]
        source: lexa_sync::SyncError,
    },

    #[error("{source}")]
    Core {
        #[from]
        source: lexa_core::CoreError,
    },

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, AgentError>;
