use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Errors that can occur during backend calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timed out: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request aborted {location}")]
    Aborted { location: ErrorLocation },

    #[error("Backend error: HTTP {status}: {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("Validation error: {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: &'static str,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Transport failures may succeed on a later attempt; everything else
    /// is deterministic.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Timeout { .. })
    }

    /// Convert reqwest error, distinguishing deadline expiry from transport
    /// failure.
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout {
                message: err.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        } else {
            ClientError::Network {
                message: err.to_string(),
                location: ErrorLocation::from(Location::caller()),
                source: err,
            }
        }
    }

    /// Convert a body-decode error with context
    #[track_caller]
    pub fn from_body(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClientError::Timeout {
                message: err.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Create an API error with location
    #[track_caller]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create an Aborted error at caller location
    #[track_caller]
    pub fn aborted() -> Self {
        ClientError::Aborted {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a Validation error at caller location
    #[track_caller]
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        ClientError::Validation {
            field,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
