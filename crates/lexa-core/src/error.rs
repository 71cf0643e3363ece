use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown message kind: {kind} {location}")]
    UnknownKind {
        kind: String,
        location: ErrorLocation,
    },

    #[error("Invalid payload for {kind}: {source} {location}")]
    InvalidPayload {
        kind: String,
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Invalid accessibility profile: {value} {location}")]
    InvalidProfile {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid context: {value} {location}")]
    InvalidContext {
        value: String,
        location: ErrorLocation,
    },

    #[error("Validation error: {field}: {message} {location}")]
    Validation {
        field: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Whether this error is an unrecognized message kind.
    ///
    /// Consumers treat unknown kinds as no-ops rather than failures.
    pub fn is_unknown_kind(&self) -> bool {
        matches!(self, Self::UnknownKind { .. })
    }

    /// Creates UnknownKind error at caller location.
    #[track_caller]
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        Self::UnknownKind {
            kind: kind.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InvalidPayload error at caller location.
    #[track_caller]
    pub fn invalid_payload(kind: impl Into<String>, source: serde_json::Error) -> Self {
        Self::InvalidPayload {
            kind: kind.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Validation error at caller location.
    #[track_caller]
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
