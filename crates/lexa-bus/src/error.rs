use lexa_core::ContextId;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BusError {
    #[error("Context {context} is not registered {location}")]
    Unreachable {
        context: ContextId,
        location: ErrorLocation,
    },

    #[error("Inbox full for context {context} {location}")]
    InboxFull {
        context: ContextId,
        location: ErrorLocation,
    },

    #[error("Context {context} went away {location}")]
    ContextGone {
        context: ContextId,
        location: ErrorLocation,
    },
}

impl BusError {
    /// Delivery failures are all transient: the destination context may
    /// simply not have finished loading yet.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Unreachable { .. } | Self::InboxFull { .. } | Self::ContextGone { .. }
        )
    }

    /// Creates Unreachable error at caller location.
    #[track_caller]
    pub fn unreachable(context: ContextId) -> Self {
        Self::Unreachable {
            context,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates InboxFull error at caller location.
    #[track_caller]
    pub fn inbox_full(context: ContextId) -> Self {
        Self::InboxFull {
            context,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates ContextGone error at caller location.
    #[track_caller]
    pub fn context_gone(context: ContextId) -> Self {
        Self::ContextGone {
            context,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, BusError>;
