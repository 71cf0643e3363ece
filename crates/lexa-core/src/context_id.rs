use crate::{CoreError, Result as CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// An isolated execution context within the assistant.
///
/// Each context has its own state and lifecycle; the message bus is the only
/// channel between them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContextId {
    Background,
    Popup,
    SidePanel,
    Content,
}

impl ContextId {
    pub const ALL: [ContextId; 4] = [
        ContextId::Background,
        ContextId::Popup,
        ContextId::SidePanel,
        ContextId::Content,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Popup => "popup",
            Self::SidePanel => "side_panel",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextId {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "background" => Ok(Self::Background),
            "popup" => Ok(Self::Popup),
            "side_panel" => Ok(Self::SidePanel),
            "content" => Ok(Self::Content),
            _ => Err(CoreError::InvalidContext {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
