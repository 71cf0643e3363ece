use crate::{CoreError, Result as CoreResult};

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A named bundle of display/behavior accommodations selected by the user.
///
/// At most one profile is active at a time; "no profile" is modeled as
/// `Option::None` at the call sites, never as an extra variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessibilityProfile {
    Dyslexia,
    Adhd,
    VisualImpairment,
    NonNative,
}

impl AccessibilityProfile {
    pub const ALL: [AccessibilityProfile; 4] = [
        AccessibilityProfile::Dyslexia,
        AccessibilityProfile::Adhd,
        AccessibilityProfile::VisualImpairment,
        AccessibilityProfile::NonNative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dyslexia => "dyslexia",
            Self::Adhd => "adhd",
            Self::VisualImpairment => "visual_impairment",
            Self::NonNative => "non_native",
        }
    }
}

impl fmt::Display for AccessibilityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessibilityProfile {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "dyslexia" => Ok(Self::Dyslexia),
            "adhd" => Ok(Self::Adhd),
            "visual_impairment" => Ok(Self::VisualImpairment),
            "non_native" => Ok(Self::NonNative),
            _ => Err(CoreError::InvalidProfile {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}
