use crate::AccessibilityProfile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The profile shape the backend stores: the selected mode plus the moment
/// the selection was made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileRecord {
    pub mode: AccessibilityProfile,
    pub timestamp: DateTime<Utc>,
}

impl ProfileRecord {
    pub fn new(mode: AccessibilityProfile) -> Self {
        Self {
            mode,
            timestamp: Utc::now(),
        }
    }
}
