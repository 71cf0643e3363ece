use lexa_core::{AccessibilityProfile, Settings};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted state document, shared by every context.
///
/// Key names are camelCase on disk; the document predates this
/// implementation and existing installations must keep loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreDocument {
    pub user_id: Option<String>,
    pub accessibility_profile: Option<AccessibilityProfile>,
    /// Always equals `accessibility_profile.is_some()`; stored redundantly
    /// because external readers key off the boolean.
    pub accessibility_mode: bool,
    pub settings: Settings,
    pub tutorial_completed: bool,
    pub tutorial_skipped: bool,
    pub tutorial_completed_at: Option<DateTime<Utc>>,
    pub last_updated: Option<DateTime<Utc>>,
}
