use serde::Deserialize;
use serde_json::Value;

/// Analytics insights for the side panel.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Insights {
    #[serde(default)]
    pub insights: Value,
    #[serde(default)]
    pub session_count: u64,
}
