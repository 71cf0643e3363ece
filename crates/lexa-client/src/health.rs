use serde::Deserialize;

/// Raw `/health` body: one flag per required backing service.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthFlags {
    #[serde(default)]
    pub gemini_enabled: bool,
    #[serde(default)]
    pub mongodb_enabled: bool,
}

/// Backend readiness, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Both required services up.
    FullyReady,
    /// Exactly one service up; AI features degrade.
    PartiallyReady,
    /// HTTP error status, or no services up.
    Degraded,
}

impl Readiness {
    /// Pure classification of the two service flags on a 2xx response.
    pub fn classify(gemini_enabled: bool, mongodb_enabled: bool) -> Self {
        match (gemini_enabled, mongodb_enabled) {
            (true, true) => Self::FullyReady,
            (true, false) | (false, true) => Self::PartiallyReady,
            (false, false) => Self::Degraded,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullyReady => "fully_ready",
            Self::PartiallyReady => "partially_ready",
            Self::Degraded => "degraded",
        }
    }
}

impl std::fmt::Display for Readiness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health probe result for display and startup gating.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub readiness: Readiness,
    pub gemini_enabled: bool,
    pub mongodb_enabled: bool,
    pub latency_ms: u64,
    /// HTTP status when the probe got a response.
    pub status: u16,
}

impl HealthReport {
    pub fn is_usable(&self) -> bool {
        self.readiness != Readiness::Degraded
    }
}
