//! The closed message catalog exchanged between contexts.
//!
//! On the wire every message is a `{type, data?}` envelope; in code it is a
//! tagged variant so each context dispatches exhaustively instead of
//! string-matching. Kinds outside the catalog decode to
//! [`CoreError::UnknownKind`] and consumers treat them as no-ops.

use crate::{AccessibilityProfile, CoreError, Result as CoreResult};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire names of every known message kind.
pub mod kinds {
    pub const TRANSLATE_SELECTION: &str = "TRANSLATE_SELECTION";
    pub const PROOFREAD_SELECTION: &str = "PROOFREAD_SELECTION";
    pub const SIMPLIFY_SELECTION: &str = "SIMPLIFY_SELECTION";
    pub const READ_ALOUD_SELECTION: &str = "READ_ALOUD_SELECTION";
    pub const ACTIVATE_SCREENSHOT: &str = "ACTIVATE_SCREENSHOT";
    pub const ACTIVATE_PROMPT: &str = "ACTIVATE_PROMPT";
    pub const ACTIVATE_PROOFREAD: &str = "ACTIVATE_PROOFREAD";
    pub const ACTIVATE_SUMMARIZE: &str = "ACTIVATE_SUMMARIZE";
    pub const ACTIVATE_TRANSLATE: &str = "ACTIVATE_TRANSLATE";
    pub const ACTIVATE_OCR_TRANSLATE: &str = "ACTIVATE_OCR_TRANSLATE";
    pub const ACTIVATE_SIMPLIFY: &str = "ACTIVATE_SIMPLIFY";
    pub const ACTIVATE_VOICE_READER: &str = "ACTIVATE_VOICE_READER";
    pub const ACTIVATE_FOCUS_MODE: &str = "ACTIVATE_FOCUS_MODE";
    pub const APPLY_PROFILE: &str = "APPLY_PROFILE";
    pub const SHOW_INSIGHTS: &str = "SHOW_INSIGHTS";
    pub const LOG: &str = "LOG";
    pub const TUTORIAL_COMPLETED: &str = "TUTORIAL_COMPLETED";
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct SelectionPayload {
    text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ProfilePayload {
    profile: Option<AccessibilityProfile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct InsightsPayload {
    insights: Value,
    session_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct LogPayload {
    level: String,
    message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct TutorialPayload {
    skipped: bool,
}

/// A typed inter-context message.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Selection features (carry the selected page text)
    TranslateSelection { text: String },
    ProofreadSelection { text: String },
    SimplifySelection { text: String },
    ReadAloudSelection { text: String },

    // Feature activations (no payload)
    ActivateScreenshot,
    ActivatePrompt,
    ActivateProofread,
    ActivateSummarize,
    ActivateTranslate,
    ActivateOcrTranslate,
    ActivateSimplify,
    ActivateVoiceReader,
    ActivateFocusMode,

    /// Apply (or clear, with `None`) the active accessibility profile.
    ApplyProfile {
        profile: Option<AccessibilityProfile>,
    },

    /// Push analytics insights into the receiving context.
    ShowInsights { insights: Value, session_count: u64 },

    /// Forward a log line to the background context.
    Log { level: String, message: String },

    /// First-run tutorial finished (or was skipped).
    TutorialCompleted { skipped: bool },
}

impl Message {
    /// The wire name of this message.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TranslateSelection { .. } => kinds::TRANSLATE_SELECTION,
            Self::ProofreadSelection { .. } => kinds::PROOFREAD_SELECTION,
            Self::SimplifySelection { .. } => kinds::SIMPLIFY_SELECTION,
            Self::ReadAloudSelection { .. } => kinds::READ_ALOUD_SELECTION,
            Self::ActivateScreenshot => kinds::ACTIVATE_SCREENSHOT,
            Self::ActivatePrompt => kinds::ACTIVATE_PROMPT,
            Self::ActivateProofread => kinds::ACTIVATE_PROOFREAD,
            Self::ActivateSummarize => kinds::ACTIVATE_SUMMARIZE,
            Self::ActivateTranslate => kinds::ACTIVATE_TRANSLATE,
            Self::ActivateOcrTranslate => kinds::ACTIVATE_OCR_TRANSLATE,
            Self::ActivateSimplify => kinds::ACTIVATE_SIMPLIFY,
            Self::ActivateVoiceReader => kinds::ACTIVATE_VOICE_READER,
            Self::ActivateFocusMode => kinds::ACTIVATE_FOCUS_MODE,
            Self::ApplyProfile { .. } => kinds::APPLY_PROFILE,
            Self::ShowInsights { .. } => kinds::SHOW_INSIGHTS,
            Self::Log { .. } => kinds::LOG,
            Self::TutorialCompleted { .. } => kinds::TUTORIAL_COMPLETED,
        }
    }

    /// Whether this is one of the `ACTIVATE_*` feature toggles.
    ///
    /// Activations are the one delivery path that retries; everything else
    /// is single-attempt best-effort.
    pub fn is_activation(&self) -> bool {
        matches!(
            self,
            Self::ActivateScreenshot
                | Self::ActivatePrompt
                | Self::ActivateProofread
                | Self::ActivateSummarize
                | Self::ActivateTranslate
                | Self::ActivateOcrTranslate
                | Self::ActivateSimplify
                | Self::ActivateVoiceReader
                | Self::ActivateFocusMode
        )
    }

    /// Serialize the `data` part of the wire envelope. Activations carry none.
    pub fn payload(&self) -> Option<Value> {
        fn to_value<T: Serialize>(payload: &T) -> Option<Value> {
            // Payload structs contain only JSON-representable fields.
            serde_json::to_value(payload).ok()
        }

        match self {
            Self::TranslateSelection { text }
            | Self::ProofreadSelection { text }
            | Self::SimplifySelection { text }
            | Self::ReadAloudSelection { text } => to_value(&SelectionPayload {
                text: text.clone(),
            }),
            Self::ApplyProfile { profile } => to_value(&ProfilePayload { profile: *profile }),
            Self::ShowInsights {
                insights,
                session_count,
            } => to_value(&InsightsPayload {
                insights: insights.clone(),
                session_count: *session_count,
            }),
            Self::Log { level, message } => to_value(&LogPayload {
                level: level.clone(),
                message: message.clone(),
            }),
            Self::TutorialCompleted { skipped } => to_value(&TutorialPayload { skipped: *skipped }),
            _ => None,
        }
    }

    /// Decode a wire `{type, data?}` pair into a typed message.
    #[track_caller]
    pub fn decode(kind: &str, data: Option<&Value>) -> CoreResult<Self> {
        fn payload<T: DeserializeOwned>(kind: &str, data: Option<&Value>) -> CoreResult<T> {
            let value = data.cloned().unwrap_or(Value::Null);
            serde_json::from_value(value).map_err(|e| CoreError::invalid_payload(kind, e))
        }

        match kind {
            kinds::TRANSLATE_SELECTION => {
                let p: SelectionPayload = payload(kind, data)?;
                Ok(Self::TranslateSelection { text: p.text })
            }
            kinds::PROOFREAD_SELECTION => {
                let p: SelectionPayload = payload(kind, data)?;
                Ok(Self::ProofreadSelection { text: p.text })
            }
            kinds::SIMPLIFY_SELECTION => {
                let p: SelectionPayload = payload(kind, data)?;
                Ok(Self::SimplifySelection { text: p.text })
            }
            kinds::READ_ALOUD_SELECTION => {
                let p: SelectionPayload = payload(kind, data)?;
                Ok(Self::ReadAloudSelection { text: p.text })
            }
            kinds::ACTIVATE_SCREENSHOT => Ok(Self::ActivateScreenshot),
            kinds::ACTIVATE_PROMPT => Ok(Self::ActivatePrompt),
            kinds::ACTIVATE_PROOFREAD => Ok(Self::ActivateProofread),
            kinds::ACTIVATE_SUMMARIZE => Ok(Self::ActivateSummarize),
            kinds::ACTIVATE_TRANSLATE => Ok(Self::ActivateTranslate),
            kinds::ACTIVATE_OCR_TRANSLATE => Ok(Self::ActivateOcrTranslate),
            kinds::ACTIVATE_SIMPLIFY => Ok(Self::ActivateSimplify),
            kinds::ACTIVATE_VOICE_READER => Ok(Self::ActivateVoiceReader),
            kinds::ACTIVATE_FOCUS_MODE => Ok(Self::ActivateFocusMode),
            kinds::APPLY_PROFILE => {
                let p: ProfilePayload = payload(kind, data)?;
                Ok(Self::ApplyProfile { profile: p.profile })
            }
            kinds::SHOW_INSIGHTS => {
                let p: InsightsPayload = payload(kind, data)?;
                Ok(Self::ShowInsights {
                    insights: p.insights,
                    session_count: p.session_count,
                })
            }
            kinds::LOG => {
                let p: LogPayload = payload(kind, data)?;
                Ok(Self::Log {
                    level: p.level,
                    message: p.message,
                })
            }
            kinds::TUTORIAL_COMPLETED => {
                let p: TutorialPayload = payload(kind, data)?;
                Ok(Self::TutorialCompleted { skipped: p.skipped })
            }
            _ => Err(CoreError::unknown_kind(kind)),
        }
    }
}
