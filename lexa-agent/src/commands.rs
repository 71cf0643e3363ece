//! The command/menu dispatcher: browser-level event identifiers mapped to
//! bus messages.
//!
//! The table is static and closed; identifiers outside it are ignored, not
//! errors. Dispatch itself is synchronous - the resulting send is async but
//! callers do not await delivery for fire-and-forget paths.

use lexa_core::{ContextId, Message};

/// What a browser event translates to.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandAction {
    /// Deliver a message to its destination context.
    Forward(Message),
    /// Fetch analytics and push them into the side panel (the insights
    /// round trip originates here, not in the receiving context).
    FetchInsights,
}

/// Context-menu item identifiers, as registered with the browser.
pub mod menu_ids {
    pub const TRANSLATE_SELECTION: &str = "translate-selection";
    pub const PROOFREAD_SELECTION: &str = "proofread-selection";
    pub const SIMPLIFY_SELECTION: &str = "simplify-selection";
    pub const READ_ALOUD_SELECTION: &str = "read-aloud-selection";
}

/// Keyboard command and popup button identifiers.
pub mod command_ids {
    pub const ACTIVATE_SCREENSHOT: &str = "activate-screenshot";
    pub const ACTIVATE_PROMPT: &str = "activate-prompt";
    pub const ACTIVATE_PROOFREAD: &str = "activate-proofread";
    pub const ACTIVATE_SUMMARIZE: &str = "activate-summarize";
    pub const ACTIVATE_TRANSLATE: &str = "activate-translate";
    pub const ACTIVATE_OCR_TRANSLATE: &str = "activate-ocr-translate";
    pub const ACTIVATE_SIMPLIFY: &str = "activate-simplify";
    pub const ACTIVATE_VOICE_READER: &str = "activate-voice-reader";
    pub const ACTIVATE_FOCUS_MODE: &str = "activate-focus-mode";
    pub const SHOW_INSIGHTS: &str = "show-insights";
}

/// Translate a browser event into an action.
///
/// Selection menu items need the selected text; without it the event is
/// dropped the same way an unmapped identifier is.
pub fn dispatch_event(event_id: &str, selection: Option<&str>) -> Option<CommandAction> {
    use CommandAction::{FetchInsights, Forward};

    if let Some(text) = selection_message(event_id, selection) {
        return Some(Forward(text));
    }

    let message = match event_id {
        command_ids::ACTIVATE_SCREENSHOT => Message::ActivateScreenshot,
        command_ids::ACTIVATE_PROMPT => Message::ActivatePrompt,
        command_ids::ACTIVATE_PROOFREAD => Message::ActivateProofread,
        command_ids::ACTIVATE_SUMMARIZE => Message::ActivateSummarize,
        command_ids::ACTIVATE_TRANSLATE => Message::ActivateTranslate,
        command_ids::ACTIVATE_OCR_TRANSLATE => Message::ActivateOcrTranslate,
        command_ids::ACTIVATE_SIMPLIFY => Message::ActivateSimplify,
        command_ids::ACTIVATE_VOICE_READER => Message::ActivateVoiceReader,
        command_ids::ACTIVATE_FOCUS_MODE => Message::ActivateFocusMode,
        command_ids::SHOW_INSIGHTS => return Some(FetchInsights),
        _ => return None,
    };

    Some(Forward(message))
}

fn selection_message(event_id: &str, selection: Option<&str>) -> Option<Message> {
    let text = selection?.trim();
    if text.is_empty() {
        return None;
    }
    let text = text.to_string();

    match event_id {
        menu_ids::TRANSLATE_SELECTION => Some(Message::TranslateSelection { text }),
        menu_ids::PROOFREAD_SELECTION => Some(Message::ProofreadSelection { text }),
        menu_ids::SIMPLIFY_SELECTION => Some(Message::SimplifySelection { text }),
        menu_ids::READ_ALOUD_SELECTION => Some(Message::ReadAloudSelection { text }),
        _ => None,
    }
}

/// Destination context for each message kind.
pub fn target_for(message: &Message) -> ContextId {
    match message {
        // Page-facing work happens in the content context.
        Message::TranslateSelection { .. }
        | Message::ProofreadSelection { .. }
        | Message::SimplifySelection { .. }
        | Message::ReadAloudSelection { .. }
        | Message::ActivateScreenshot
        | Message::ActivatePrompt
        | Message::ActivateProofread
        | Message::ActivateSummarize
        | Message::ActivateTranslate
        | Message::ActivateOcrTranslate
        | Message::ActivateSimplify
        | Message::ActivateVoiceReader
        | Message::ActivateFocusMode
        | Message::ApplyProfile { .. } => ContextId::Content,

        Message::ShowInsights { .. } => ContextId::SidePanel,

        Message::Log { .. } | Message::TutorialCompleted { .. } => ContextId::Background,
    }
}
