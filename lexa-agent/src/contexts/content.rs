//! The content context: the seam where page mutation would attach.
//!
//! DOM work itself lives in the browser glue; this context owns the state
//! that glue renders from - the active accommodations and feature toggles -
//! and reports receipt of selection work back to the background.

use lexa_bus::dispatch::{HandlerError, MessageHandler};
use lexa_bus::ContextRegistry;
use lexa_core::{AccessibilityProfile, ContextId, Message, Settings};

use async_trait::async_trait;
use log::{debug, info};

const VISUAL_IMPAIRMENT_TEXT_SIZE: f32 = 1.25;

/// Accommodations currently applied to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageAccommodations {
    pub profile: Option<AccessibilityProfile>,
    pub dyslexia_font: bool,
    pub high_contrast: bool,
    pub reduce_motion: bool,
    pub text_size: f32,
    pub focus_mode: bool,
    pub voice_reader: bool,
}

impl PageAccommodations {
    /// Baseline accommodations from the user's settings, no profile active.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            profile: None,
            dyslexia_font: settings.dyslexia_font,
            high_contrast: settings.high_contrast,
            reduce_motion: settings.reduce_motion,
            text_size: settings.text_size,
            focus_mode: false,
            voice_reader: false,
        }
    }

    /// Apply a profile on top of the settings baseline.
    ///
    /// Clearing the profile returns to the baseline; profiles only ever add
    /// accommodations, they never remove one the user set manually.
    fn apply_profile(&mut self, profile: Option<AccessibilityProfile>, baseline: &Settings) {
        // Reset to baseline, then layer the profile.
        *self = Self::from_settings(baseline);
        self.profile = profile;

        match profile {
            Some(AccessibilityProfile::Dyslexia) => {
                self.dyslexia_font = true;
            }
            Some(AccessibilityProfile::Adhd) => {
                self.reduce_motion = true;
                self.focus_mode = true;
            }
            Some(AccessibilityProfile::VisualImpairment) => {
                self.high_contrast = true;
                self.text_size = self.text_size.max(VISUAL_IMPAIRMENT_TEXT_SIZE);
            }
            Some(AccessibilityProfile::NonNative) => {
                // Simplification is on demand; nothing visual changes.
            }
            None => {}
        }
    }
}

pub struct ContentContext {
    registry: ContextRegistry,
    settings: Settings,
    page: PageAccommodations,
}

impl ContentContext {
    pub fn new(registry: ContextRegistry, settings: Settings) -> Self {
        let page = PageAccommodations::from_settings(&settings);
        Self {
            registry,
            settings,
            page,
        }
    }

    pub fn page(&self) -> &PageAccommodations {
        &self.page
    }

    /// Report selection work back to the background, best-effort.
    async fn report(&self, text: String) {
        let _ = self
            .registry
            .send_message(
                ContextId::Background,
                &Message::Log {
                    level: "info".into(),
                    message: text,
                },
            )
            .await;
    }
}

#[async_trait]
impl MessageHandler for ContentContext {
    fn context(&self) -> ContextId {
        ContextId::Content
    }

    async fn handle(&mut self, message: Message) -> Result<(), HandlerError> {
        match message {
            Message::ApplyProfile { profile } => {
                self.page.apply_profile(profile, &self.settings);
                match profile {
                    Some(profile) => info!("Applied {profile} accommodations to page"),
                    None => info!("Cleared profile accommodations"),
                }
                Ok(())
            }

            Message::TranslateSelection { text } => {
                self.report(format!("translating selection ({} chars)", text.len()))
                    .await;
                Ok(())
            }
            Message::ProofreadSelection { text } => {
                self.report(format!("proofreading selection ({} chars)", text.len()))
                    .await;
                Ok(())
            }
            Message::SimplifySelection { text } => {
                self.report(format!("simplifying selection ({} chars)", text.len()))
                    .await;
                Ok(())
            }
            Message::ReadAloudSelection { text } => {
                self.report(format!("reading selection aloud ({} chars)", text.len()))
                    .await;
                Ok(())
            }

            Message::ActivateFocusMode => {
                self.page.focus_mode = !self.page.focus_mode;
                info!(
                    "Focus mode {}",
                    if self.page.focus_mode { "on" } else { "off" }
                );
                Ok(())
            }
            Message::ActivateVoiceReader => {
                self.page.voice_reader = !self.page.voice_reader;
                info!(
                    "Voice reader {}",
                    if self.page.voice_reader { "on" } else { "off" }
                );
                Ok(())
            }

            armed @ (Message::ActivateScreenshot
            | Message::ActivatePrompt
            | Message::ActivateProofread
            | Message::ActivateSummarize
            | Message::ActivateTranslate
            | Message::ActivateOcrTranslate
            | Message::ActivateSimplify) => {
                self.report(format!("feature {} armed", armed.kind())).await;
                Ok(())
            }

            other => {
                debug!("Content ignoring {}", other.kind());
                Ok(())
            }
        }
    }
}
