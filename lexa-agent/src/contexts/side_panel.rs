//! The side panel context: receives pushed insights and hosts the
//! first-run tutorial completion hook.

use lexa_bus::ContextRegistry;
use lexa_bus::dispatch::{HandlerError, MessageHandler};
use lexa_core::{AccessibilityProfile, ContextId, Message};

use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;

/// Insights as last pushed by the background context.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelInsights {
    pub insights: Value,
    pub session_count: u64,
}

pub struct SidePanelContext {
    registry: ContextRegistry,
    latest_insights: Option<PanelInsights>,
    current_profile: Option<AccessibilityProfile>,
}

impl SidePanelContext {
    pub fn new(registry: ContextRegistry) -> Self {
        Self {
            registry,
            latest_insights: None,
            current_profile: None,
        }
    }

    pub fn latest_insights(&self) -> Option<&PanelInsights> {
        self.latest_insights.as_ref()
    }

    pub fn current_profile(&self) -> Option<AccessibilityProfile> {
        self.current_profile
    }

    /// The tutorial finished (or was dismissed); the background context
    /// owns recording it.
    pub async fn complete_tutorial(&self, skipped: bool) {
        let message = Message::TutorialCompleted { skipped };
        if let Err(e) = self
            .registry
            .send_message(ContextId::Background, &message)
            .await
        {
            warn!("Tutorial completion not recorded: {e}");
        }
    }
}

#[async_trait]
impl MessageHandler for SidePanelContext {
    fn context(&self) -> ContextId {
        ContextId::SidePanel
    }

    async fn handle(&mut self, message: Message) -> Result<(), HandlerError> {
        match message {
            Message::ShowInsights {
                insights,
                session_count,
            } => {
                info!("Insights updated ({session_count} sessions)");
                self.latest_insights = Some(PanelInsights {
                    insights,
                    session_count,
                });
                Ok(())
            }
            Message::ApplyProfile { profile } => {
                self.current_profile = profile;
                Ok(())
            }
            other => {
                debug!("Side panel ignoring {}", other.kind());
                Ok(())
            }
        }
    }
}
