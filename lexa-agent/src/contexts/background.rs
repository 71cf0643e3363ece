//! The background context: owns the command/menu dispatcher, the activation
//! retry path, and the insights round trip.

use crate::commands::{CommandAction, dispatch_event, target_for};

use lexa_bus::dispatch::{HandlerError, MessageHandler};
use lexa_bus::{ContextRegistry, RetryPolicy, ShutdownCoordinator, with_retry};
use lexa_client::BackendClient;
use lexa_core::{ANONYMOUS_USER_ID, ContextId, Message};
use lexa_store::Store;

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use log::{debug, info, warn};

#[derive(Clone)]
pub struct BackgroundContext {
    registry: ContextRegistry,
    store: Arc<Store>,
    client: Arc<BackendClient>,
    shutdown: ShutdownCoordinator,
    retry: RetryPolicy,
    last_status: Arc<Mutex<Option<String>>>,
}

impl BackgroundContext {
    pub fn new(
        registry: ContextRegistry,
        store: Arc<Store>,
        client: Arc<BackendClient>,
        shutdown: ShutdownCoordinator,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            registry,
            store,
            client,
            shutdown,
            retry,
            last_status: Arc::new(Mutex::new(None)),
        }
    }

    /// Entry point for browser-level events (menu clicks, shortcuts).
    ///
    /// Returns the user-visible status string when a failure is surfaced;
    /// unmapped events and best-effort misses return None.
    pub async fn on_browser_event(&self, event_id: &str, selection: Option<&str>) -> Option<String> {
        match dispatch_event(event_id, selection) {
            None => {
                debug!("Ignoring unmapped browser event: {event_id}");
                None
            }
            Some(CommandAction::FetchInsights) => self.push_insights().await,
            Some(CommandAction::Forward(message)) => self.deliver(message).await,
        }
    }

    /// Deliver a dispatched message to its destination.
    ///
    /// Activations retry on the configured policy (the content script may
    /// still be injecting); everything else is single-attempt best-effort.
    async fn deliver(&self, message: Message) -> Option<String> {
        let target = target_for(&message);
        let kind = message.kind();

        if message.is_activation() {
            let mut shutdown_rx = self.shutdown.subscribe();
            let registry = self.registry.clone();
            let attempts = std::sync::atomic::AtomicU32::new(0);

            let result = with_retry(&self.retry, kind, &mut shutdown_rx, || {
                let registry = registry.clone();
                let message = message.clone();
                if attempts.fetch_add(1, std::sync::atomic::Ordering::Relaxed) > 0 {
                    self.registry.metrics().delivery_retry(kind);
                }
                async move { registry.send_message(target, &message).await }
            })
            .await;

            return match result {
                Ok(()) => None,
                Err(e) => {
                    Some(self.set_status(format!("Could not reach the page to start {kind}: {e}")))
                }
            };
        }

        if let Err(e) = self.registry.send_message(target, &message).await {
            // Best-effort path: the destination may simply not be open.
            warn!("Dropped {kind} for {target}: {e}");
        }
        None
    }

    /// The insights round trip: fetch from the backend, push the result
    /// into the side panel. The panel never awaits a reply; data arrives as
    /// its own message.
    pub async fn push_insights(&self) -> Option<String> {
        let user_id = self
            .store
            .user_id()
            .await
            .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string());

        match self.client.insights(&user_id).await {
            Ok(report) => {
                info!(
                    "Fetched insights for {user_id} ({} sessions)",
                    report.session_count
                );
                let message = Message::ShowInsights {
                    insights: report.insights,
                    session_count: report.session_count,
                };
                if let Err(e) = self
                    .registry
                    .send_message(ContextId::SidePanel, &message)
                    .await
                {
                    warn!("Insights ready but side panel unreachable: {e}");
                }
                None
            }
            Err(e) => Some(self.set_status(format!("Could not load insights: {e}"))),
        }
    }

    /// Broadcast a profile change to the page-facing contexts.
    pub async fn broadcast_profile(&self, profile: Option<lexa_core::AccessibilityProfile>) {
        for target in [ContextId::Content, ContextId::SidePanel] {
            let message = Message::ApplyProfile { profile };
            if let Err(e) = self.registry.send_message(target, &message).await {
                warn!("Profile broadcast missed {target}: {e}");
            }
        }
    }

    /// The most recent surfaced status, for UI badges and tests.
    pub fn last_status(&self) -> Option<String> {
        self.last_status.lock().expect("status lock poisoned").clone()
    }

    fn set_status(&self, status: String) -> String {
        warn!("{status}");
        *self.last_status.lock().expect("status lock poisoned") = Some(status.clone());
        status
    }
}

#[async_trait]
impl MessageHandler for BackgroundContext {
    fn context(&self) -> ContextId {
        ContextId::Background
    }

    async fn handle(&mut self, message: Message) -> Result<(), HandlerError> {
        match message {
            Message::Log { level, message } => {
                match level.as_str() {
                    "error" => log::error!("[page] {message}"),
                    "warn" => log::warn!("[page] {message}"),
                    "debug" => log::debug!("[page] {message}"),
                    _ => log::info!("[page] {message}"),
                }
                Ok(())
            }
            Message::TutorialCompleted { skipped } => {
                info!(
                    "Tutorial {}",
                    if skipped { "skipped" } else { "completed" }
                );
                self.store.record_tutorial(skipped).await?;
                Ok(())
            }
            other => {
                debug!("Background ignoring {}", other.kind());
                Ok(())
            }
        }
    }
}
