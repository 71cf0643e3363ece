//! The popup context: auth, profile selection, and settings updates.

use lexa_bus::ContextRegistry;
use lexa_bus::dispatch::{HandlerError, MessageHandler};
use lexa_client::{AuthOutcome, BackendClient};
use lexa_core::{ANONYMOUS_USER_ID, AccessibilityProfile, ContextId, Message, SettingsUpdate};
use lexa_store::Store;
use lexa_sync::ProfileSynchronizer;

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info, warn};

pub struct PopupContext {
    store: Arc<Store>,
    client: Arc<BackendClient>,
    sync: Arc<ProfileSynchronizer>,
    registry: ContextRegistry,
    /// View state: which profile button renders active.
    current_profile: Option<AccessibilityProfile>,
}

impl PopupContext {
    pub fn new(
        store: Arc<Store>,
        client: Arc<BackendClient>,
        sync: Arc<ProfileSynchronizer>,
        registry: ContextRegistry,
    ) -> Self {
        Self {
            store,
            client,
            sync,
            registry,
            current_profile: None,
        }
    }

    pub fn current_profile(&self) -> Option<AccessibilityProfile> {
        self.current_profile
    }

    /// A profile button was pressed. Saves local-first and broadcasts the
    /// change; every outcome degrades to a status string.
    pub async fn select_profile(&self, profile: Option<AccessibilityProfile>) -> String {
        let user_id = self.active_user().await;

        let report = match self.sync.save(&user_id, profile).await {
            Ok(report) => report,
            Err(e) => return format!("Could not save profile: {e}"),
        };

        self.broadcast_profile(profile).await;

        match profile {
            Some(profile) if report.remote_synced => format!("{profile} support on (synced)"),
            Some(profile) => format!("{profile} support on"),
            None => String::from("Accessibility support off"),
        }
    }

    /// Merge a settings change into local storage.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> String {
        if update.is_empty() {
            return String::from("Nothing to update");
        }

        match self.store.update_settings(update).await {
            Ok(_) => String::from("Settings saved"),
            Err(e) => format!("Could not save settings: {e}"),
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> String {
        self.authenticate(email, password, false).await
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> String {
        self.authenticate(email, password, true).await
    }

    async fn authenticate(&self, email: &str, password: &str, register: bool) -> String {
        let verb = if register { "Registration" } else { "Login" };

        let outcome = if register {
            self.client.register(email, password).await
        } else {
            self.client.login(email, password).await
        };

        let user_id = match outcome {
            Ok(AuthOutcome::Granted { user_id }) => user_id,
            Ok(AuthOutcome::Denied { reason }) => return format!("{verb} failed: {reason}"),
            Err(e) => return format!("{verb} error: {e}"),
        };

        if let Err(e) = self.store.set_user_id(&user_id).await {
            return format!("{verb} succeeded but session could not be saved: {e}");
        }

        // Reconcile the profile for the signed-in account: local-first, the
        // backend only fills an empty slot.
        match self.sync.load(&user_id).await {
            Ok(Some(profile)) => {
                info!("Restored {profile} profile after sign-in");
                self.broadcast_profile(Some(profile)).await;
            }
            Ok(None) => {}
            Err(e) => warn!("Profile reconcile failed after sign-in: {e}"),
        }

        format!("Signed in as {user_id}")
    }

    pub async fn sign_out(&self) -> String {
        if let Err(e) = self.sync.logout().await {
            return format!("Sign out failed: {e}");
        }
        self.broadcast_profile(None).await;
        String::from("Signed out")
    }

    async fn active_user(&self) -> String {
        self.store
            .user_id()
            .await
            .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string())
    }

    async fn broadcast_profile(&self, profile: Option<AccessibilityProfile>) {
        for target in [ContextId::Content, ContextId::SidePanel] {
            let message = Message::ApplyProfile { profile };
            if let Err(e) = self.registry.send_message(target, &message).await {
                // Best-effort: a closed side panel just misses the update.
                debug!("Profile broadcast missed {target}: {e}");
            }
        }
    }
}

#[async_trait]
impl MessageHandler for PopupContext {
    fn context(&self) -> ContextId {
        ContextId::Popup
    }

    async fn handle(&mut self, message: Message) -> Result<(), HandlerError> {
        match message {
            Message::ApplyProfile { profile } => {
                self.current_profile = profile;
                Ok(())
            }
            other => {
                debug!("Popup ignoring {}", other.kind());
                Ok(())
            }
        }
    }
}
