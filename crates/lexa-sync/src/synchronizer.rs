//! Local/remote reconciliation for the accessibility profile.
//!
//! The local copy is authoritative for the running session; the backend
//! copy is authoritative across devices. Writes go local-first and push
//! best-effort; reads only consult the backend when local storage is empty
//! (fresh install or storage wipe).

use crate::{Result as SyncResult, SaveReport};

use lexa_client::BackendClient;
use lexa_core::{ANONYMOUS_USER_ID, AccessibilityProfile, ProfileRecord};
use lexa_store::Store;

use std::sync::Arc;

use log::{debug, info, warn};

pub struct ProfileSynchronizer {
    store: Arc<Store>,
    client: Arc<BackendClient>,
}

impl ProfileSynchronizer {
    pub fn new(store: Arc<Store>, client: Arc<BackendClient>) -> Self {
        Self { store, client }
    }

    /// Save a profile selection: local write first, then best-effort push.
    ///
    /// The local write is the operation; its failure is the only failure.
    /// A remote error is recorded in the report and logged, never rolled
    /// back locally. Anonymous sessions and profile clears skip the push:
    /// the backend keys profiles by account, and it keeps the last actual
    /// selection.
    pub async fn save(
        &self,
        user_id: &str,
        profile: Option<AccessibilityProfile>,
    ) -> SyncResult<SaveReport> {
        self.store.set_profile(profile).await?;

        let mode = match profile {
            Some(mode) => mode,
            None => {
                debug!("Profile cleared locally; no remote push");
                return Ok(SaveReport::local_only());
            }
        };

        if user_id == ANONYMOUS_USER_ID {
            debug!("Anonymous session; profile {mode} saved locally only");
            return Ok(SaveReport::local_only());
        }

        let record = ProfileRecord::new(mode);
        match self.client.save_profile(user_id, &record).await {
            Ok(()) => {
                info!("Profile {mode} synced to backend for {user_id}");
                Ok(SaveReport::synced())
            }
            Err(e) => {
                warn!("Profile {mode} saved locally but backend push failed: {e}");
                Ok(SaveReport::remote_failed(e.to_string()))
            }
        }
    }

    /// Load the active profile, local-first.
    ///
    /// A local value short-circuits without network traffic. Only an empty
    /// local store consults the backend; a remote hit is written back so
    /// the next load stays local.
    pub async fn load(&self, user_id: &str) -> SyncResult<Option<AccessibilityProfile>> {
        if let Some(profile) = self.store.profile().await {
            return Ok(Some(profile));
        }

        if user_id == ANONYMOUS_USER_ID {
            return Ok(None);
        }

        match self.client.get_profile(user_id).await {
            Ok(Some(profile)) => {
                info!("Restored profile {profile} from backend for {user_id}");
                self.store.set_profile(Some(profile)).await?;
                Ok(Some(profile))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                // The backend being down must not break startup.
                warn!("Profile fetch failed, continuing without profile: {e}");
                Ok(None)
            }
        }
    }

    /// Logout: clear the local session; the backend is never contacted.
    pub async fn logout(&self) -> SyncResult<()> {
        self.store.clear_session().await?;
        info!("Session cleared");
        Ok(())
    }
}
