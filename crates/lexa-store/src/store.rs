//! Persisted key-value state shared by every context.
//!
//! All mutation funnels through one async write lock and an atomic rename,
//! so concurrent contexts serialize instead of clobbering each other's
//! writes.

use crate::{OpenReport, Result as StoreResult, StoreDocument, StoreError};

use lexa_core::{AccessibilityProfile, Settings, SettingsUpdate};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{info, warn};
use tokio::sync::RwLock;

const BACKUP_DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// File-backed store for the session document.
pub struct Store {
    path: PathBuf,
    state: RwLock<StoreDocument>,
}

impl Store {
    /// Open (or create) the store at the given path.
    ///
    /// A corrupted document is backed up next to the original and replaced
    /// with defaults; opening never fails because of bad content.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<(Self, OpenReport)> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| StoreError::dir_creation(parent.to_path_buf(), e))?;
        }

        let mut report = OpenReport::default();

        let document = if path.exists() {
            let contents =
                fs::read_to_string(&path).map_err(|e| StoreError::file_read(path.clone(), e))?;

            match serde_json::from_str::<StoreDocument>(&contents) {
                Ok(document) => {
                    info!("Loaded storage document from {path:?}");
                    document
                }
                Err(e) => {
                    warn!("Storage document corrupted at {path:?}: {e}");
                    report.corruption_error = Some(e.to_string());
                    report.backup_path = Some(Self::backup_corrupted(&path)?);
                    StoreDocument::default()
                }
            }
        } else {
            info!("No storage document at {path:?} (first launch)");
            report.created = true;
            StoreDocument::default()
        };

        Ok((
            Self {
                path,
                state: RwLock::new(document),
            },
            report,
        ))
    }

    /// Moves an unparseable document aside for debugging.
    fn backup_corrupted(path: &Path) -> StoreResult<PathBuf> {
        let timestamp = Utc::now().format(BACKUP_DATE_FORMAT);
        let backup_path = path.with_extension(format!("json.corrupted.{timestamp}"));

        fs::rename(path, &backup_path).map_err(|e| StoreError::BackupFailed {
            source: e,
            location: error_location::ErrorLocation::from(std::panic::Location::caller()),
        })?;

        warn!("Backed up corrupted storage document to {backup_path:?}");
        Ok(backup_path)
    }

    /// Writes the document using the atomic write pattern.
    ///
    /// 1. Writes to temp file
    /// 2. Syncs to disk (fsync)
    /// 3. Atomic rename to final location
    fn persist(&self, document: &StoreDocument) -> StoreResult<()> {
        let temp_path = self
            .path
            .with_extension(format!("json.tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(document)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StoreError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        Ok(())
    }

    /// Apply a mutation under the write lock and persist the result.
    async fn mutate<F>(&self, apply: F) -> StoreResult<()>
    where
        F: FnOnce(&mut StoreDocument),
    {
        let mut state = self.state.write().await;
        apply(&mut state);
        state.last_updated = Some(Utc::now());
        self.persist(&state)
    }

    // =========================================================================
    // Identity
    // =========================================================================

    pub async fn user_id(&self) -> Option<String> {
        self.state.read().await.user_id.clone()
    }

    pub async fn set_user_id(&self, user_id: &str) -> StoreResult<()> {
        self.mutate(|doc| doc.user_id = Some(user_id.to_string()))
            .await
    }

    // =========================================================================
    // Accessibility profile
    // =========================================================================

    pub async fn profile(&self) -> Option<AccessibilityProfile> {
        self.state.read().await.accessibility_profile
    }

    pub async fn accessibility_mode(&self) -> bool {
        self.state.read().await.accessibility_mode
    }

    /// Set or clear the active profile.
    ///
    /// The `accessibilityMode` boolean is derived here and nowhere else,
    /// which keeps it consistent with the profile by construction.
    pub async fn set_profile(&self, profile: Option<AccessibilityProfile>) -> StoreResult<()> {
        self.mutate(|doc| {
            doc.accessibility_profile = profile;
            doc.accessibility_mode = profile.is_some();
        })
        .await
    }

    // =========================================================================
    // Settings
    // =========================================================================

    pub async fn settings(&self) -> Settings {
        self.state.read().await.settings.clone()
    }

    /// Merge a settings update; returns the merged result.
    pub async fn update_settings(&self, update: &SettingsUpdate) -> StoreResult<Settings> {
        let mut merged = None;
        self.mutate(|doc| {
            doc.settings.apply(update);
            merged = Some(doc.settings.clone());
        })
        .await?;

        // mutate always runs the closure before persisting
        Ok(merged.unwrap_or_default())
    }

    // =========================================================================
    // Tutorial
    // =========================================================================

    pub async fn tutorial_completed(&self) -> bool {
        self.state.read().await.tutorial_completed
    }

    pub async fn record_tutorial(&self, skipped: bool) -> StoreResult<()> {
        self.mutate(|doc| {
            doc.tutorial_completed = true;
            doc.tutorial_skipped = skipped;
            doc.tutorial_completed_at = Some(Utc::now());
        })
        .await
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Logout: forget the user and the active profile.
    ///
    /// Settings and tutorial state survive; they belong to the installation,
    /// not the account.
    pub async fn clear_session(&self) -> StoreResult<()> {
        self.mutate(|doc| {
            doc.user_id = None;
            doc.accessibility_profile = None;
            doc.accessibility_mode = false;
        })
        .await
    }

    /// Current document, cloned.
    pub async fn snapshot(&self) -> StoreDocument {
        self.state.read().await.clone()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
