use lexa_store::StoreError;

use thiserror::Error;

/// Synchronizer failures.
///
/// Only local storage failures surface here: the local copy is what the UI
/// runs on. Remote failures are captured in [`crate::SaveReport`] or
/// degraded to a miss on load.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Storage failure: {source}")]
    Store {
        #[from]
        source: StoreError,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
