pub mod error;
pub mod save_report;
pub mod synchronizer;

pub use error::{Result, SyncError};
pub use save_report::SaveReport;
pub use synchronizer::ProfileSynchronizer;
