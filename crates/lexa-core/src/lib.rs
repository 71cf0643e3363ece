pub mod context_id;
pub mod envelope;
pub mod error;
pub mod message;
pub mod models;

#[cfg(test)]
mod tests;

pub use context_id::ContextId;
pub use envelope::Envelope;
pub use error::{CoreError, Result};
pub use message::{Message, kinds};
pub use models::accessibility_profile::AccessibilityProfile;
pub use models::profile_record::ProfileRecord;
pub use models::settings::{Settings, SettingsUpdate};
pub use models::user_identity::{ANONYMOUS_USER_ID, UserIdentity};
