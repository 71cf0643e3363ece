use serde::{Deserialize, Serialize};

/// The user id the backend assigns to sessions that never authenticated.
pub const ANONYMOUS_USER_ID: &str = "anonymous";

/// User identity as known to this installation.
///
/// Created from an auth response, persisted locally, cleared on logout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            user_id: ANONYMOUS_USER_ID.to_string(),
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.user_id == ANONYMOUS_USER_ID
    }
}

impl Default for UserIdentity {
    fn default() -> Self {
        Self::anonymous()
    }
}
