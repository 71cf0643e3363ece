use serde::{Deserialize, Serialize};

/// Credentials body for login and register.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Raw auth response; the backend reports rejection in-band.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub error: Option<String>,
}

/// Outcome of an auth call.
///
/// A well-formed rejection is a value, not an error; only transport and
/// contract failures surface as `ClientError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Granted { user_id: String },
    Denied { reason: String },
}

impl AuthOutcome {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Granted { user_id } => Some(user_id),
            Self::Denied { .. } => None,
        }
    }
}
