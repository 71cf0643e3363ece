/// Outcome of a profile save.
///
/// Local success is sufficient for the operation to count as a success;
/// a failed remote push is carried here instead of failing the call, so
/// callers can surface it without blocking the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub local_saved: bool,
    /// True when the backend acknowledged the push.
    pub remote_synced: bool,
    /// Why the push failed; None when it succeeded or was not attempted.
    pub remote_error: Option<String>,
}

impl SaveReport {
    pub(crate) fn local_only() -> Self {
        Self {
            local_saved: true,
            remote_synced: false,
            remote_error: None,
        }
    }

    pub(crate) fn synced() -> Self {
        Self {
            local_saved: true,
            remote_synced: true,
            remote_error: None,
        }
    }

    pub(crate) fn remote_failed(error: impl Into<String>) -> Self {
        Self {
            local_saved: true,
            remote_synced: false,
            remote_error: Some(error.into()),
        }
    }
}
