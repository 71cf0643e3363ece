use std::path::PathBuf;

/// Result of opening the store - distinguishes "fresh" from "recovered".
#[derive(Debug, Default)]
pub struct OpenReport {
    /// No document existed; started from defaults (first launch).
    pub created: bool,
    /// Present if a document existed but could not be parsed.
    pub corruption_error: Option<String>,
    /// Where the corrupted document was moved, if any.
    pub backup_path: Option<PathBuf>,
}
