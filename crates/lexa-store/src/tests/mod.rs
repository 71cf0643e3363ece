
use crate::Store;

use std::path::PathBuf;

use tempfile::TempDir;

/// Open a store inside a fresh temp directory.
pub(crate) fn open_temp_store() -> (TempDir, Store, PathBuf) {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("storage.json");
    let (store, _report) = Store::open(&path).unwrap();
    (temp, store, path)
}
