
use lexa_store::Store;

use std::sync::Arc;

use tempfile::TempDir;

/// Open a store inside a fresh temp directory.
pub(crate) fn temp_store() -> (TempDir, Arc<Store>) {
    let temp = TempDir::new().unwrap();
    let (store, _report) = Store::open(temp.path().join("storage.json")).unwrap();
    (temp, Arc::new(store))
}
