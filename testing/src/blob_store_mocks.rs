//! In-memory blob store for fast, deterministic testing.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)] // Lock poisoning only follows a panicking test

use expopass_core::blob_store::{BlobStore, BlobStoreError};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory blob store backed by a shared `HashMap`.
///
/// Clones share the same storage, so a test can hand one clone to a
/// registry and keep another to inspect, corrupt, or count writes.
///
/// # Example
///
/// ```
/// use expopass_testing::InMemoryBlobStore;
/// use expopass_core::blob_store::BlobStore;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryBlobStore::new();
///
/// store.save("attendees", b"snapshot bytes")?;
///
/// let data = store.load("attendees")?;
/// assert_eq!(data.as_deref(), Some(&b"snapshot bytes"[..]));
/// assert_eq!(store.save_count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryBlobStore {
    blobs: Arc<RwLock<HashMap<String, Vec<u8>>>>,
    saves: Arc<RwLock<usize>>,
}

impl InMemoryBlobStore {
    /// Create a new empty in-memory blob store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a blob with arbitrary bytes without counting it as a save.
    ///
    /// Useful for simulating corrupted snapshots.
    pub fn put_raw(&self, name: &str, data: &[u8]) {
        self.blobs
            .write()
            .unwrap()
            .insert(name.to_string(), data.to_vec());
    }

    /// Remove all blobs and reset the save counter
    pub fn clear(&self) {
        self.blobs.write().unwrap().clear();
        *self.saves.write().unwrap() = 0;
    }

    /// Number of `save` calls since creation (or the last `clear`)
    #[must_use]
    pub fn save_count(&self) -> usize {
        *self.saves.read().unwrap()
    }

    /// Check if a blob exists under `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.blobs.read().unwrap().contains_key(name)
    }

    /// Names of all stored blobs, sorted
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.blobs.read().unwrap().keys().cloned().collect();
        names.sort();
        names
    }
}

impl BlobStore for InMemoryBlobStore {
    fn save(&self, name: &str, data: &[u8]) -> Result<(), BlobStoreError> {
        self.blobs
            .write()
            .unwrap()
            .insert(name.to_string(), data.to_vec());
        *self.saves.write().unwrap() += 1;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        Ok(self.blobs.read().unwrap().get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let store = InMemoryBlobStore::new();
        let handle = store.clone();

        store.save("passes", &[1, 2, 3]).unwrap();

        assert!(handle.contains("passes"));
        assert_eq!(handle.load("passes").unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(handle.save_count(), 1);
    }

    #[test]
    fn put_raw_is_not_a_save() {
        let store = InMemoryBlobStore::new();
        store.put_raw("sales", &[0xde, 0xad]);

        assert_eq!(store.save_count(), 0);
        assert_eq!(store.names(), vec!["sales".to_string()]);
    }

    #[test]
    fn clear_resets_everything() {
        let store = InMemoryBlobStore::new();
        store.save("a", &[1]).unwrap();
        store.clear();

        assert!(store.names().is_empty());
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load("a").unwrap(), None);
    }
}
