//! Snapshot encoding on top of a [`BlobStore`].
//!
//! Snapshots are serialized with `bincode`: compact, fast, and readable by
//! any Rust process sharing the same types. They are not meant to be
//! human-readable.
//!
//! Loading follows a forgiving rule: a missing, unreadable, or corrupt
//! snapshot yields `T::default()` instead of an error. The failure is logged
//! at `warn` level and otherwise swallowed.

use crate::blob_store::{BlobStore, BlobStoreError};
use serde::{Serialize, de::DeserializeOwned};

/// Serialize a snapshot value to bincode bytes.
///
/// # Errors
///
/// Returns [`BlobStoreError::Serialization`] if the value cannot be encoded.
pub fn to_bytes<T: Serialize>(name: &str, value: &T) -> Result<Vec<u8>, BlobStoreError> {
    bincode::serialize(value).map_err(|e| BlobStoreError::Serialization {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Deserialize a snapshot value from bincode bytes.
///
/// # Errors
///
/// Returns [`BlobStoreError::Serialization`] if the bytes are corrupted or
/// were written for a different type.
pub fn from_bytes<T: DeserializeOwned>(name: &str, bytes: &[u8]) -> Result<T, BlobStoreError> {
    bincode::deserialize(bytes).map_err(|e| BlobStoreError::Serialization {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// Encode `value` and save it under `name`.
///
/// # Errors
///
/// Returns an error if encoding fails or the store rejects the write.
pub fn save<T: Serialize>(
    store: &dyn BlobStore,
    name: &str,
    value: &T,
) -> Result<(), BlobStoreError> {
    let bytes = to_bytes(name, value)?;
    store.save(name, &bytes)
}

/// Load and decode the snapshot stored under `name`.
///
/// Never fails: a missing snapshot, a read error, or undecodable bytes all
/// produce `T::default()`.
#[must_use]
pub fn load_or_default<T>(store: &dyn BlobStore, name: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.load(name) {
        Ok(Some(bytes)) => from_bytes(name, &bytes).unwrap_or_else(|error| {
            tracing::warn!(snapshot = name, %error, "Discarding unreadable snapshot");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(error) => {
            tracing::warn!(snapshot = name, %error, "Snapshot load failed, using empty default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore {
        blobs: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl BlobStore for MapStore {
        fn save(&self, name: &str, data: &[u8]) -> Result<(), BlobStoreError> {
            if let Ok(mut blobs) = self.blobs.lock() {
                blobs.insert(name.to_string(), data.to_vec());
            }
            Ok(())
        }

        fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
            Ok(self
                .blobs
                .lock()
                .ok()
                .and_then(|blobs| blobs.get(name).cloned()))
        }
    }

    struct BrokenStore;

    impl BlobStore for BrokenStore {
        fn save(&self, name: &str, _data: &[u8]) -> Result<(), BlobStoreError> {
            Err(BlobStoreError::Io {
                name: name.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }

        fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
            Err(BlobStoreError::Io {
                name: name.to_string(),
                source: std::io::Error::other("disk gone"),
            })
        }
    }

    #[test]
    #[allow(clippy::expect_used)] // Panics: Test will fail if saving fails
    fn saved_snapshot_loads_back() {
        let store = MapStore::default();
        save(&store, "numbers", &vec![3_u32, 1, 2]).expect("save should succeed");

        let loaded: Vec<u32> = load_or_default(&store, "numbers");
        assert_eq!(loaded, vec![3, 1, 2]);
    }

    #[test]
    fn missing_snapshot_is_empty() {
        let store = MapStore::default();
        let loaded: Vec<String> = load_or_default(&store, "nothing");
        assert!(loaded.is_empty());
    }

    #[test]
    #[allow(clippy::expect_used)] // Panics: Test will fail if saving fails
    fn corrupt_snapshot_is_empty() {
        let store = MapStore::default();
        store.save("names", &[0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01])
            .expect("save should succeed");

        let loaded: Vec<String> = load_or_default(&store, "names");
        assert!(loaded.is_empty());
    }

    #[test]
    fn read_failure_is_empty() {
        let loaded: HashMap<String, u32> = load_or_default(&BrokenStore, "sales");
        assert!(loaded.is_empty());
    }

    #[test]
    fn write_failure_surfaces() {
        let result = save(&BrokenStore, "sales", &0_u32);
        assert!(matches!(result, Err(BlobStoreError::Io { .. })));
    }
}
