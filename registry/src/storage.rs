//! File-backed blob store: one file per snapshot name.

use expopass_core::blob_store::{BlobStore, BlobStoreError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each blob as `<dir>/<name>.bin`.
///
/// The directory is created on the first save. Writes go to a temporary
/// file that is then renamed over the previous blob.
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Creates a store rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the blobs
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.bin"))
    }

    fn io_error(name: &str, source: std::io::Error) -> BlobStoreError {
        BlobStoreError::Io {
            name: name.to_string(),
            source,
        }
    }
}

impl BlobStore for FileBlobStore {
    fn save(&self, name: &str, data: &[u8]) -> Result<(), BlobStoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| Self::io_error(name, e))?;

        let path = self.path_for(name);
        let staging = path.with_extension("bin.tmp");
        fs::write(&staging, data).map_err(|e| Self::io_error(name, e))?;
        fs::rename(&staging, &path).map_err(|e| Self::io_error(name, e))?;

        tracing::trace!(blob = name, bytes = data.len(), path = %path.display(), "Blob saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BlobStoreError> {
        match fs::read(self.path_for(name)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(name, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn missing_blob_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path());

        assert_eq!(store.load("attendees").unwrap(), None);
    }

    #[test]
    fn save_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBlobStore::new(dir.path().join("nested").join("data"));

        store.save("passes", &[1, 2, 3]).unwrap();
        store.save("passes", &[4, 5]).unwrap();

        assert_eq!(store.load("passes").unwrap(), Some(vec![4, 5]));
        assert!(store.dir().join("passes.bin").exists());
        assert!(!store.dir().join("passes.bin.tmp").exists());
    }
}
