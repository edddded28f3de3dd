//! Blob store trait for name-keyed snapshot persistence.
//!
//! The registry treats persistence as an opaque key-value store: each named
//! collection is written as one blob and read back as one blob. The store
//! knows nothing about what the bytes mean.
//!
//! # Implementations
//!
//! - `FileBlobStore` (in `expopass-registry`): one file per name in a data directory
//! - `InMemoryBlobStore` (in `expopass-testing`): fast, deterministic testing
//!
//! # Example
//!
//! ```no_run
//! use expopass_core::blob_store::{BlobStore, BlobStoreError};
//!
//! fn copy_blob(from: &dyn BlobStore, to: &dyn BlobStore, name: &str) -> Result<(), BlobStoreError> {
//!     if let Some(bytes) = from.load(name)? {
//!         to.save(name, &bytes)?;
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Errors that can occur during blob store operations.
#[derive(Error, Debug)]
pub enum BlobStoreError {
    /// Reading or writing the underlying medium failed.
    #[error("I/O error on blob '{name}': {source}")]
    Io {
        /// Name of the blob being accessed.
        name: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error on blob '{name}': {message}")]
    Serialization {
        /// Name of the blob being encoded or decoded.
        name: String,
        /// Description of the codec failure.
        message: String,
    },
}

/// Name-keyed storage of opaque snapshots.
///
/// `save` replaces whatever was stored under `name`; `load` returns the most
/// recently saved bytes, or `None` if nothing was ever saved under that name.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a store can be shared through an
/// `Arc<dyn BlobStore>` in the registry environment.
pub trait BlobStore: Send + Sync {
    /// Persist `data` under `name`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] if the backing medium cannot be written.
    fn save(&self, name: &str, data: &[u8]) -> Result<(), BlobStoreError>;

    /// Load the blob stored under `name`.
    ///
    /// Returns `Ok(None)` when no blob exists for that name.
    ///
    /// # Errors
    ///
    /// Returns [`BlobStoreError::Io`] if the backing medium cannot be read.
    fn load(&self, name: &str) -> Result<Option<Vec<u8>>, BlobStoreError>;
}
