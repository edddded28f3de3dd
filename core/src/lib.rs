//! # Expopass Core
//!
//! Core traits and types shared by the Expopass conference registry.
//!
//! This crate provides the abstractions the registry depends on without
//! knowing how they are backed:
//!
//! - **Environment**: injected dependencies such as the [`environment::Clock`]
//! - **Blob Store**: name-keyed storage of opaque snapshots ([`blob_store::BlobStore`])
//! - **Snapshot codec**: bincode encoding plus the "empty default on failure"
//!   load rule ([`snapshot`])
//!
//! ## Example
//!
//! ```ignore
//! use expopass_core::blob_store::BlobStore;
//! use expopass_core::snapshot;
//!
//! fn restore(store: &dyn BlobStore) -> Vec<Attendee> {
//!     // Missing or corrupt snapshots come back as an empty Vec
//!     snapshot::load_or_default(store, "attendees")
//! }
//! ```

pub mod blob_store;
pub mod snapshot;

/// Environment module - Dependency injection traits
///
/// All external dependencies of the registry are abstracted behind traits
/// and injected through its environment, so tests can substitute
/// deterministic implementations.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use expopass_core::environment::{Clock, SystemClock};
    ///
    /// let clock = SystemClock;
    /// let today = clock.now().date_naive();
    /// assert!(today.to_string().len() == 10);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
