//! # Expopass Testing
//!
//! Testing utilities and helpers for the Expopass conference registry.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - An in-memory blob store that can be inspected and corrupted
//! - Tracing setup for tests
//!
//! ## Example
//!
//! ```ignore
//! use expopass_testing::{InMemoryBlobStore, test_clock};
//! use expopass_registry::{Registry, RegistryEnvironment};
//! use std::sync::Arc;
//!
//! #[test]
//! fn seeds_sample_data() {
//!     let env = RegistryEnvironment::new(Arc::new(test_clock()), Arc::new(InMemoryBlobStore::new()));
//!     let registry = Registry::open(env).unwrap();
//!     assert_eq!(registry.exhibitions().len(), 3);
//! }
//! ```

use chrono::{DateTime, Utc};
use expopass_core::environment::Clock;

mod blob_store_mocks;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    pub use crate::blob_store_mocks::InMemoryBlobStore;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use expopass_testing::mocks::FixedClock;
    /// use expopass_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Test helpers and utilities
pub mod helpers {
    /// Install a `tracing` subscriber that writes through the test harness.
    ///
    /// Safe to call from every test; only the first call installs anything.
    /// Honours `RUST_LOG`, defaulting to `debug`.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

// Re-export commonly used items
pub use helpers::init_test_tracing;
pub use mocks::{FixedClock, InMemoryBlobStore, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_clock_date() {
        let clock = test_clock();
        assert_eq!(clock.now().date_naive().to_string(), "2025-01-01");
    }
}
