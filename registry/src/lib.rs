//! Conference registry for attendees, exhibitions, workshops and passes.
//!
//! The registry is a small in-memory rule engine with snapshot persistence.
//! It demonstrates:
//!
//! - Entities that hold ids instead of references (attendees point at
//!   passes and workshops by id; the registry owns every entity)
//! - Validation before mutation, with distinguishable error values
//! - An explicit commit step that persists the full state after every
//!   accepted operation
//! - Dependency injection of the clock and the blob store
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────┐
//! │  Presentation (demo)  │
//! └──────────┬────────────┘
//!            │ register / purchase / reserve / cancel / reports
//!            ▼
//! ┌───────────────────────┐      commit()       ┌──────────────────┐
//! │       Registry        │ ──────────────────► │    BlobStore     │
//! │  attendees  passes    │  4 named snapshots  │ (file / memory)  │
//! │  exhibitions  sales   │ ◄────────────────── │                  │
//! └───────────────────────┘      load()         └──────────────────┘
//!            │ owns
//!            ▼
//!   Exhibition ──► Workshop (roster of AttendeeId)
//!   Attendee   ──► PassId, [WorkshopId]
//! ```
//!
//! # Quick Start
//!
//! ```no_run
//! use expopass_core::environment::SystemClock;
//! use expopass_registry::{FileBlobStore, Registry, RegistryEnvironment};
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = RegistryEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(FileBlobStore::new("storage/data")),
//! );
//! let registry = Registry::open(env)?;
//!
//! for row in registry.workshop_capacity_report() {
//!     println!("{}: {}/{}", row.workshop_title, row.registered, row.capacity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod attendee;
pub mod config;
pub mod error;
pub mod exhibition;
pub mod pass;
pub mod registry;
pub mod report;
pub mod sample;
pub mod storage;
pub mod types;
pub mod workshop;

// Re-export commonly used types
pub use attendee::Attendee;
pub use config::Config;
pub use error::{RegistryError, Result, ValidationError};
pub use exhibition::Exhibition;
pub use pass::{Pass, PassKind};
pub use registry::{ProfileUpdate, Registry, RegistryEnvironment};
pub use report::{CapacityReportRow, SalesLog};
pub use storage::FileBlobStore;
pub use types::{AttendeeId, ExhibitionId, Money, PassId, WorkshopId};
pub use workshop::Workshop;
