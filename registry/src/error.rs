//! Error types for registry operations.
//!
//! Every variant except [`RegistryError::Persistence`] is a rejection of an
//! invalid request, not a system fault: the registry state is unchanged when
//! one is returned.

use crate::types::{AttendeeId, ExhibitionId, PassId, WorkshopId};
use expopass_core::blob_store::BlobStoreError;
use thiserror::Error;

/// Errors returned by [`Registry`](crate::Registry) operations.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Another attendee already uses this email (compared case-insensitively).
    #[error("Email already registered: {email}")]
    DuplicateEmail {
        /// The rejected email address.
        email: String,
    },

    /// An attendee with this id is already registered.
    #[error("Attendee with ID {attendee_id} already exists")]
    DuplicateAttendee {
        /// The rejected attendee id.
        attendee_id: AttendeeId,
    },

    /// An exhibition with this id already exists.
    #[error("Exhibition with ID {exhibition_id} already exists")]
    DuplicateExhibition {
        /// The rejected exhibition id.
        exhibition_id: ExhibitionId,
    },

    /// A workshop with this id already exists in some exhibition.
    #[error("Workshop with ID {workshop_id} already exists")]
    DuplicateWorkshop {
        /// The rejected workshop id.
        workshop_id: WorkshopId,
    },

    /// The attendee already purchased a pass.
    #[error("Attendee {attendee_id} has already purchased a pass")]
    AlreadyHasPass {
        /// The attendee holding a pass.
        attendee_id: AttendeeId,
    },

    /// The attendee has no pass to upgrade.
    #[error("Attendee {attendee_id} has no pass to upgrade")]
    NoPass {
        /// The attendee without a pass.
        attendee_id: AttendeeId,
    },

    /// A pass is required before reserving workshops.
    #[error("Attendee {attendee_id} must purchase a pass before reserving workshops")]
    PassRequired {
        /// The attendee without a pass.
        attendee_id: AttendeeId,
    },

    /// The attendee's pass does not include the workshop's exhibition.
    #[error("Pass of attendee {attendee_id} does not include exhibition {exhibition_id}")]
    AccessDenied {
        /// The attendee being refused.
        attendee_id: AttendeeId,
        /// The exhibition the pass lacks.
        exhibition_id: ExhibitionId,
    },

    /// The workshop is not attached to any known exhibition.
    #[error("Workshop {workshop_id} is not attached to any exhibition")]
    OrphanWorkshop {
        /// The unattached workshop.
        workshop_id: WorkshopId,
    },

    /// The workshop is full or the attendee already holds a spot in it.
    #[error("Workshop {workshop_id} is full or attendee already reserved")]
    CapacityOrDuplicate {
        /// The workshop that refused the reservation.
        workshop_id: WorkshopId,
    },

    /// The attendee has not reserved this workshop.
    #[error("Attendee {attendee_id} has not reserved workshop {workshop_id}")]
    NotReserved {
        /// The attendee cancelling.
        attendee_id: AttendeeId,
        /// The workshop missing from the attendee's reservations.
        workshop_id: WorkshopId,
    },

    /// A profile field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No attendee with this id is registered.
    #[error("Attendee {0} not found")]
    AttendeeNotFound(AttendeeId),

    /// No pass with this id is on sale.
    #[error("Pass {0} not found")]
    PassNotFound(PassId),

    /// No exhibition with this id exists.
    #[error("Exhibition {0} not found")]
    ExhibitionNotFound(ExhibitionId),

    /// Saving the registry snapshot failed after the change was applied.
    #[error("Persistence error: {0}")]
    Persistence(#[from] BlobStoreError),
}

/// Profile field validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is empty or whitespace only.
    #[error("Name cannot be empty")]
    EmptyName,

    /// Email lacks an `@` or a `.`.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Phone number shorter than five characters.
    #[error("Phone number too short: {length} characters")]
    PhoneTooShort {
        /// Length of the rejected number.
        length: usize,
    },
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
