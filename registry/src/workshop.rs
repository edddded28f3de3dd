//! Workshop entity: a capacity-bounded roster of attendees.

use crate::types::{AttendeeId, WorkshopId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A workshop with a fixed number of spots.
///
/// The roster keeps attendee ids in reservation order and never grows past
/// `capacity`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workshop {
    /// Workshop identifier (unique across all exhibitions)
    pub id: WorkshopId,
    /// Workshop title
    pub title: String,
    /// Maximum number of attendees
    pub capacity: u32,
    attendees: Vec<AttendeeId>,
}

impl Workshop {
    /// Creates a workshop with an empty roster
    #[must_use]
    pub const fn new(id: WorkshopId, title: String, capacity: u32) -> Self {
        Self {
            id,
            title,
            capacity,
            attendees: Vec::new(),
        }
    }

    /// Attendees currently holding a spot, in reservation order
    #[must_use]
    pub fn attendees(&self) -> &[AttendeeId] {
        &self.attendees
    }

    /// Number of spots taken
    #[must_use]
    pub fn registered(&self) -> usize {
        self.attendees.len()
    }

    /// Whether `attendee_id` holds a spot
    #[must_use]
    pub fn has_attendee(&self, attendee_id: AttendeeId) -> bool {
        self.attendees.contains(&attendee_id)
    }

    /// Takes a spot for `attendee_id`.
    ///
    /// Returns `false` without changing anything if the attendee is already
    /// on the roster or the workshop is full.
    pub fn reserve_spot(&mut self, attendee_id: AttendeeId) -> bool {
        if self.has_attendee(attendee_id) || self.spots_left() == 0 {
            return false;
        }
        self.attendees.push(attendee_id);
        true
    }

    /// Frees the spot held by `attendee_id`; `false` if there was none.
    pub fn cancel_reservation(&mut self, attendee_id: AttendeeId) -> bool {
        let before = self.attendees.len();
        self.attendees.retain(|id| *id != attendee_id);
        self.attendees.len() != before
    }

    /// Keeps only the roster entries accepted by `keep`.
    pub(crate) fn retain_attendees(&mut self, keep: impl FnMut(&AttendeeId) -> bool) {
        self.attendees.retain(keep);
    }

    /// Spots still free
    #[must_use]
    pub fn spots_left(&self) -> u32 {
        let registered = u32::try_from(self.attendees.len()).unwrap_or(u32::MAX);
        self.capacity.saturating_sub(registered)
    }
}

impl fmt::Display for Workshop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Workshop({}) {} [{}/{}]",
            self.id,
            self.title,
            self.attendees.len(),
            self.capacity
        )
    }
}
