//! Attendee entity: identity, at most one pass, and workshop reservations.
//!
//! The attendee stores ids only. The pass lives in the registry's pass
//! catalogue and workshops live inside their exhibitions; the registry is
//! what keeps both sides of a reservation in agreement.

use crate::error::{RegistryError, Result, ValidationError};
use crate::types::{AttendeeId, PassId, WorkshopId};
use crate::workshop::Workshop;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum accepted phone number length
pub const MIN_PHONE_LENGTH: usize = 5;

/// A registered conference attendee.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendee {
    /// Attendee identifier
    pub id: AttendeeId,
    name: String,
    email: String,
    phone: String,
    pass: Option<PassId>,
    reservations: Vec<WorkshopId>,
}

impl Attendee {
    /// Creates an attendee with no pass and no reservations
    #[must_use]
    pub const fn new(id: AttendeeId, name: String, email: String, phone: String) -> Self {
        Self {
            id,
            name,
            email,
            phone,
            pass: None,
            reservations: Vec::new(),
        }
    }

    /// Full name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Phone number
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The purchased pass, if any
    #[must_use]
    pub const fn pass(&self) -> Option<PassId> {
        self.pass
    }

    /// Whether a pass has been purchased
    #[must_use]
    pub const fn has_pass(&self) -> bool {
        self.pass.is_some()
    }

    /// Reserved workshops in reservation order
    #[must_use]
    pub fn reservations(&self) -> &[WorkshopId] {
        &self.reservations
    }

    /// Whether `workshop_id` is among the reservations
    #[must_use]
    pub fn has_reserved(&self, workshop_id: WorkshopId) -> bool {
        self.reservations.contains(&workshop_id)
    }

    /// Email compared case-insensitively
    #[must_use]
    pub fn email_matches(&self, email: &str) -> bool {
        self.email.to_lowercase() == email.to_lowercase()
    }

    /// Sets the name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyName`] if `name` is blank.
    pub fn update_name(&mut self, name: String) -> std::result::Result<(), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    /// Sets the email. Uniqueness is not re-checked here.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] if `email` lacks `@` or `.`.
    pub fn update_email(&mut self, email: String) -> std::result::Result<(), ValidationError> {
        if !email.contains('@') || !email.contains('.') {
            return Err(ValidationError::InvalidEmail(email));
        }
        self.email = email;
        Ok(())
    }

    /// Sets the phone number.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::PhoneTooShort`] for fewer than
    /// [`MIN_PHONE_LENGTH`] characters.
    pub fn update_phone(&mut self, phone: String) -> std::result::Result<(), ValidationError> {
        let length = phone.chars().count();
        if length < MIN_PHONE_LENGTH {
            return Err(ValidationError::PhoneTooShort { length });
        }
        self.phone = phone;
        Ok(())
    }

    /// Records the pass. The registry enforces the one-pass rule.
    pub(crate) const fn assign_pass(&mut self, pass_id: PassId) {
        self.pass = Some(pass_id);
    }

    /// Drops a pass id that no longer resolves to a catalogue entry.
    pub(crate) const fn clear_pass(&mut self) {
        self.pass = None;
    }

    /// Keeps only the reservations accepted by `keep`.
    pub(crate) fn retain_reservations(&mut self, keep: impl FnMut(&WorkshopId) -> bool) {
        self.reservations.retain(keep);
    }

    /// Appends `workshop_id` to the reservations.
    ///
    /// This is only the attendee half of a reservation; the workshop roster
    /// must be updated first by the registry.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::CapacityOrDuplicate`] if already reserved.
    pub fn reserve_workshop(&mut self, workshop_id: WorkshopId) -> Result<()> {
        if self.has_reserved(workshop_id) {
            return Err(RegistryError::CapacityOrDuplicate { workshop_id });
        }
        self.reservations.push(workshop_id);
        Ok(())
    }

    /// Drops the reservation for `workshop` and frees this attendee's spot
    /// on its roster (if still held).
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotReserved`] if the workshop is not among
    /// the reservations; nothing is changed in that case.
    pub fn cancel_reservation(&mut self, workshop: &mut Workshop) -> Result<()> {
        let Some(index) = self.reservations.iter().position(|id| *id == workshop.id) else {
            return Err(RegistryError::NotReserved {
                attendee_id: self.id,
                workshop_id: workshop.id,
            });
        };
        self.reservations.remove(index);
        workshop.cancel_reservation(self.id);
        Ok(())
    }
}

impl fmt::Display for Attendee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.id, self.name, self.email)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn alice() -> Attendee {
        Attendee::new(
            AttendeeId::new(1),
            "Alice Green".to_string(),
            "alice@example.com".to_string(),
            "00971-555-000".to_string(),
        )
    }

    #[test]
    fn update_name_rejects_blank() {
        let mut a = alice();

        assert_eq!(a.update_name("   ".to_string()), Err(ValidationError::EmptyName));
        assert_eq!(a.name(), "Alice Green");

        assert!(a.update_name("Alice Blue".to_string()).is_ok());
        assert_eq!(a.name(), "Alice Blue");
    }

    #[test]
    fn update_email_requires_at_and_dot() {
        let mut a = alice();

        assert!(matches!(
            a.update_email("alice.example.com".to_string()),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(matches!(
            a.update_email("alice@example".to_string()),
            Err(ValidationError::InvalidEmail(_))
        ));
        assert!(a.update_email("ALICE@example.org".to_string()).is_ok());
        assert!(a.email_matches("alice@EXAMPLE.org"));
    }

    #[test]
    fn update_phone_minimum_length() {
        let mut a = alice();

        assert_eq!(
            a.update_phone("1234".to_string()),
            Err(ValidationError::PhoneTooShort { length: 4 })
        );
        assert!(a.update_phone("12345".to_string()).is_ok());
        assert_eq!(a.phone(), "12345");
    }

    #[test]
    fn reserve_twice_is_rejected() {
        let mut a = alice();
        let id = WorkshopId::new(101);

        assert!(a.reserve_workshop(id).is_ok());
        assert!(matches!(
            a.reserve_workshop(id),
            Err(RegistryError::CapacityOrDuplicate { .. })
        ));
        assert_eq!(a.reservations(), &[id]);
    }

    #[test]
    fn cancel_clears_both_sides() {
        let mut a = alice();
        let mut w = Workshop::new(WorkshopId::new(101), "Signals".to_string(), 3);
        w.reserve_spot(a.id);
        a.reserve_workshop(w.id).unwrap();

        a.cancel_reservation(&mut w).unwrap();

        assert!(a.reservations().is_empty());
        assert!(!w.has_attendee(a.id));
    }

    #[test]
    fn cancel_tolerates_cleared_roster() {
        let mut a = alice();
        let mut w = Workshop::new(WorkshopId::new(101), "Signals".to_string(), 3);
        a.reserve_workshop(w.id).unwrap();

        assert!(a.cancel_reservation(&mut w).is_ok());
        assert!(a.reservations().is_empty());
    }

    #[test]
    fn cancel_without_reservation_fails() {
        let mut a = alice();
        let mut w = Workshop::new(WorkshopId::new(101), "Signals".to_string(), 3);

        assert!(matches!(
            a.cancel_reservation(&mut w),
            Err(RegistryError::NotReserved { .. })
        ));
    }

    #[test]
    fn display() {
        assert_eq!(alice().to_string(), "1 - Alice Green (alice@example.com)");
        assert!(!alice().has_pass());
    }
}
