//! Exhibition entity: owns an ordered collection of workshops.

use crate::types::{ExhibitionId, WorkshopId};
use crate::workshop::Workshop;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An exhibition and the workshops it hosts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exhibition {
    /// Exhibition identifier
    pub id: ExhibitionId,
    /// Display name
    pub name: String,
    /// Short description
    pub description: String,
    workshops: Vec<Workshop>,
}

impl Exhibition {
    /// Creates an exhibition without workshops
    #[must_use]
    pub const fn new(id: ExhibitionId, name: String, description: String) -> Self {
        Self {
            id,
            name,
            description,
            workshops: Vec::new(),
        }
    }

    /// Adds a workshop, builder style
    #[must_use]
    pub fn with_workshop(mut self, workshop: Workshop) -> Self {
        self.add_workshop(workshop);
        self
    }

    /// Workshops in insertion order
    #[must_use]
    pub fn workshops(&self) -> &[Workshop] {
        &self.workshops
    }

    pub(crate) fn workshops_mut(&mut self) -> &mut [Workshop] {
        &mut self.workshops
    }

    /// Appends `workshop` unless one with the same id is already present.
    pub fn add_workshop(&mut self, workshop: Workshop) {
        if self.contains_workshop(workshop.id) {
            return;
        }
        self.workshops.push(workshop);
    }

    /// Removes and returns the workshop with `workshop_id`, if present.
    pub fn remove_workshop(&mut self, workshop_id: WorkshopId) -> Option<Workshop> {
        let index = self.workshops.iter().position(|w| w.id == workshop_id)?;
        Some(self.workshops.remove(index))
    }

    /// Whether a workshop with `workshop_id` belongs to this exhibition
    #[must_use]
    pub fn contains_workshop(&self, workshop_id: WorkshopId) -> bool {
        self.workshops.iter().any(|w| w.id == workshop_id)
    }

    /// Looks up a workshop by id
    #[must_use]
    pub fn get_workshop_by_id(&self, workshop_id: WorkshopId) -> Option<&Workshop> {
        self.workshops.iter().find(|w| w.id == workshop_id)
    }

    /// Looks up a workshop by id for mutation
    pub fn get_workshop_by_id_mut(&mut self, workshop_id: WorkshopId) -> Option<&mut Workshop> {
        self.workshops.iter_mut().find(|w| w.id == workshop_id)
    }
}

impl fmt::Display for Exhibition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exhibition({}) {} - {} workshops",
            self.id,
            self.name,
            self.workshops.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exhibition() -> Exhibition {
        Exhibition::new(
            ExhibitionId::new(1),
            "Sustainable Transportation".to_string(),
            "Innovations in urban mobility".to_string(),
        )
    }

    fn workshop(id: u32) -> Workshop {
        Workshop::new(WorkshopId::new(id), format!("Workshop {id}"), 3)
    }

    #[test]
    fn add_workshop_keeps_order_and_uniqueness() {
        let mut ex = exhibition();
        ex.add_workshop(workshop(102));
        ex.add_workshop(workshop(101));
        ex.add_workshop(workshop(102));

        let ids: Vec<u32> = ex.workshops().iter().map(|w| w.id.value()).collect();
        assert_eq!(ids, vec![102, 101]);
    }

    #[test]
    fn remove_workshop_tolerates_absent() {
        let mut ex = exhibition().with_workshop(workshop(101));

        assert!(ex.remove_workshop(WorkshopId::new(999)).is_none());
        assert!(ex.remove_workshop(WorkshopId::new(101)).is_some());
        assert!(ex.workshops().is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let ex = exhibition().with_workshop(workshop(101));

        assert!(ex.get_workshop_by_id(WorkshopId::new(101)).is_some());
        assert!(ex.get_workshop_by_id(WorkshopId::new(102)).is_none());
        assert_eq!(ex.to_string(), "Exhibition(1) Sustainable Transportation - 1 workshops");
    }
}
