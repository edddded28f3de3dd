//! The registry: owner of every collection and enforcer of the rules that
//! span entities.
//!
//! # Commit boundary
//!
//! Each mutating operation validates first, mutates second, and finally
//! calls a private `commit` step exactly once, which writes the four snapshots
//! (`attendees`, `exhibitions`, `passes`, `sales`) to the blob store. A
//! rejected operation returns before touching state and never commits.
//!
//! # Reservations
//!
//! A reservation lives in two places: the workshop roster and the
//! attendee's reservation list. The roster is written first and is the
//! source of truth for capacity; the attendee list follows. Cancellation
//! requires the attendee-side entry and tolerates a roster that is already
//! clean.
//!
//! # Example
//!
//! ```no_run
//! use expopass_core::environment::SystemClock;
//! use expopass_registry::{
//!     Attendee, AttendeeId, FileBlobStore, PassId, Registry, RegistryEnvironment, WorkshopId,
//! };
//! use std::sync::Arc;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = RegistryEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(FileBlobStore::new("storage/data")),
//! );
//! let mut registry = Registry::open(env)?;
//!
//! let alice = AttendeeId::new(1);
//! registry.register_attendee(Attendee::new(
//!     alice,
//!     "Alice Green".to_string(),
//!     "alice@example.com".to_string(),
//!     "00971-555-000".to_string(),
//! ))?;
//! registry.purchase_pass(alice, PassId::new(1))?;
//! registry.reserve_workshop(alice, WorkshopId::new(101))?;
//! # Ok(())
//! # }
//! ```

use crate::attendee::Attendee;
use crate::error::{RegistryError, Result};
use crate::exhibition::Exhibition;
use crate::pass::Pass;
use crate::report::{self, CapacityReportRow, SalesLog};
use crate::sample;
use crate::types::{AttendeeId, ExhibitionId, PassId, WorkshopId};
use crate::workshop::Workshop;
use expopass_core::blob_store::BlobStore;
use expopass_core::environment::Clock;
use expopass_core::snapshot;
use std::sync::Arc;

/// Snapshot holding the attendee list
pub const ATTENDEES_SNAPSHOT: &str = "attendees";
/// Snapshot holding exhibitions and their workshops
pub const EXHIBITIONS_SNAPSHOT: &str = "exhibitions";
/// Snapshot holding the pass catalogue
pub const PASSES_SNAPSHOT: &str = "passes";
/// Snapshot holding the daily sales log
pub const SALES_SNAPSHOT: &str = "sales";

/// Environment dependencies for the registry
#[derive(Clone)]
pub struct RegistryEnvironment {
    /// Clock for dating pass sales
    pub clock: Arc<dyn Clock>,
    /// Where snapshots are persisted
    pub store: Arc<dyn BlobStore>,
}

impl RegistryEnvironment {
    /// Creates a new `RegistryEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn BlobStore>) -> Self {
        Self { clock, store }
    }
}

/// A single field change on an attendee profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileUpdate {
    /// New name (must not be blank)
    Name(String),
    /// New email (must contain `@` and `.`)
    Email(String),
    /// New phone number (at least five characters)
    Phone(String),
}

/// Conference registry: attendees, exhibitions, passes and the sales log.
pub struct Registry {
    env: RegistryEnvironment,
    attendees: Vec<Attendee>,
    exhibitions: Vec<Exhibition>,
    passes: Vec<Pass>,
    sales_log: SalesLog,
}

impl Registry {
    /// Restores the registry from the environment's blob store.
    ///
    /// Missing or unreadable snapshots are replaced by empty collections,
    /// and references left dangling by a lost snapshot are dropped (see
    /// [`Registry::open`] for the variant that also reseeds).
    #[must_use]
    pub fn load(env: RegistryEnvironment) -> Self {
        let mut registry = Self::restore(env);
        registry.reconcile();
        registry
    }

    /// Restores the registry and seeds sample data if it has no exhibitions
    /// or no passes.
    ///
    /// With exhibitions present but the pass catalogue empty, only the sample
    /// passes are restored, so attendees holding one of their ids keep it.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Persistence`] if seeding cannot be saved.
    pub fn open(env: RegistryEnvironment) -> Result<Self> {
        let mut registry = Self::restore(env);
        if registry.exhibitions.is_empty() {
            registry.create_sample_data()?;
        } else if registry.passes.is_empty() {
            registry.passes = sample::passes(&registry.exhibitions);
            tracing::info!(passes = registry.passes.len(), "Sample pass catalogue restored");
            registry.commit()?;
        }
        registry.reconcile();
        Ok(registry)
    }

    fn restore(env: RegistryEnvironment) -> Self {
        let store = env.store.as_ref();
        let attendees: Vec<Attendee> = snapshot::load_or_default(store, ATTENDEES_SNAPSHOT);
        let exhibitions: Vec<Exhibition> = snapshot::load_or_default(store, EXHIBITIONS_SNAPSHOT);
        let passes: Vec<Pass> = snapshot::load_or_default(store, PASSES_SNAPSHOT);
        let sales_log: SalesLog = snapshot::load_or_default(store, SALES_SNAPSHOT);

        tracing::info!(
            attendees = attendees.len(),
            exhibitions = exhibitions.len(),
            passes = passes.len(),
            "Registry loaded"
        );

        Self {
            env,
            attendees,
            exhibitions,
            passes,
            sales_log,
        }
    }

    // ========== Persistence ==========

    /// Writes the full state to the blob store.
    fn commit(&self) -> Result<()> {
        let store = self.env.store.as_ref();
        snapshot::save(store, ATTENDEES_SNAPSHOT, &self.attendees)?;
        snapshot::save(store, EXHIBITIONS_SNAPSHOT, &self.exhibitions)?;
        snapshot::save(store, PASSES_SNAPSHOT, &self.passes)?;
        snapshot::save(store, SALES_SNAPSHOT, &self.sales_log)?;
        Ok(())
    }

    /// Drops ids that point nowhere after a snapshot was lost: pass ids
    /// missing from the catalogue, reservations the roster does not hold,
    /// and roster entries of unknown attendees.
    fn reconcile(&mut self) {
        let passes = &self.passes;
        let exhibitions = &mut self.exhibitions;

        for attendee in &mut self.attendees {
            if let Some(pass_id) = attendee.pass() {
                if !passes.iter().any(|p| p.id == pass_id) {
                    tracing::warn!(attendee_id = %attendee.id, %pass_id, "Dropping unknown pass");
                    attendee.clear_pass();
                }
            }

            let attendee_id = attendee.id;
            attendee.retain_reservations(|workshop_id| {
                let held = exhibitions
                    .iter()
                    .find_map(|e| e.get_workshop_by_id(*workshop_id))
                    .is_some_and(|w| w.has_attendee(attendee_id));
                if !held {
                    tracing::warn!(%attendee_id, %workshop_id, "Dropping reservation missing from roster");
                }
                held
            });
        }

        let attendees = &self.attendees;
        for workshop in exhibitions.iter_mut().flat_map(Exhibition::workshops_mut) {
            let workshop_id = workshop.id;
            workshop.retain_attendees(|attendee_id| {
                attendees
                    .iter()
                    .any(|a| a.id == *attendee_id && a.has_reserved(workshop_id))
            });
        }
    }

    // ========== Read access ==========

    /// All attendees in registration order
    #[must_use]
    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    /// All exhibitions in insertion order
    #[must_use]
    pub fn exhibitions(&self) -> &[Exhibition] {
        &self.exhibitions
    }

    /// The pass catalogue in insertion order
    #[must_use]
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Looks up an attendee by id
    #[must_use]
    pub fn find_attendee_by_id(&self, attendee_id: AttendeeId) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.id == attendee_id)
    }

    /// Looks up an attendee by email, ignoring case
    #[must_use]
    pub fn find_attendee_by_email(&self, email: &str) -> Option<&Attendee> {
        self.attendees.iter().find(|a| a.email_matches(email))
    }

    /// Looks up a pass by id
    #[must_use]
    pub fn find_pass_by_id(&self, pass_id: PassId) -> Option<&Pass> {
        self.passes.iter().find(|p| p.id == pass_id)
    }

    /// The pass held by an attendee, if any
    #[must_use]
    pub fn pass_of(&self, attendee_id: AttendeeId) -> Option<&Pass> {
        let pass_id = self.find_attendee_by_id(attendee_id)?.pass()?;
        self.find_pass_by_id(pass_id)
    }

    /// Looks up an exhibition by id
    #[must_use]
    pub fn find_exhibition_by_id(&self, exhibition_id: ExhibitionId) -> Option<&Exhibition> {
        self.exhibitions.iter().find(|e| e.id == exhibition_id)
    }

    /// Looks up a workshop across all exhibitions
    #[must_use]
    pub fn find_workshop_by_id(&self, workshop_id: WorkshopId) -> Option<&Workshop> {
        self.exhibitions
            .iter()
            .find_map(|e| e.get_workshop_by_id(workshop_id))
    }

    /// The exhibition hosting a workshop
    #[must_use]
    pub fn parent_exhibition_of(&self, workshop_id: WorkshopId) -> Option<&Exhibition> {
        self.exhibitions
            .iter()
            .find(|e| e.contains_workshop(workshop_id))
    }

    /// Titles of an attendee's reserved workshops, in reservation order
    #[must_use]
    pub fn reserved_workshop_titles(&self, attendee_id: AttendeeId) -> Vec<String> {
        let Some(attendee) = self.find_attendee_by_id(attendee_id) else {
            return Vec::new();
        };
        attendee
            .reservations()
            .iter()
            .filter_map(|id| self.find_workshop_by_id(*id))
            .map(|w| w.title.clone())
            .collect()
    }

    fn attendee_index(&self, attendee_id: AttendeeId) -> Result<usize> {
        self.attendees
            .iter()
            .position(|a| a.id == attendee_id)
            .ok_or(RegistryError::AttendeeNotFound(attendee_id))
    }

    fn pass_index(&self, pass_id: PassId) -> Result<usize> {
        self.passes
            .iter()
            .position(|p| p.id == pass_id)
            .ok_or(RegistryError::PassNotFound(pass_id))
    }

    fn parent_index(&self, workshop_id: WorkshopId) -> Result<usize> {
        self.exhibitions
            .iter()
            .position(|e| e.contains_workshop(workshop_id))
            .ok_or(RegistryError::OrphanWorkshop { workshop_id })
    }

    fn check_workshop_free(&self, workshop_id: WorkshopId) -> Result<()> {
        if self.find_workshop_by_id(workshop_id).is_some() {
            return Err(RegistryError::DuplicateWorkshop { workshop_id });
        }
        Ok(())
    }

    // ========== Attendees ==========

    /// Registers a new attendee.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateAttendee`] if the id is taken
    /// - [`RegistryError::DuplicateEmail`] if the email is taken
    ///   (case-insensitively)
    pub fn register_attendee(&mut self, attendee: Attendee) -> Result<()> {
        if self.find_attendee_by_id(attendee.id).is_some() {
            return Err(RegistryError::DuplicateAttendee {
                attendee_id: attendee.id,
            });
        }
        if self.find_attendee_by_email(attendee.email()).is_some() {
            return Err(RegistryError::DuplicateEmail {
                email: attendee.email().to_string(),
            });
        }

        tracing::debug!(attendee_id = %attendee.id, "Attendee registered");
        self.attendees.push(attendee);
        self.commit()
    }

    /// Changes one profile field of an attendee.
    ///
    /// Email uniqueness is not re-checked.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AttendeeNotFound`] for an unknown attendee and
    /// [`RegistryError::Validation`] for a malformed value.
    pub fn update_profile(&mut self, attendee_id: AttendeeId, update: ProfileUpdate) -> Result<()> {
        let index = self.attendee_index(attendee_id)?;
        let attendee = &mut self.attendees[index];

        match update {
            ProfileUpdate::Name(name) => attendee.update_name(name)?,
            ProfileUpdate::Email(email) => attendee.update_email(email)?,
            ProfileUpdate::Phone(phone) => attendee.update_phone(phone)?,
        }

        tracing::debug!(%attendee_id, "Attendee profile updated");
        self.commit()
    }

    // ========== Passes ==========

    /// Adds a pass to the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Persistence`] if the change cannot be saved.
    pub fn add_pass(&mut self, pass: Pass) -> Result<()> {
        tracing::debug!(pass_id = %pass.id, "Pass added");
        self.passes.push(pass);
        self.commit()
    }

    /// Sells `pass_id` to an attendee and records the sale under today's date.
    ///
    /// An all-access pass has its access set replaced by every exhibition
    /// known right now.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AttendeeNotFound`] / [`RegistryError::PassNotFound`] for unknown ids
    /// - [`RegistryError::AlreadyHasPass`] if the attendee already bought one
    pub fn purchase_pass(&mut self, attendee_id: AttendeeId, pass_id: PassId) -> Result<()> {
        let attendee_index = self.attendee_index(attendee_id)?;
        if self.attendees[attendee_index].has_pass() {
            return Err(RegistryError::AlreadyHasPass { attendee_id });
        }
        let pass_index = self.pass_index(pass_id)?;

        self.attendees[attendee_index].assign_pass(pass_id);

        let pass = &mut self.passes[pass_index];
        if pass.is_all_access() {
            pass.grant_all(self.exhibitions.iter().map(|e| e.id));
        }

        let today = self.env.clock.now().date_naive();
        *self.sales_log.entry(today).or_insert(0) += 1;

        tracing::debug!(%attendee_id, %pass_id, %today, "Pass purchased");
        self.commit()
    }

    /// Extends the attendee's pass with more exhibitions.
    ///
    /// Exhibitions already granted are skipped. The pass is a catalogue
    /// entry, so every holder of the same pass sees the extension.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AttendeeNotFound`] for an unknown attendee
    /// - [`RegistryError::NoPass`] if the attendee has no pass
    pub fn upgrade_pass(
        &mut self,
        attendee_id: AttendeeId,
        exhibition_ids: &[ExhibitionId],
    ) -> Result<()> {
        let attendee_index = self.attendee_index(attendee_id)?;
        let Some(pass_id) = self.attendees[attendee_index].pass() else {
            return Err(RegistryError::NoPass { attendee_id });
        };
        let pass_index = self.pass_index(pass_id)?;

        let pass = &mut self.passes[pass_index];
        for exhibition_id in exhibition_ids {
            pass.add_exhibition(*exhibition_id);
        }

        tracing::debug!(%attendee_id, %pass_id, added = exhibition_ids.len(), "Pass upgraded");
        self.commit()
    }

    // ========== Exhibitions & Workshops ==========

    /// Adds an exhibition together with its workshops.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateExhibition`] if the id is taken
    /// - [`RegistryError::DuplicateWorkshop`] if one of its workshops already
    ///   belongs to another exhibition
    pub fn add_exhibition(&mut self, exhibition: Exhibition) -> Result<()> {
        if self.find_exhibition_by_id(exhibition.id).is_some() {
            return Err(RegistryError::DuplicateExhibition {
                exhibition_id: exhibition.id,
            });
        }
        for workshop in exhibition.workshops() {
            self.check_workshop_free(workshop.id)?;
        }

        tracing::debug!(exhibition_id = %exhibition.id, workshops = exhibition.workshops().len(), "Exhibition added");
        self.exhibitions.push(exhibition);
        self.commit()
    }

    /// Attaches a new workshop to an existing exhibition.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::ExhibitionNotFound`] for an unknown exhibition
    /// - [`RegistryError::DuplicateWorkshop`] if the workshop id is taken
    pub fn add_workshop(&mut self, exhibition_id: ExhibitionId, workshop: Workshop) -> Result<()> {
        let index = self
            .exhibitions
            .iter()
            .position(|e| e.id == exhibition_id)
            .ok_or(RegistryError::ExhibitionNotFound(exhibition_id))?;
        self.check_workshop_free(workshop.id)?;

        tracing::debug!(%exhibition_id, workshop_id = %workshop.id, "Workshop added");
        self.exhibitions[index].add_workshop(workshop);
        self.commit()
    }

    // ========== Reservations ==========

    /// Reserves a workshop spot for an attendee.
    ///
    /// Checks run in order and stop at the first failure:
    ///
    /// 1. the attendee holds a pass
    /// 2. the workshop belongs to some exhibition
    /// 3. the pass grants that exhibition
    /// 4. the workshop has a free spot and the attendee is not on its roster
    ///
    /// # Errors
    ///
    /// [`RegistryError::PassRequired`], [`RegistryError::OrphanWorkshop`],
    /// [`RegistryError::AccessDenied`] or [`RegistryError::CapacityOrDuplicate`]
    /// for the checks above; [`RegistryError::AttendeeNotFound`] for an
    /// unknown attendee.
    pub fn reserve_workshop(&mut self, attendee_id: AttendeeId, workshop_id: WorkshopId) -> Result<()> {
        let attendee_index = self.attendee_index(attendee_id)?;
        let Some(pass_id) = self.attendees[attendee_index].pass() else {
            return Err(RegistryError::PassRequired { attendee_id });
        };

        let exhibition_index = self.parent_index(workshop_id)?;
        let exhibition_id = self.exhibitions[exhibition_index].id;

        let pass = &self.passes[self.pass_index(pass_id)?];
        if !pass.allows_exhibition(exhibition_id) {
            return Err(RegistryError::AccessDenied {
                attendee_id,
                exhibition_id,
            });
        }

        let Some(workshop) = self.exhibitions[exhibition_index].get_workshop_by_id_mut(workshop_id)
        else {
            return Err(RegistryError::OrphanWorkshop { workshop_id });
        };
        if !workshop.reserve_spot(attendee_id) {
            return Err(RegistryError::CapacityOrDuplicate { workshop_id });
        }

        if let Err(error) = self.attendees[attendee_index].reserve_workshop(workshop_id) {
            workshop.cancel_reservation(attendee_id);
            return Err(error);
        }

        tracing::debug!(%attendee_id, %workshop_id, spots_left = workshop.spots_left(), "Workshop reserved");
        self.commit()
    }

    /// Cancels an attendee's reservation, freeing the workshop spot.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AttendeeNotFound`] for an unknown attendee
    /// - [`RegistryError::OrphanWorkshop`] if no exhibition hosts the workshop
    /// - [`RegistryError::NotReserved`] if the attendee never reserved it;
    ///   nothing is changed
    pub fn cancel_reservation(&mut self, attendee_id: AttendeeId, workshop_id: WorkshopId) -> Result<()> {
        let attendee_index = self.attendee_index(attendee_id)?;
        let exhibition_index = self.parent_index(workshop_id)?;

        let Some(workshop) = self.exhibitions[exhibition_index].get_workshop_by_id_mut(workshop_id)
        else {
            return Err(RegistryError::OrphanWorkshop { workshop_id });
        };
        self.attendees[attendee_index].cancel_reservation(workshop)?;

        tracing::debug!(%attendee_id, %workshop_id, "Reservation cancelled");
        self.commit()
    }

    // ========== Reports ==========

    /// Fill level of every workshop, exhibition by exhibition
    #[must_use]
    pub fn workshop_capacity_report(&self) -> Vec<CapacityReportRow> {
        report::capacity_report(&self.exhibitions)
    }

    /// Copy of the passes-sold-per-day log
    #[must_use]
    pub fn daily_sales(&self) -> SalesLog {
        self.sales_log.clone()
    }

    // ========== Seeding ==========

    /// Seeds three exhibitions, five workshops and three passes.
    ///
    /// Does nothing if any exhibition exists. Otherwise the exhibitions and
    /// the pass catalogue are replaced by the sample content.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Persistence`] if the seed cannot be saved.
    pub fn create_sample_data(&mut self) -> Result<()> {
        if !self.exhibitions.is_empty() {
            return Ok(());
        }

        self.exhibitions = sample::exhibitions();
        self.passes = sample::passes(&self.exhibitions);

        tracing::info!(
            exhibitions = self.exhibitions.len(),
            passes = self.passes.len(),
            "Sample data created"
        );
        self.commit()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("attendees", &self.attendees.len())
            .field("exhibitions", &self.exhibitions.len())
            .field("passes", &self.passes.len())
            .field("sales_log", &self.sales_log)
            .finish_non_exhaustive()
    }
}
