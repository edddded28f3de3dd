//! Property tests for reservation invariants.
//!
//! Random sequences of reserve and cancel calls must never overfill a
//! workshop, and the workshop rosters must always agree with the
//! attendees' reservation lists.
//!
//! Run with: `cargo test --test reservation_properties_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use expopass_registry::{
    Attendee, AttendeeId, Exhibition, ExhibitionId, Money, Pass, PassId, Registry,
    RegistryEnvironment, RegistryError, Workshop, WorkshopId,
};
use expopass_testing::{InMemoryBlobStore, test_clock};
use proptest::prelude::*;
use std::sync::Arc;

const ATTENDEES: u32 = 5;

#[derive(Clone, Debug)]
enum Op {
    Reserve { attendee: u32, workshop: u32 },
    Cancel { attendee: u32, workshop: u32 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let attendee = 1..=ATTENDEES;
    let workshop = 0..3_u32;
    prop_oneof![
        (attendee.clone(), workshop.clone())
            .prop_map(|(attendee, workshop)| Op::Reserve { attendee, workshop }),
        (attendee, workshop).prop_map(|(attendee, workshop)| Op::Cancel { attendee, workshop }),
    ]
}

/// Two exhibitions, three workshops with the given capacities, and five
/// attendees. Attendee 5 only has access to exhibition 1.
fn build_registry(capacities: &[u32; 3]) -> Registry {
    let env = RegistryEnvironment::new(Arc::new(test_clock()), Arc::new(InMemoryBlobStore::new()));
    let mut registry = Registry::load(env);

    let e1 = ExhibitionId::new(1);
    let e2 = ExhibitionId::new(2);
    registry
        .add_exhibition(
            Exhibition::new(e1, "One".to_string(), String::new())
                .with_workshop(Workshop::new(WorkshopId::new(0), "A".to_string(), capacities[0]))
                .with_workshop(Workshop::new(WorkshopId::new(1), "B".to_string(), capacities[1])),
        )
        .unwrap();
    registry
        .add_exhibition(
            Exhibition::new(e2, "Two".to_string(), String::new())
                .with_workshop(Workshop::new(WorkshopId::new(2), "C".to_string(), capacities[2])),
        )
        .unwrap();
    registry
        .add_pass(Pass::fixed_access(PassId::new(1), Money::from_dollars(45), [e1, e2]))
        .unwrap();
    registry
        .add_pass(Pass::fixed_access(PassId::new(2), Money::from_dollars(30), [e1]))
        .unwrap();

    for id in 1..=ATTENDEES {
        let attendee_id = AttendeeId::new(id);
        registry
            .register_attendee(Attendee::new(
                attendee_id,
                format!("Attendee {id}"),
                format!("attendee{id}@example.com"),
                "555-0100".to_string(),
            ))
            .unwrap();
        let pass = if id == ATTENDEES { PassId::new(2) } else { PassId::new(1) };
        registry.purchase_pass(attendee_id, pass).unwrap();
    }
    registry
}

fn check_invariants(registry: &Registry) -> Result<(), TestCaseError> {
    for exhibition in registry.exhibitions() {
        for workshop in exhibition.workshops() {
            let roster = workshop.attendees();
            prop_assert!(roster.len() <= workshop.capacity as usize);

            let mut unique = roster.to_vec();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), roster.len());

            for attendee_id in roster {
                let attendee = registry.find_attendee_by_id(*attendee_id).unwrap();
                prop_assert!(attendee.has_reserved(workshop.id));
            }
        }
    }

    for attendee in registry.attendees() {
        for workshop_id in attendee.reservations() {
            let workshop = registry.find_workshop_by_id(*workshop_id).unwrap();
            prop_assert!(workshop.has_attendee(attendee.id));
        }
    }
    Ok(())
}

proptest! {
    /// Rosters never exceed capacity and both sides of every reservation agree.
    #[test]
    fn reservations_stay_consistent(
        capacities in proptest::array::uniform3(0..4_u32),
        ops in proptest::collection::vec(op_strategy(), 0..60),
    ) {
        let mut registry = build_registry(&capacities);

        for op in ops {
            match op {
                Op::Reserve { attendee, workshop } => {
                    let attendee_id = AttendeeId::new(attendee);
                    let workshop_id = WorkshopId::new(workshop);
                    let before = registry.find_workshop_by_id(workshop_id).unwrap().registered();

                    match registry.reserve_workshop(attendee_id, workshop_id) {
                        Ok(()) => {
                            let after = registry.find_workshop_by_id(workshop_id).unwrap().registered();
                            prop_assert_eq!(after, before + 1);
                        }
                        Err(RegistryError::CapacityOrDuplicate { .. } | RegistryError::AccessDenied { .. }) => {
                            let after = registry.find_workshop_by_id(workshop_id).unwrap().registered();
                            prop_assert_eq!(after, before);
                        }
                        Err(other) => prop_assert!(false, "unexpected error: {other}"),
                    }
                }
                Op::Cancel { attendee, workshop } => {
                    let attendee_id = AttendeeId::new(attendee);
                    let workshop_id = WorkshopId::new(workshop);
                    let held = registry.find_attendee_by_id(attendee_id).unwrap().has_reserved(workshop_id);

                    let result = registry.cancel_reservation(attendee_id, workshop_id);
                    if held {
                        prop_assert!(result.is_ok());
                    } else {
                        let not_reserved = matches!(result, Err(RegistryError::NotReserved { .. }));
                        prop_assert!(not_reserved);
                    }
                }
            }

            check_invariants(&registry)?;
        }
    }

    /// Reserving the same spot twice leaves exactly one roster entry.
    #[test]
    fn repeated_reservation_is_rejected(attendee in 1..ATTENDEES, workshop in 0..3_u32) {
        let mut registry = build_registry(&[3, 3, 3]);
        let attendee_id = AttendeeId::new(attendee);
        let workshop_id = WorkshopId::new(workshop);

        registry.reserve_workshop(attendee_id, workshop_id).unwrap();
        let second = registry.reserve_workshop(attendee_id, workshop_id);

        let rejected = matches!(second, Err(RegistryError::CapacityOrDuplicate { .. }));
        prop_assert!(rejected);
        let expected = [attendee_id];
        prop_assert_eq!(
            registry.find_workshop_by_id(workshop_id).unwrap().attendees(),
            &expected[..]
        );
    }
}
