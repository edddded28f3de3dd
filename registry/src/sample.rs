//! Bootstrap content used when the registry starts empty.

use crate::exhibition::Exhibition;
use crate::pass::Pass;
use crate::types::{ExhibitionId, Money, PassId, WorkshopId};
use crate::workshop::Workshop;

fn workshop(id: u32, title: &str, capacity: u32) -> Workshop {
    Workshop::new(WorkshopId::new(id), title.to_string(), capacity)
}

/// Three exhibitions hosting five workshops.
#[must_use]
pub fn exhibitions() -> Vec<Exhibition> {
    vec![
        Exhibition::new(
            ExhibitionId::new(1),
            "Sustainable Transportation".to_string(),
            "Innovations in urban mobility".to_string(),
        )
        .with_workshop(workshop(101, "Adaptive Traffic Signals", 3))
        .with_workshop(workshop(102, "EV Charging Infrastructure", 2)),
        Exhibition::new(
            ExhibitionId::new(2),
            "Renewable Energy".to_string(),
            "Solar, wind, and storage solutions".to_string(),
        )
        .with_workshop(workshop(201, "Solar Microgrids", 4))
        .with_workshop(workshop(202, "Battery Storage Advances", 2)),
        Exhibition::new(
            ExhibitionId::new(3),
            "Climate Policy & Community Action".to_string(),
            "Policy and outreach".to_string(),
        )
        .with_workshop(workshop(301, "Community Organizing 101", 5)),
    ]
}

/// Two fixed-access passes and one all-access pass covering `exhibitions`.
#[must_use]
pub fn passes(exhibitions: &[Exhibition]) -> Vec<Pass> {
    let mut all_access = Pass::all_access(PassId::new(99), Money::from_dollars(100));
    all_access.grant_all(exhibitions.iter().map(|e| e.id));

    vec![
        Pass::fixed_access(PassId::new(1), Money::from_dollars(30), [ExhibitionId::new(1)]),
        Pass::fixed_access(
            PassId::new(2),
            Money::from_dollars(45),
            [ExhibitionId::new(1), ExhibitionId::new(2)],
        ),
        all_access,
    ]
}
