//! Aggregate views over the registry for administrators.

use crate::exhibition::Exhibition;
use crate::types::{ExhibitionId, WorkshopId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Passes sold per calendar day (UTC).
pub type SalesLog = BTreeMap<NaiveDate, u32>;

/// Fill level of one workshop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityReportRow {
    /// Parent exhibition
    pub exhibition_id: ExhibitionId,
    /// Parent exhibition name
    pub exhibition_name: String,
    /// Workshop identifier
    pub workshop_id: WorkshopId,
    /// Workshop title
    pub workshop_title: String,
    /// Total spots
    pub capacity: u32,
    /// Spots taken
    pub registered: usize,
    /// Spots free
    pub spots_left: u32,
}

/// One row per workshop, in exhibition-then-workshop insertion order.
#[must_use]
pub fn capacity_report(exhibitions: &[Exhibition]) -> Vec<CapacityReportRow> {
    exhibitions
        .iter()
        .flat_map(|exhibition| {
            exhibition.workshops().iter().map(|workshop| CapacityReportRow {
                exhibition_id: exhibition.id,
                exhibition_name: exhibition.name.clone(),
                workshop_id: workshop.id,
                workshop_title: workshop.title.clone(),
                capacity: workshop.capacity,
                registered: workshop.registered(),
                spots_left: workshop.spots_left(),
            })
        })
        .collect()
}

/// Total passes sold across all days
#[must_use]
pub fn total_sales(sales: &SalesLog) -> u64 {
    sales.values().map(|count| u64::from(*count)).sum()
}
