//! Processing order for records before expansion.

use serde::{Deserialize, Serialize};

use crate::record::AvailabilityRecord;

/// Order in which records are fed to the expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessingOrder {
    /// Oldest first by `created_at`, so the newest record wins per (person, day).
    /// Records with equal timestamps keep their supplied order.
    #[default]
    CreatedAscending,
    /// Exactly the order the caller supplied.
    AsSupplied,
}

/// Return `records` arranged according to `order`.
pub fn order_records(
    records: &[AvailabilityRecord],
    order: ProcessingOrder,
) -> Vec<AvailabilityRecord> {
    let mut ordered = records.to_vec();
    if order == ProcessingOrder::CreatedAscending {
        // `sort_by_key` is stable.
        ordered.sort_by_key(AvailabilityRecord::created_at);
    }
    ordered
}
