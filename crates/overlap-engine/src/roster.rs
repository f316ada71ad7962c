//! Roster determination: the people considered for intersection.

use std::collections::BTreeSet;

use crate::record::{AvailabilityRecord, PersonId};

/// Distinct person identifiers appearing in `records`, sorted ascending.
///
/// Someone who never submitted a record is not on the roster, so they neither
/// help nor block a common range.
pub fn known_people(records: &[AvailabilityRecord]) -> Vec<PersonId> {
    records
        .iter()
        .map(AvailabilityRecord::person_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .cloned()
        .collect()
}
