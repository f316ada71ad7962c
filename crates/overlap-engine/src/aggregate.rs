//! One-call aggregation: order, expand, derive the roster, reduce.
//!
//! This is what a presentation layer calls after fetching every record: it gets
//! the participants, the common ranges, and a per-day "n of m available" count
//! for calendar overlays.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::expander::expand;
use crate::ordering::{order_records, ProcessingOrder};
use crate::presence::DayPresenceMap;
use crate::record::{AvailabilityRecord, PersonId};
use crate::reducer::{reduce_to_common_ranges, CommonRange};
use crate::roster::known_people;

/// Options for [`compute_common_availability`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateOptions {
    /// Order in which records are applied.
    #[serde(default)]
    pub order: ProcessingOrder,
    /// Explicit roster. When `None`, the roster is every person with a record.
    #[serde(default)]
    pub roster: Option<Vec<PersonId>>,
}

/// Headcount for one covered day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub date: NaiveDate,
    /// People present on the day.
    pub available: usize,
    /// Size of the roster.
    pub total: usize,
}

impl DayCount {
    pub fn is_everyone(&self) -> bool {
        self.total > 0 && self.available == self.total
    }
}

/// Result of a full aggregation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonAvailability {
    /// The roster used for intersection, sorted.
    pub participants: Vec<PersonId>,
    /// Maximal runs of days on which every participant is available.
    pub ranges: Vec<CommonRange>,
    /// Per-day headcounts for every covered day, ascending.
    pub days: Vec<DayCount>,
}

/// Order, expand and reduce `records` in one pass.
///
/// Zero records yield no participants, no ranges and no days.
pub fn compute_common_availability(
    records: &[AvailabilityRecord],
    options: &AggregateOptions,
) -> CommonAvailability {
    let ordered = order_records(records, options.order);
    let presence = expand(&ordered);

    let mut participants = match &options.roster {
        Some(roster) => roster.clone(),
        None => known_people(records),
    };
    participants.sort();
    participants.dedup();

    let ranges = reduce_to_common_ranges(&presence, &participants);
    let days = day_counts(&presence, &participants);

    tracing::debug!(
        records = records.len(),
        participants = participants.len(),
        ranges = ranges.len(),
        order = ?options.order,
        "computed common availability"
    );

    CommonAvailability {
        participants,
        ranges,
        days,
    }
}

/// Per-day headcount against `participants`. Only roster members are counted.
fn day_counts(presence: &DayPresenceMap, participants: &[PersonId]) -> Vec<DayCount> {
    presence
        .iter()
        .map(|(date, people)| DayCount {
            date,
            available: participants.iter().filter(|p| people.contains(*p)).count(),
            total: participants.len(),
        })
        .collect()
}
