//! Availability expansion: date-range records → per-day presence.
//!
//! Records are applied in the order given. For each (person, day) pair the last
//! record processed decides: available adds the person to the day, unavailable
//! removes them. Callers that want the newest record to win regardless of fetch
//! order sort first with [`crate::ordering::order_records`].

use std::collections::BTreeMap;

use crate::presence::{DayPresenceMap, PresenceKey};
use crate::record::AvailabilityRecord;

/// Expand availability records into a [`DayPresenceMap`].
///
/// Every day covered by at least one record appears in the output, even when
/// nobody is available on it. Zero records produce an empty map.
///
/// ```
/// use overlap_engine::{expand, AvailabilityRecord, PersonId, RecordId};
/// use chrono::{DateTime, NaiveDate, Utc};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
/// let record = AvailabilityRecord::new(
///     RecordId::new("1"),
///     PersonId::new("alice"),
///     day(1),
///     day(3),
///     true,
///     DateTime::<Utc>::UNIX_EPOCH,
/// )
/// .unwrap();
///
/// let presence = expand(&[record]);
/// assert_eq!(presence.len(), 3);
/// assert_eq!(presence.headcount(day(2)), 1);
/// ```
pub fn expand(records: &[AvailabilityRecord]) -> DayPresenceMap {
    // Last write per (day, person) wins.
    let mut latest: BTreeMap<PresenceKey, bool> = BTreeMap::new();
    for record in records {
        for day in record.days() {
            latest.insert(
                PresenceKey {
                    day,
                    person: record.person_id().clone(),
                },
                record.is_available(),
            );
        }
    }

    let mut presence = DayPresenceMap::new();
    for (key, available) in latest {
        if available {
            presence.mark_present(key.day, key.person);
        } else {
            presence.mark_absent(key.day, &key.person);
        }
    }

    tracing::debug!(
        records = records.len(),
        days = presence.len(),
        "expanded availability records"
    );

    presence
}
