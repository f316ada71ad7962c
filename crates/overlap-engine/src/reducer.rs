//! Common-range reduction: days where every known person is present, collapsed
//! into maximal runs of consecutive days.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date::{days_inclusive, is_next_day};
use crate::presence::DayPresenceMap;
use crate::record::PersonId;

/// An inclusive run of consecutive calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CommonRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CommonRange {
    /// A range covering the single day `day`.
    pub fn single(day: NaiveDate) -> Self {
        Self {
            start_date: day,
            end_date: day,
        }
    }

    /// Number of days in the range (always at least 1).
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_inclusive(self.start_date, self.end_date)
    }
}

/// Find every maximal run of days on which all `known_people` are present.
///
/// A day qualifies when its presence set is non-empty and holds every known
/// person. People present who are not on the roster neither help nor block a
/// day. When the roster is derived from the same records, this is the same as
/// the presence set having exactly as many members as the roster. An empty
/// roster qualifies nothing.
///
/// Returns disjoint ranges in ascending order.
pub fn reduce_to_common_ranges(
    presence: &DayPresenceMap,
    known_people: &[PersonId],
) -> Vec<CommonRange> {
    let roster: BTreeSet<&PersonId> = known_people.iter().collect();
    if roster.is_empty() {
        return Vec::new();
    }

    // DayPresenceMap iterates in ascending day order.
    let qualifying = presence.iter().filter_map(|(day, people)| {
        let everyone =
            !people.is_empty() && roster.iter().all(|person| people.contains(*person));
        everyone.then_some(day)
    });

    let ranges = merge_consecutive(qualifying);

    tracing::debug!(
        days = presence.len(),
        people = roster.len(),
        ranges = ranges.len(),
        "reduced presence to common ranges"
    );

    ranges
}

/// Collapse arbitrary days into maximal runs of consecutive days.
///
/// Input order and duplicates do not matter.
///
/// ```
/// use chrono::NaiveDate;
/// use overlap_engine::collapse_days;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
/// let ranges = collapse_days([day(5), day(1), day(2), day(4), day(2)]);
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].start_date, ranges[0].end_date), (day(1), day(2)));
/// assert_eq!((ranges[1].start_date, ranges[1].end_date), (day(4), day(5)));
/// ```
pub fn collapse_days(days: impl IntoIterator<Item = NaiveDate>) -> Vec<CommonRange> {
    let sorted: BTreeSet<NaiveDate> = days.into_iter().collect();
    merge_consecutive(sorted.into_iter())
}

/// Greedy merge over days that are already sorted ascending and unique.
fn merge_consecutive(days: impl Iterator<Item = NaiveDate>) -> Vec<CommonRange> {
    let mut ranges: Vec<CommonRange> = Vec::new();
    for day in days {
        if let Some(current) = ranges.last_mut() {
            if is_next_day(current.end_date, day) {
                current.end_date = day;
                continue;
            }
        }
        ranges.push(CommonRange::single(day));
    }
    ranges
}
