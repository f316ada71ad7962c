//! Day-level presence: which people are available on which calendar day.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::PersonId;

/// Composite key for one person on one calendar day.
///
/// Orders by day first, then person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PresenceKey {
    pub day: NaiveDate,
    pub person: PersonId,
}

/// Mapping from calendar day to the set of people present on that day.
///
/// A day may be present with an empty set: it was covered by some record, but
/// nobody ended up available. Serializes as `{"YYYY-MM-DD": ["name", ...]}`
/// with days and names in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayPresenceMap {
    days: BTreeMap<NaiveDate, BTreeSet<PersonId>>,
}

impl DayPresenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `day` as covered without changing who is present.
    pub fn touch(&mut self, day: NaiveDate) {
        self.days.entry(day).or_default();
    }

    pub fn mark_present(&mut self, day: NaiveDate, person: PersonId) {
        self.days.entry(day).or_default().insert(person);
    }

    /// Remove `person` from `day`. The day stays in the map even if the person
    /// was never there.
    pub fn mark_absent(&mut self, day: NaiveDate, person: &PersonId) {
        self.days.entry(day).or_default().remove(person);
    }

    pub fn people_on(&self, day: NaiveDate) -> Option<&BTreeSet<PersonId>> {
        self.days.get(&day)
    }

    pub fn is_present(&self, key: &PresenceKey) -> bool {
        self.days
            .get(&key.day)
            .is_some_and(|people| people.contains(&key.person))
    }

    /// Number of people present on `day` (0 for days never covered).
    pub fn headcount(&self, day: NaiveDate) -> usize {
        self.days.get(&day).map_or(0, BTreeSet::len)
    }

    /// Covered days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &BTreeSet<PersonId>)> {
        self.days.iter().map(|(day, people)| (*day, people))
    }

    /// Number of covered days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

impl FromIterator<(NaiveDate, BTreeSet<PersonId>)> for DayPresenceMap {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, BTreeSet<PersonId>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
