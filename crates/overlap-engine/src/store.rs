//! Record store seam and an in-memory implementation.
//!
//! The engine itself never talks to storage; orchestration code fetches a
//! snapshot through [`RecordStore::list_availabilities`] and hands it to the
//! pure functions. Failures from a backend surface as `OverlapError::Store`.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{OverlapError, Result};
use crate::record::{AvailabilityRecord, NewAvailability, PersonId, RecordId};
use crate::reducer::collapse_days;

/// Persistence for availability records.
pub trait RecordStore {
    /// Every record, newest `created_at` first.
    fn list_availabilities(&self) -> Result<Vec<AvailabilityRecord>>;

    /// Store a new record, assigning its id and creation time.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidRange` if `start_date > end_date`.
    fn create(&mut self, new: NewAvailability) -> Result<AvailabilityRecord>;

    /// Remove a record.
    ///
    /// # Errors
    /// Returns `OverlapError::NotFound` if no record has this id.
    fn delete(&mut self, id: &RecordId) -> Result<()>;
}

/// Replace everything `person` has declared with one available record per run
/// of consecutive days in `dates`.
///
/// Existing records owned by `person` (available or not) are deleted first.
/// Passing no dates clears the person's set. Returns the created records in
/// ascending date order.
pub fn replace_availability<S>(
    store: &mut S,
    person: &PersonId,
    dates: impl IntoIterator<Item = NaiveDate>,
) -> Result<Vec<AvailabilityRecord>>
where
    S: RecordStore + ?Sized,
{
    let owned: Vec<RecordId> = store
        .list_availabilities()?
        .into_iter()
        .filter(|r| r.person_id() == person)
        .map(|r| r.id().clone())
        .collect();
    for id in &owned {
        store.delete(id)?;
    }

    let mut created = Vec::new();
    for range in collapse_days(dates) {
        created.push(store.create(NewAvailability::available(
            person.clone(),
            range.start_date,
            range.end_date,
        ))?);
    }

    tracing::info!(
        person = %person,
        removed = owned.len(),
        created = created.len(),
        "replaced availability set"
    );

    Ok(created)
}

/// Sort records newest first, keeping insertion order among equal timestamps.
pub fn sort_newest_first(records: &mut [AvailabilityRecord]) {
    records.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

/// Source of creation timestamps.
#[derive(Debug, Clone)]
enum Clock {
    System,
    /// Hands out `next`, then advances by `step`, saturating at the ends of the
    /// representable range.
    Stepped { next: DateTime<Utc>, step: Duration },
}

impl Clock {
    fn tick(&mut self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Stepped { next, step } => {
                let now = *next;
                let limit = if *step < Duration::zero() {
                    DateTime::<Utc>::MIN_UTC
                } else {
                    DateTime::<Utc>::MAX_UTC
                };
                *next = now.checked_add_signed(*step).unwrap_or(limit);
                now
            }
        }
    }
}

/// `Vec`-backed record store.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    records: Vec<AvailabilityRecord>,
    clock: Clock,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store stamping records with the system clock.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            clock: Clock::System,
        }
    }

    /// Empty store whose creation timestamps start at `start` and advance by
    /// `step` per record.
    pub fn with_stepped_clock(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            records: Vec::new(),
            clock: Clock::Stepped { next: start, step },
        }
    }

    /// Store preloaded with existing records (ids and timestamps kept).
    pub fn from_records(records: Vec<AvailabilityRecord>) -> Self {
        Self {
            records,
            clock: Clock::System,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn list_availabilities(&self) -> Result<Vec<AvailabilityRecord>> {
        let mut records = self.records.clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn create(&mut self, new: NewAvailability) -> Result<AvailabilityRecord> {
        let id = RecordId::new(Uuid::new_v4().to_string());
        let record = new.into_record(id, self.clock.tick())?;
        tracing::info!(
            id = %record.id(),
            person = %record.person_id(),
            "created availability record"
        );
        self.records.push(record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: &RecordId) -> Result<()> {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        if self.records.len() == before {
            return Err(OverlapError::NotFound(id.to_string()));
        }
        tracing::info!(id = %id, "deleted availability record");
        Ok(())
    }
}
