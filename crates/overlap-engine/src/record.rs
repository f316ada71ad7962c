//! Availability records and the identifiers they carry.
//!
//! An [`AvailabilityRecord`] can only exist with `start_date <= end_date`: the
//! constructor checks it, and deserialization goes through [`RecordRow`] and the
//! same check, so the expander never sees a reversed or unparseable range.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::date::{days_inclusive, format_calendar_date, parse_calendar_date};
use crate::error::{OverlapError, Result};

/// Identifier of the person who declared a range.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PersonId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PersonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Opaque record identifier assigned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A person's declaration that they are (or explicitly are not) available over
/// an inclusive range of calendar days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordRow", into = "RecordRow")]
pub struct AvailabilityRecord {
    id: RecordId,
    person_id: PersonId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_available: bool,
    created_at: DateTime<Utc>,
}

impl AvailabilityRecord {
    /// Build a record, rejecting ranges whose start falls after their end.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidRange` naming `id` if `start_date > end_date`.
    pub fn new(
        id: RecordId,
        person_id: PersonId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        is_available: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        if start_date > end_date {
            return Err(OverlapError::InvalidRange {
                id: id.to_string(),
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            id,
            person_id,
            start_date,
            end_date,
            is_available,
            created_at,
        })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn person_id(&self) -> &PersonId {
        &self.person_id
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn is_available(&self) -> bool {
        self.is_available
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Every day this record covers, in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        days_inclusive(self.start_date, self.end_date)
    }

    /// Number of days covered (always at least 1).
    pub fn len_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }
}

fn default_available() -> bool {
    true
}

/// Wire/storage shape of an availability record.
///
/// Dates are `YYYY-MM-DD` strings (a trailing time or offset is tolerated),
/// `name` is accepted for `person_id`, `is_available` defaults to `true`, and a
/// missing `created_at` becomes the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordRow {
    pub id: String,
    #[serde(alias = "name")]
    pub person_id: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RecordRow> for AvailabilityRecord {
    type Error = OverlapError;

    fn try_from(row: RecordRow) -> Result<Self> {
        let start_date = parse_field(&row.id, "start_date", &row.start_date)?;
        let end_date = parse_field(&row.id, "end_date", &row.end_date)?;
        AvailabilityRecord::new(
            RecordId(row.id),
            PersonId(row.person_id),
            start_date,
            end_date,
            row.is_available,
            row.created_at.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        )
    }
}

impl From<AvailabilityRecord> for RecordRow {
    fn from(record: AvailabilityRecord) -> Self {
        Self {
            id: record.id.0,
            person_id: record.person_id.0,
            start_date: format_calendar_date(record.start_date),
            end_date: format_calendar_date(record.end_date),
            is_available: record.is_available,
            created_at: Some(record.created_at),
        }
    }
}

fn parse_field(id: &str, field: &'static str, value: &str) -> Result<NaiveDate> {
    parse_calendar_date(value).ok_or_else(|| OverlapError::InvalidDate {
        id: id.to_string(),
        field,
        value: value.to_string(),
    })
}

/// Parse a JSON array of record rows into validated records.
///
/// # Errors
/// Fails on the first row that is not valid JSON for [`RecordRow`], has an
/// unparseable date, or has a reversed range.
pub fn parse_records_json(
    json: &str,
) -> std::result::Result<Vec<AvailabilityRecord>, serde_json::Error> {
    serde_json::from_str(json)
}

/// A record about to be submitted to a store (no id or timestamp yet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAvailability {
    pub person_id: PersonId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_available: bool,
}

impl NewAvailability {
    pub fn available(person_id: impl Into<PersonId>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            person_id: person_id.into(),
            start_date: start,
            end_date: end,
            is_available: true,
        }
    }

    pub fn unavailable(person_id: impl Into<PersonId>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            is_available: false,
            ..Self::available(person_id, start, end)
        }
    }

    /// Attach the store-assigned id and creation time.
    ///
    /// # Errors
    /// Returns `OverlapError::InvalidRange` if the range is reversed.
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> Result<AvailabilityRecord> {
        AvailabilityRecord::new(
            id,
            self.person_id,
            self.start_date,
            self.end_date,
            self.is_available,
            created_at,
        )
    }
}
