//! Error types for overlap-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OverlapError {
    /// A record whose start date falls after its end date.
    #[error("Invalid range in record {id}: start {start} is after end {end}")]
    InvalidRange {
        id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    /// A date field that is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date in record {id}: {field} = {value:?}")]
    InvalidDate {
        id: String,
        field: &'static str,
        value: String,
    },

    #[error("Record not found: {0}")]
    NotFound(String),

    /// Opaque failure reported by a record store backend.
    #[error("Record store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
