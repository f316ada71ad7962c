//! # overlap-engine
//!
//! Group availability aggregation for "when is everyone free?" planning.
//!
//! Each person declares inclusive date ranges as available (or explicitly
//! unavailable). The engine expands those ranges into day-level presence,
//! intersects across everyone on the roster, and collapses the days where all
//! are present back into contiguous common ranges. Everything is calendar-date
//! based: no times of day, no timezones.
//!
//! ## Modules
//!
//! - [`record`] -- `AvailabilityRecord` with validated construction, ids, wire rows
//! - [`date`] -- `YYYY-MM-DD` parsing and day iteration
//! - [`expander`] -- records → `DayPresenceMap` (last record per person/day wins)
//! - [`presence`] -- the per-day presence map and its composite key
//! - [`reducer`] -- presence map + roster → common ranges
//! - [`roster`] -- people derived from records
//! - [`ordering`] -- processing order policy before expansion
//! - [`aggregate`] -- one-call aggregation with per-day headcounts
//! - [`store`] -- record store trait, in-memory store, whole-set replacement
//! - [`error`] -- Error types

pub mod aggregate;
pub mod date;
pub mod error;
pub mod expander;
pub mod ordering;
pub mod presence;
pub mod record;
pub mod reducer;
pub mod roster;
#[cfg(feature = "store")]
pub mod store;

pub use aggregate::{compute_common_availability, AggregateOptions, CommonAvailability, DayCount};
pub use error::OverlapError;
pub use expander::expand;
pub use ordering::{order_records, ProcessingOrder};
pub use presence::{DayPresenceMap, PresenceKey};
pub use record::{AvailabilityRecord, NewAvailability, PersonId, RecordId, RecordRow};
pub use reducer::{collapse_days, reduce_to_common_ranges, CommonRange};
pub use roster::known_people;
#[cfg(feature = "store")]
pub use store::{replace_availability, MemoryStore, RecordStore};
