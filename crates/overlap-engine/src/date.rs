//! Calendar-date parsing and day iteration.
//!
//! Everything in the engine works on `NaiveDate`: there is no time-of-day and
//! no timezone. Wire values are `YYYY-MM-DD`; a trailing time or offset (as
//! produced by `Date.toISOString()` or SQL timestamp columns) is ignored and the
//! calendar date is kept exactly as written.

use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` string, ignoring anything after a `T` or space separator.
///
/// Returns `None` when the date part is not exactly ten characters of
/// `YYYY-MM-DD` or does not name a real calendar day.
///
/// ```
/// use chrono::NaiveDate;
/// use overlap_engine::date::parse_calendar_date;
///
/// let d = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
/// assert_eq!(parse_calendar_date("2024-06-01"), Some(d));
/// assert_eq!(parse_calendar_date("2024-06-01T23:30:00-05:00"), Some(d));
/// assert_eq!(parse_calendar_date("2024-02-30"), None);
/// ```
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let date_part = match s.find(['T', ' ']) {
        Some(idx) => &s[..idx],
        None => s,
    };

    let bytes = date_part.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every calendar day from `start` to `end`, both inclusive.
///
/// Yields nothing when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

/// `true` when `next` is exactly one calendar day after `prev`.
pub fn is_next_day(prev: NaiveDate, next: NaiveDate) -> bool {
    prev.succ_opt() == Some(next)
}
