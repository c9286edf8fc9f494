//! # Date Bucketing Utilities
//!
//! ISO calendar-date arithmetic for report bucketing: day offsets, month
//! ranges, month lengths and the near-expiry horizon.
//!
//! ## Conventions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Date Conventions                                  │
//! │                                                                         │
//! │  Wire format        "YYYY-MM-DD", zero-padded, lexicographic order      │
//! │                     equals chronological order                          │
//! │                                                                         │
//! │  Month length       "first day of the FOLLOWING month, step back one    │
//! │                     day" — handles 28/29/30/31 and leap years without   │
//! │                     a lookup table                                      │
//! │                                                                         │
//! │  Month addition     calendar months with end-of-month clamping:         │
//! │                     Jan 31 + 3 months → Apr 30                          │
//! │                                                                         │
//! │  Malformed input    parse_iso_or_epoch() falls back to 1970-01-01;      │
//! │                     nothing in this module panics on bad strings        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions are pure and deterministic. A `month` outside 1..=12 is a
//! caller bug (checked by `debug_assert!`); release builds return harmless
//! garbage rather than panicking, per the documented precondition policy.

use chrono::{Datelike, Duration, Months, NaiveDate};

/// The universal fallback date for malformed input: 1970-01-01.
fn epoch() -> NaiveDate {
    NaiveDate::default()
}

/// First day of the month after (year, month). `None` when the month is out
/// of range.
fn first_of_next_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
}

// =============================================================================
// Formatting & Parsing
// =============================================================================

/// Formats a calendar date as zero-padded ISO `YYYY-MM-DD`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use stockline_core::dates::to_iso_date;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
/// assert_eq!(to_iso_date(date), "2024-03-07");
/// ```
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses an ISO `YYYY-MM-DD` string, falling back to the epoch
/// (1970-01-01) for anything unparsable.
///
/// This is the single malformed-date policy site for the whole crate: the
/// stock classifier relies on the epoch fallback to mark batches with broken
/// expiry dates as expired rather than sellable.
///
/// ## Example
/// ```rust
/// use stockline_core::dates::{parse_iso_or_epoch, to_iso_date};
///
/// assert_eq!(to_iso_date(parse_iso_or_epoch("2024-02-29")), "2024-02-29");
/// assert_eq!(to_iso_date(parse_iso_or_epoch("not a date")), "1970-01-01");
/// ```
pub fn parse_iso_or_epoch(date_iso: &str) -> NaiveDate {
    // NaiveDate::default() is 1970-01-01
    NaiveDate::parse_from_str(date_iso, "%Y-%m-%d").unwrap_or_default()
}

// =============================================================================
// Month Ranges
// =============================================================================

/// First day of (year, month) as an ISO string: `YYYY-MM-01`.
pub fn start_of_month(year: i32, month: u32) -> String {
    debug_assert!((1..=12).contains(&month), "month out of range: {month}");
    format!("{year:04}-{month:02}-01")
}

/// Last calendar day of (year, month) as an ISO string.
///
/// Computed from the first day of the following month, so all month lengths
/// and leap years come out of calendar arithmetic rather than a table.
///
/// ## Example
/// ```rust
/// use stockline_core::dates::end_of_month;
///
/// assert_eq!(end_of_month(2024, 2), "2024-02-29"); // leap year
/// assert_eq!(end_of_month(2023, 2), "2023-02-28");
/// assert_eq!(end_of_month(2024, 4), "2024-04-30");
/// ```
pub fn end_of_month(year: i32, month: u32) -> String {
    debug_assert!((1..=12).contains(&month), "month out of range: {month}");
    let last = first_of_next_month(year, month)
        .and_then(|d| d.pred_opt())
        .unwrap_or_else(epoch);
    to_iso_date(last)
}

/// Number of calendar days in (year, month), via the same "first of next
/// month" technique as [`end_of_month`].
///
/// ## Example
/// ```rust
/// use stockline_core::dates::days_in_month;
///
/// assert_eq!(days_in_month(2024, 2), 29);
/// assert_eq!(days_in_month(2023, 2), 28);
/// assert_eq!(days_in_month(2024, 12), 31);
/// ```
pub fn days_in_month(year: i32, month: u32) -> u32 {
    debug_assert!((1..=12).contains(&month), "month out of range: {month}");
    first_of_next_month(year, month)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(0)
}

// =============================================================================
// Offsets
// =============================================================================

/// Adds `delta_days` (may be negative) to an ISO date and returns the new
/// ISO date. Pure calendar arithmetic on naive dates — immune to DST by
/// construction.
///
/// ## Example
/// ```rust
/// use stockline_core::dates::add_days_iso;
///
/// assert_eq!(add_days_iso("2024-02-28", 1), "2024-02-29");
/// assert_eq!(add_days_iso("2023-02-28", 1), "2023-03-01");
/// assert_eq!(add_days_iso("2024-05-07", -6), "2024-05-01");
/// ```
pub fn add_days_iso(date_iso: &str, delta_days: i64) -> String {
    let date = parse_iso_or_epoch(date_iso);
    let shifted = date
        .checked_add_signed(Duration::days(delta_days))
        .unwrap_or(date);
    to_iso_date(shifted)
}

/// Adds `months` calendar months with end-of-month clamping.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use stockline_core::dates::add_months;
///
/// let jan31 = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(add_months(jan31, 3), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
/// ```
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

// =============================================================================
// Unit Tests
// =============================================================================
