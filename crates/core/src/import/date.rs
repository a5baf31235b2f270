//! Date normalization for harvest CSV cells.
//!
//! The importer accepts exactly one date shape: `M/D/Y` with 1-2 digit month
//! and day and a 2- or 4-digit year, `/` separators, surrounding whitespace
//! ignored. Two-digit years mean `2000 + YY`. Every other shape -- ISO-8601
//! included -- is rejected: this is a fixed-format importer, not a general
//! date parser.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::types::Timestamp;

/// Compiled `M/D/Y` cell shape. Compiled once, reused forever.
static DATE_CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})$").expect("valid regex"));

/// Parse a `M/D/Y` date cell into midnight UTC of that calendar day.
///
/// The error string is row-local: it ends up in the preview's `errors`
/// bucket rather than failing the whole upload.
pub fn parse_harvest_date(text: &str) -> Result<Timestamp, String> {
    let trimmed = text.trim();
    let caps = DATE_CELL_RE.captures(trimmed).ok_or_else(|| {
        format!("Invalid date '{trimmed}': expected M/D/YYYY or M/D/YY")
    })?;

    // The capture groups are 1-4 digit runs, so parsing cannot overflow.
    let month: u32 = caps[1].parse().map_err(|_| invalid_day(trimmed))?;
    let day: u32 = caps[2].parse().map_err(|_| invalid_day(trimmed))?;
    let year_digits = &caps[3];
    let mut year: i32 = year_digits.parse().map_err(|_| invalid_day(trimmed))?;
    if year_digits.len() == 2 {
        year += 2000;
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid_day(trimmed))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

fn invalid_day(cell: &str) -> String {
    format!("Invalid date '{cell}': no such calendar day")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
