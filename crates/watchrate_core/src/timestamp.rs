//! crates/watchrate_core/src/timestamp.rs
//!
//! Normalizes the timestamp text found in attendance exports into naive
//! wall-clock instants. No timezone conversion is ever applied.

use std::sync::OnceLock;

use chrono::{NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::AttendanceError;

/// Accepted layouts, in priority order. The first one that consumes the whole
/// string wins.
///
/// Two-digit years are always read month-first (`%m/%d/%y`), so `03/04/25` is
/// March 4th even when the export meant April 3rd.
pub const TIMESTAMP_FORMATS: [&str; 7] = [
    "%Y/%m/%d %I:%M:%S %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Field widths for each entry of `TIMESTAMP_FORMATS`.
///
/// chrono reads `%Y` from as few as one digit and lets a literal space match
/// nothing, so the widths are checked before the format is tried: `%Y` is
/// exactly four digits, `%y` exactly two, and date and time are separated by
/// a single space.
const TIMESTAMP_SHAPES: [&str; 7] = [
    r"^\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{1,2}:\d{1,2} (?i:AM|PM)$",
    r"^\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{1,2}:\d{1,2}$",
    r"^\d{4}/\d{1,2}/\d{1,2} \d{1,2}:\d{1,2}$",
    r"^\d{1,2}/\d{1,2}/\d{2} \d{1,2}:\d{1,2}:\d{1,2}$",
    r"^\d{1,2}/\d{1,2}/\d{2} \d{1,2}:\d{1,2}$",
    r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{1,2}:\d{1,2}$",
    r"^\d{1,2}/\d{1,2}/\d{4} \d{1,2}:\d{1,2}$",
];

/// Wall-clock format used for class start and end times.
pub const CLOCK_FORMAT: &str = "%H:%M";

fn shapes() -> &'static [Regex] {
    static SHAPES: OnceLock<Vec<Regex>> = OnceLock::new();
    SHAPES.get_or_init(|| {
        TIMESTAMP_SHAPES
            .iter()
            .map(|shape| Regex::new(shape).expect("timestamp shapes are valid patterns"))
            .collect()
    })
}

/// Parses a join or leave timestamp.
///
/// Leading and trailing whitespace is ignored on purpose: spreadsheet exports
/// often pad cells. Anything else outside the timestamp makes it malformed.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, AttendanceError> {
    let trimmed = text.trim();
    TIMESTAMP_FORMATS
        .iter()
        .zip(shapes())
        .filter(|(_, shape)| shape.is_match(trimmed))
        .find_map(|(fmt, _)| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| AttendanceError::MalformedTimestamp(text.to_string()))
}

/// Parses an `HH:MM` class time.
pub fn parse_clock_time(text: &str) -> Result<NaiveTime, AttendanceError> {
    NaiveTime::parse_from_str(text.trim(), CLOCK_FORMAT)
        .map_err(|_| AttendanceError::MalformedTimestamp(text.to_string()))
}
