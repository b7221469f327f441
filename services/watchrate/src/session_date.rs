//! services/watchrate/src/session_date.rs
//!
//! Works out the calendar date shared by every class of the run.

use std::path::Path;

use chrono::NaiveDate;
use regex::Regex;

use crate::config::ConfigError;

/// Returns the session date.
///
/// When `month` or `day` is missing, both are read from the first four
/// characters of the input file name as `MMDD` (e.g. `0110_attendance.csv`).
pub fn resolve_session_date(
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
    input: &Path,
) -> Result<NaiveDate, ConfigError> {
    let (month, day) = match (month, day) {
        (Some(month), Some(day)) => (month, day),
        _ => month_day_from_file_name(input)?,
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ConfigError::InvalidValue(
            "session date".to_string(),
            format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
        )
    })
}

fn month_day_from_file_name(input: &Path) -> Result<(u32, u32), ConfigError> {
    let invalid = || {
        ConfigError::InvalidValue(
            "input file name".to_string(),
            format!(
                "'{}' does not start with the session date; rename it to begin with MMDD or pass --month and --day",
                input.display()
            ),
        )
    };

    let pattern = Regex::new(r"^(\d{2})(\d{2})")
        .map_err(|e| ConfigError::InvalidValue("file name pattern".to_string(), e.to_string()))?;
    let file_name = input
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(invalid)?;
    let captures = pattern.captures(file_name).ok_or_else(invalid)?;

    let number = |index: usize| {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .ok_or_else(invalid)
    };
    Ok((number(1)?, number(2)?))
}
