//! services/watchrate/src/schedule.rs
//!
//! Turns the user's schedule choices (a course preset, `--class` flags or a
//! schedule file) into the raw `ScheduleEntry` rows the core validates.
//! Subject numbering and default end times live here, never in the core.

use std::path::Path;
use std::str::FromStr;

use chrono::Duration;
use serde::Deserialize;
use watchrate_core::{parse_clock_time, AttendanceError, ScheduleEntry};

use crate::error::AppError;

//=========================================================================================
// Course Presets
//=========================================================================================

/// The fixed timetables offered by the school.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Course {
    Day,
    Course006,
    Evening,
}

impl Course {
    /// Start and end of each period.
    pub fn slots(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Course::Day => &[
                ("09:00", "10:30"),
                ("10:40", "12:10"),
                ("13:30", "15:00"),
                ("15:10", "16:40"),
                ("16:50", "18:20"),
            ],
            Course::Course006 => &[
                ("09:00", "10:30"),
                ("10:40", "12:10"),
                ("13:00", "14:30"),
                ("14:40", "16:10"),
            ],
            Course::Evening => &[("18:30", "20:00"), ("20:10", "21:40")],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Course::Day => "day",
            Course::Course006 => "006",
            Course::Evening => "evening",
        }
    }
}

impl FromStr for Course {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "daytime" => Ok(Course::Day),
            "006" => Ok(Course::Course006),
            "evening" | "night" | "holiday" => Ok(Course::Evening),
            other => Err(format!(
                "unknown course '{}'; expected one of: day, 006, evening",
                other
            )),
        }
    }
}

/// Names `count` classes starting from `base`.
///
/// The first class always gets `base` as written. An all-digit base counts
/// up from its value (`007`, `8`, `9`); anything else gets the 1-based
/// position appended from the second class on (`Math`, `Math2`, `Math3`).
pub fn number_subjects(base: &str, count: usize) -> Vec<String> {
    let base = base.trim();
    let numeric = !base.is_empty() && base.bytes().all(|b| b.is_ascii_digit());

    let mut subjects = Vec::with_capacity(count);
    let mut current = base.to_string();
    for position in 0..count {
        if position > 0 {
            current = if numeric {
                increment_decimal(&current)
            } else {
                format!("{}{}", base, position + 1)
            };
        }
        subjects.push(current.clone());
    }
    subjects
}

/// Adds one to a string of ASCII digits, dropping leading zeros.
fn increment_decimal(digits: &str) -> String {
    let trimmed = digits.trim_start_matches('0');
    let mut bytes: Vec<u8> = trimmed.bytes().collect();
    let mut carry = true;
    for byte in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            carry = false;
        }
    }
    if carry {
        bytes.insert(0, b'1');
    }
    bytes.into_iter().map(char::from).collect()
}

/// One row per period of `course`, subjects numbered from `base` (default `1`).
pub fn preset_entries(course: Course, base: Option<&str>) -> Vec<ScheduleEntry> {
    let slots = course.slots();
    number_subjects(base.unwrap_or("1"), slots.len())
        .into_iter()
        .zip(slots)
        .map(|(subject, (start, end))| ScheduleEntry::new(subject, *start, *end))
        .collect()
}

//=========================================================================================
// Explicit Classes
//=========================================================================================

/// A class given on the command line as `SUBJECT=HH:MM-HH:MM` or `SUBJECT=HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpec {
    pub subject: String,
    pub start: String,
    pub end: Option<String>,
}

impl FromStr for ClassSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (subject, times) = s
            .split_once('=')
            .ok_or_else(|| format!("'{}' is not SUBJECT=HH:MM-HH:MM", s))?;
        let (start, end) = match times.split_once('-') {
            Some((start, end)) => (start.trim(), Some(end.trim().to_string())),
            None => (times.trim(), None),
        };
        Ok(Self {
            subject: subject.trim().to_string(),
            start: start.to_string(),
            end,
        })
    }
}

//=========================================================================================
// Schedule File
//=========================================================================================

/// JSON schedule file layout.
#[derive(Debug, Deserialize)]
pub struct ScheduleFile {
    #[serde(default)]
    pub default_minutes: Option<i64>,
    pub classes: Vec<ScheduleFileClass>,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleFileClass {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: Option<String>,
}

impl ScheduleFile {
    pub fn from_json(text: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(text)?)
    }

    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }

    /// Converts the file into entries; `fallback_minutes` applies when the file
    /// has no `default_minutes` of its own.
    pub fn entries(&self, fallback_minutes: i64) -> Result<Vec<ScheduleEntry>, AttendanceError> {
        let minutes = self.default_minutes.unwrap_or(fallback_minutes);
        self.classes
            .iter()
            .map(|class| {
                Ok(ScheduleEntry::new(
                    class.subject.trim(),
                    class.start.trim(),
                    end_or_default(&class.start, class.end.as_deref(), minutes)?,
                ))
            })
            .collect()
    }
}

/// Entries for `--class` flags.
pub fn class_entries(
    classes: &[ClassSpec],
    minutes: i64,
) -> Result<Vec<ScheduleEntry>, AttendanceError> {
    classes
        .iter()
        .map(|class| {
            Ok(ScheduleEntry::new(
                class.subject.as_str(),
                class.start.as_str(),
                end_or_default(&class.start, class.end.as_deref(), minutes)?,
            ))
        })
        .collect()
}

/// Returns `end` if given, otherwise `start + minutes` on the same clock.
///
/// A blank start stays unresolved so the core reports the incomplete class.
fn end_or_default(start: &str, end: Option<&str>, minutes: i64) -> Result<String, AttendanceError> {
    match end.map(str::trim) {
        Some(end) if !end.is_empty() => Ok(end.to_string()),
        _ if start.trim().is_empty() => Ok(String::new()),
        _ => {
            let start = parse_clock_time(start)?;
            Ok((start + Duration::minutes(minutes)).format("%H:%M").to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_base_counts_up() {
        assert_eq!(number_subjects("12", 3), vec!["12", "13", "14"]);
        assert_eq!(number_subjects("99", 2), vec!["99", "100"]);
    }

    #[test]
    fn leading_zeros_stay_on_the_first_class_only() {
        assert_eq!(number_subjects("007", 3), vec!["007", "8", "9"]);
        assert_eq!(number_subjects("00", 2), vec!["00", "1"]);
    }

    #[test]
    fn signed_base_is_treated_as_text() {
        assert_eq!(number_subjects("+5", 2), vec!["+5", "+52"]);
        assert_eq!(number_subjects("-1", 2), vec!["-1", "-12"]);
    }

    #[test]
    fn huge_numeric_base_keeps_counting() {
        assert_eq!(
            number_subjects("18446744073709551615", 2),
            vec!["18446744073709551615", "18446744073709551616"]
        );
    }

    #[test]
    fn text_base_gets_positions() {
        assert_eq!(number_subjects("Math", 3), vec!["Math", "Math2", "Math3"]);
    }

    #[test]
    fn evening_preset_has_two_periods() {
        let entries = preset_entries(Course::Evening, None);
        assert_eq!(
            entries,
            vec![
                ScheduleEntry::new("1", "18:30", "20:00"),
                ScheduleEntry::new("2", "20:10", "21:40"),
            ]
        );
    }

    #[test]
    fn course_names_parse() {
        assert_eq!("DAY".parse::<Course>(), Ok(Course::Day));
        assert_eq!("006".parse::<Course>(), Ok(Course::Course006));
        assert_eq!("night".parse::<Course>(), Ok(Course::Evening));
        assert!("weekend".parse::<Course>().is_err());
    }

    #[test]
    fn class_spec_with_and_without_end() {
        assert_eq!(
            "Math=09:00-10:30".parse::<ClassSpec>().unwrap(),
            ClassSpec {
                subject: "Math".into(),
                start: "09:00".into(),
                end: Some("10:30".into())
            }
        );
        let open = "Art=13:00".parse::<ClassSpec>().unwrap();
        assert_eq!(open.end, None);
        assert!("Math 09:00".parse::<ClassSpec>().is_err());
    }

    #[test]
    fn missing_end_defaults_to_class_length() {
        let classes = vec!["Art=13:00".parse::<ClassSpec>().unwrap()];
        let entries = class_entries(&classes, 90).unwrap();
        assert_eq!(entries[0].end, "14:30");
    }

    #[test]
    fn malformed_start_cannot_get_default_end() {
        let classes = vec!["Art=1pm".parse::<ClassSpec>().unwrap()];
        assert_eq!(
            class_entries(&classes, 90),
            Err(AttendanceError::MalformedTimestamp("1pm".to_string()))
        );
    }

    #[test]
    fn schedule_file_uses_its_own_default() {
        let file = ScheduleFile::from_json(
            r#"{
                "default_minutes": 45,
                "classes": [
                    { "subject": "Math", "start": "09:00", "end": "10:30" },
                    { "subject": "Art", "start": "11:00" },
                    { "subject": "Music" }
                ]
            }"#,
        )
        .unwrap();
        let entries = file.entries(90).unwrap();
        assert_eq!(entries[0], ScheduleEntry::new("Math", "09:00", "10:30"));
        assert_eq!(entries[1], ScheduleEntry::new("Art", "11:00", "11:45"));
        assert_eq!(entries[2], ScheduleEntry::new("Music", "", ""));
    }
}
