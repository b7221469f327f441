//! crates/watchrate_core/src/domain.rs
//!
//! Defines the pure, core data structures for watch-rate computation.
//! These structs are independent of any file format or serialization.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::error::AttendanceError;
use crate::timestamp::parse_clock_time;

/// One raw join/leave record from the attendance log.
///
/// The timestamps are kept as the text that was read. They are normalized by the
/// engine, which needs the class window's calendar date to build the instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEvent {
    pub participant: String,
    pub joined: String,
    pub left: String,
}

impl AttendanceEvent {
    pub fn new(
        participant: impl Into<String>,
        joined: impl Into<String>,
        left: impl Into<String>,
    ) -> Self {
        Self {
            participant: participant.into(),
            joined: joined.into(),
            left: left.into(),
        }
    }
}

/// A half-open span of wall-clock time. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    /// Returns `None` when the span would be empty or inverted.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn minutes(&self) -> f64 {
        duration_minutes(self.duration())
    }
}

/// One scheduled class on the session date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassWindow {
    pub subject: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ClassWindow {
    /// Builds a window from `HH:MM` wall-clock strings on `date`.
    pub fn from_wall_clock(
        subject: impl Into<String>,
        date: NaiveDate,
        start: &str,
        end: &str,
    ) -> Result<Self, AttendanceError> {
        Ok(Self {
            subject: subject.into(),
            start: date.and_time(parse_clock_time(start)?),
            end: date.and_time(parse_clock_time(end)?),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Class length in minutes. Negative when the window is inverted.
    pub fn minutes(&self) -> f64 {
        duration_minutes(self.end - self.start)
    }
}

/// An unvalidated schedule row, as entered by whoever supplies the schedule.
/// Any field may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub subject: String,
    pub start: String,
    pub end: String,
}

impl ScheduleEntry {
    pub fn new(
        subject: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// The validated, ordered list of classes for one session date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    date: NaiveDate,
    windows: Vec<ClassWindow>,
}

impl Schedule {
    /// Validates every entry before building any window.
    ///
    /// Fails with `InvalidSchedule` if there are no entries or if any entry has a
    /// blank subject, start or end. Unparseable times fail with `MalformedTimestamp`.
    pub fn new(date: NaiveDate, entries: &[ScheduleEntry]) -> Result<Self, AttendanceError> {
        if entries.is_empty() {
            return Err(AttendanceError::InvalidSchedule(
                "no classes are configured".to_string(),
            ));
        }

        for (index, entry) in entries.iter().enumerate() {
            if entry.subject.trim().is_empty()
                || entry.start.trim().is_empty()
                || entry.end.trim().is_empty()
            {
                return Err(AttendanceError::InvalidSchedule(format!(
                    "class {} is incomplete; subject, start and end are all required",
                    index + 1
                )));
            }
        }

        let windows = entries
            .iter()
            .map(|entry| {
                ClassWindow::from_wall_clock(
                    entry.subject.trim(),
                    date,
                    entry.start.trim(),
                    entry.end.trim(),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { date, windows })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn windows(&self) -> &[ClassWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Watch rate and minutes for one participant in one class, already rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchTime {
    pub rate: f64,
    pub minutes: f64,
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchResult {
    pub participant: String,
    pub subject: String,
    pub rate: f64,
    pub minutes: f64,
}

/// The ordered output table: participants in group order, classes in schedule order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchReport {
    pub rows: Vec<WatchResult>,
}

impl WatchReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct participants, counted from consecutive runs of names.
    pub fn participant_count(&self) -> usize {
        let mut count = 0;
        let mut last: Option<&str> = None;
        for row in &self.rows {
            if last != Some(row.participant.as_str()) {
                count += 1;
                last = Some(row.participant.as_str());
            }
        }
        count
    }
}

fn duration_minutes(duration: Duration) -> f64 {
    duration.num_milliseconds() as f64 / 60_000.0
}
