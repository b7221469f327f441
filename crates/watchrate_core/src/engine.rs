//! crates/watchrate_core/src/engine.rs
//!
//! The watch-time engine: clips one participant's attendance to a class window,
//! merges the overlapping pieces and derives the watch rate.

use chrono::NaiveDateTime;

use crate::domain::{AttendanceEvent, ClassWindow, Interval, WatchTime};
use crate::error::AttendanceError;
use crate::timestamp::parse_timestamp;

/// Computes the watch rate and watched minutes of `events` within `window`.
///
/// All events are expected to belong to the same participant. The first
/// malformed timestamp aborts the computation.
pub fn compute_watch(
    events: &[AttendanceEvent],
    window: &ClassWindow,
) -> Result<WatchTime, AttendanceError> {
    let mut intervals = Vec::with_capacity(events.len());
    for event in events {
        let joined = on_window_date(parse_timestamp(&event.joined)?, window);
        let left = on_window_date(parse_timestamp(&event.left)?, window);
        if let Some(interval) = clip(joined, left, window) {
            intervals.push(interval);
        }
    }

    let watched: f64 = merge_intervals(intervals).iter().map(Interval::minutes).sum();
    Ok(watch_time(watched, window.minutes()))
}

/// Moves `instant` onto the window's calendar date, keeping its time of day.
fn on_window_date(instant: NaiveDateTime, window: &ClassWindow) -> NaiveDateTime {
    window.date().and_time(instant.time())
}

/// Truncates `[joined, left)` to the window. Spans that end up empty are dropped.
pub fn clip(joined: NaiveDateTime, left: NaiveDateTime, window: &ClassWindow) -> Option<Interval> {
    Interval::new(joined.max(window.start), left.min(window.end))
}

/// Sorts and merges intervals into disjoint, non-touching spans.
///
/// An interval starting exactly where the previous one ends is merged with it.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    intervals.sort();

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for next in intervals {
        match merged.last_mut() {
            Some(current) if next.start <= current.end => {
                current.end = current.end.max(next.end);
            }
            _ => merged.push(next),
        }
    }
    merged
}

/// Derives the rounded rate and minutes from raw minute totals.
pub fn watch_time(watched_minutes: f64, class_minutes: f64) -> WatchTime {
    let rate = if class_minutes > 0.0 {
        (watched_minutes / class_minutes * 100.0).min(100.0)
    } else {
        0.0
    };
    WatchTime {
        rate: round_tenth(rate),
        minutes: round_tenth(watched_minutes),
    }
}

/// Rounds to one decimal place from the exact binary value, so `0.35`
/// (stored just below .35) goes down and `0.25` (an exact tie) goes to even.
pub fn round_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
    }

    fn window(start: &str, end: &str) -> ClassWindow {
        ClassWindow::from_wall_clock("Math", date(), start, end).unwrap()
    }

    fn event(joined: &str, left: &str) -> AttendanceEvent {
        AttendanceEvent::new("Alice", format!("2025/01/10 {joined}"), format!("2025/01/10 {left}"))
    }

    fn span(start: &str, end: &str) -> Interval {
        let parse = |t: &str| date().and_time(crate::timestamp::parse_clock_time(t).unwrap());
        Interval::new(parse(start), parse(end)).unwrap()
    }

    #[test]
    fn overlapping_reconnects_and_late_leave() {
        let events = vec![
            event("09:10", "09:40"),
            event("09:35", "10:00"),
            event("10:20", "11:00"),
        ];
        let result = compute_watch(&events, &window("09:00", "10:30")).unwrap();
        assert_eq!(result.minutes, 60.0);
        assert_eq!(result.rate, 66.7);
    }

    #[test]
    fn touching_intervals_merge() {
        let merged = merge_intervals(vec![span("09:30", "10:00"), span("09:00", "09:30")]);
        assert_eq!(merged, vec![span("09:00", "10:00")]);
    }

    #[test]
    fn contained_interval_does_not_shrink_current() {
        let merged = merge_intervals(vec![span("09:00", "10:00"), span("09:10", "09:20")]);
        assert_eq!(merged, vec![span("09:00", "10:00")]);
    }

    #[test]
    fn disjoint_intervals_stay_apart() {
        let merged = merge_intervals(vec![span("10:00", "10:10"), span("09:00", "09:30")]);
        assert_eq!(merged, vec![span("09:00", "09:30"), span("10:00", "10:10")]);
    }

    #[test]
    fn event_outside_window_contributes_nothing() {
        let events = vec![event("08:00", "08:59"), event("10:30", "11:00")];
        let result = compute_watch(&events, &window("09:00", "10:30")).unwrap();
        assert_eq!(result, WatchTime { rate: 0.0, minutes: 0.0 });
    }

    #[test]
    fn full_attendance_is_capped_at_one_hundred() {
        let events = vec![event("08:00", "12:00")];
        let result = compute_watch(&events, &window("09:00", "10:30")).unwrap();
        assert_eq!(result, WatchTime { rate: 100.0, minutes: 90.0 });
    }

    #[test]
    fn zero_length_window_has_zero_rate() {
        let events = vec![event("08:00", "12:00")];
        let result = compute_watch(&events, &window("09:00", "09:00")).unwrap();
        assert_eq!(result, WatchTime { rate: 0.0, minutes: 0.0 });
    }

    #[test]
    fn event_date_is_replaced_by_window_date() {
        let events = vec![AttendanceEvent::new("Alice", "12/31/24 09:00", "12/31/24 09:45")];
        let result = compute_watch(&events, &window("09:00", "10:30")).unwrap();
        assert_eq!(result.minutes, 45.0);
        assert_eq!(result.rate, 50.0);
    }

    #[test]
    fn seconds_count_toward_minutes() {
        let events = vec![AttendanceEvent::new(
            "Alice",
            "2025/01/10 09:00:00",
            "2025/01/10 09:10:30",
        )];
        let result = compute_watch(&events, &window("09:00", "10:00")).unwrap();
        assert_eq!(result.minutes, 10.5);
        assert_eq!(result.rate, 17.5);
    }

    #[test]
    fn malformed_timestamp_propagates() {
        let events = vec![
            event("09:00", "09:30"),
            AttendanceEvent::new("Alice", "2025-13-40", "2025/01/10 10:00"),
        ];
        let err = compute_watch(&events, &window("09:00", "10:30")).unwrap_err();
        assert_eq!(err, AttendanceError::MalformedTimestamp("2025-13-40".to_string()));
    }

    #[test]
    fn no_events_means_zero() {
        let result = compute_watch(&[], &window("09:00", "10:30")).unwrap();
        assert_eq!(result, WatchTime { rate: 0.0, minutes: 0.0 });
    }

    #[test]
    fn rounding_ties_go_to_even() {
        assert_eq!(round_tenth(0.25), 0.2);
        assert_eq!(round_tenth(0.75), 0.8);
        assert_eq!(round_tenth(66.666), 66.7);
    }

    #[test]
    fn rounding_uses_the_stored_value() {
        assert_eq!(round_tenth(0.05), 0.1);
        assert_eq!(round_tenth(0.35), 0.3);
        assert_eq!(round_tenth(0.95), 0.9);
    }

    #[test]
    fn odd_second_counts_round_like_the_stored_minutes() {
        let class = window("09:00", "10:30");
        let stay = |seconds: &str| {
            vec![AttendanceEvent::new(
                "Alice",
                "2025/01/10 09:00:00",
                format!("2025/01/10 09:00:{seconds}"),
            )]
        };
        assert_eq!(
            compute_watch(&stay("03"), &class).unwrap(),
            WatchTime { rate: 0.1, minutes: 0.1 }
        );
        assert_eq!(
            compute_watch(&stay("21"), &class).unwrap(),
            WatchTime { rate: 0.4, minutes: 0.3 }
        );
        assert_eq!(
            compute_watch(&stay("57"), &class).unwrap(),
            WatchTime { rate: 1.1, minutes: 0.9 }
        );
    }
}
