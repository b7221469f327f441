//! Property-based tests for interval merging and watch-rate derivation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use watchrate_core::{compute_watch, merge_intervals, AttendanceEvent, ClassWindow, Interval};

fn base() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 10)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

fn interval(offset: i64, length: i64) -> Interval {
    let start = base() + Duration::minutes(offset);
    Interval::new(start, start + Duration::minutes(length)).unwrap()
}

fn event(offset: i64, length: i64) -> AttendanceEvent {
    let span = interval(offset, length);
    let fmt = "%Y/%m/%d %H:%M:%S";
    AttendanceEvent::new(
        "Alice",
        span.start.format(fmt).to_string(),
        span.end.format(fmt).to_string(),
    )
}

fn window(offset: i64, length: i64) -> ClassWindow {
    let start = base() + Duration::minutes(offset);
    ClassWindow {
        subject: "Math".to_string(),
        start,
        end: start + Duration::minutes(length),
    }
}

fn spans() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..600, 1i64..120), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_merge_is_idempotent(raw in spans()) {
        let merged = merge_intervals(raw.iter().map(|&(o, l)| interval(o, l)).collect());
        prop_assert_eq!(merge_intervals(merged.clone()), merged);
    }

    #[test]
    fn prop_merge_ignores_input_order(
        (raw, shuffled) in spans().prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let a = merge_intervals(raw.iter().map(|&(o, l)| interval(o, l)).collect());
        let b = merge_intervals(shuffled.iter().map(|&(o, l)| interval(o, l)).collect());
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_merged_spans_are_disjoint_and_apart(raw in spans()) {
        let merged = merge_intervals(raw.iter().map(|&(o, l)| interval(o, l)).collect());
        for pair in merged.windows(2) {
            prop_assert!(pair[0].end < pair[1].start);
        }
    }

    #[test]
    fn prop_rate_and_minutes_stay_in_bounds(raw in spans(), start in 0i64..600, length in 0i64..180) {
        let events: Vec<_> = raw.iter().map(|&(o, l)| event(o, l)).collect();
        let class = window(start, length);
        let watch = compute_watch(&events, &class).unwrap();
        prop_assert!((0.0..=100.0).contains(&watch.rate));
        prop_assert!(watch.minutes >= 0.0);
        prop_assert!(watch.minutes <= length as f64);
    }

    #[test]
    fn prop_zero_length_class_has_zero_rate(raw in spans(), start in 0i64..600) {
        let events: Vec<_> = raw.iter().map(|&(o, l)| event(o, l)).collect();
        let watch = compute_watch(&events, &window(start, 0)).unwrap();
        prop_assert_eq!(watch.rate, 0.0);
    }

    #[test]
    fn prop_event_inside_window_counts_in_full(offset in 0i64..60, length in 1i64..60) {
        let class = window(0, 180);
        let watch = compute_watch(&[event(offset, length)], &class).unwrap();
        prop_assert_eq!(watch.minutes, length as f64);
    }

    #[test]
    fn prop_event_outside_window_counts_nothing(offset in 0i64..60, length in 1i64..60) {
        let class = window(200, 90);
        let watch = compute_watch(&[event(offset, length)], &class).unwrap();
        prop_assert_eq!(watch.minutes, 0.0);
        prop_assert_eq!(watch.rate, 0.0);
    }
}
