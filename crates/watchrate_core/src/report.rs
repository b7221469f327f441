//! crates/watchrate_core/src/report.rs
//!
//! Cross-joins every participant in the attendance table with every class of
//! the schedule and collects one `WatchResult` per pair.

use std::collections::BTreeMap;

use crate::domain::{AttendanceEvent, Schedule, WatchReport, WatchResult};
use crate::engine::compute_watch;
use crate::error::AttendanceError;

/// Events of one participant, in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantGroup {
    pub participant: String,
    pub events: Vec<AttendanceEvent>,
}

/// Groups events by exact participant name.
///
/// Groups come out in ascending name order. Names are compared byte for byte,
/// so `"Alice"` and `"alice "` are two different participants.
pub fn group_by_participant(events: &[AttendanceEvent]) -> Vec<ParticipantGroup> {
    let mut groups: BTreeMap<&str, Vec<AttendanceEvent>> = BTreeMap::new();
    for event in events {
        groups
            .entry(event.participant.as_str())
            .or_default()
            .push(event.clone());
    }

    groups
        .into_iter()
        .map(|(participant, events)| ParticipantGroup {
            participant: participant.to_string(),
            events,
        })
        .collect()
}

/// Computes one participant's row for every class, in schedule order.
pub fn compute_participant(
    group: &ParticipantGroup,
    schedule: &Schedule,
) -> Result<Vec<WatchResult>, AttendanceError> {
    schedule
        .windows()
        .iter()
        .map(|window| {
            let watch = compute_watch(&group.events, window)?;
            Ok(WatchResult {
                participant: group.participant.clone(),
                subject: window.subject.clone(),
                rate: watch.rate,
                minutes: watch.minutes,
            })
        })
        .collect()
}

/// Builds the full report. Any failure aborts the run; no partial report is
/// ever returned.
pub fn compute_report(
    events: &[AttendanceEvent],
    schedule: &Schedule,
) -> Result<WatchReport, AttendanceError> {
    if events.is_empty() {
        return Err(AttendanceError::EmptyInput);
    }

    let mut rows = Vec::with_capacity(events.len() * schedule.len());
    for group in group_by_participant(events) {
        rows.extend(compute_participant(&group, schedule)?);
    }
    Ok(WatchReport { rows })
}
