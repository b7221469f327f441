pub mod domain;
pub mod engine;
pub mod error;
pub mod ports;
pub mod report;
pub mod timestamp;

pub use domain::{
    AttendanceEvent, ClassWindow, Interval, Schedule, ScheduleEntry, WatchReport, WatchResult,
    WatchTime,
};
pub use engine::{compute_watch, merge_intervals};
pub use error::AttendanceError;
pub use ports::{AttendanceSource, PortError, PortResult, ReportSink};
pub use report::{compute_participant, compute_report, group_by_participant, ParticipantGroup};
pub use timestamp::{parse_clock_time, parse_timestamp};
