//! crates/watchrate_core/src/error.rs
//!
//! Errors raised by the watch-rate engine. None of them are handled inside the
//! core; they propagate to the caller, which aborts the whole run.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttendanceError {
    /// A timestamp matched none of the accepted formats.
    #[error("Timestamp '{0}' does not match any known format")]
    MalformedTimestamp(String),

    /// The schedule is empty or one of its classes is incomplete.
    #[error("Invalid class schedule: {0}")]
    InvalidSchedule(String),

    /// The attendance table has no rows.
    #[error("The attendance table contains no rows")]
    EmptyInput,
}
