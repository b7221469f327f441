//! services/watchrate/src/error.rs
//!
//! Defines the primary error type for the batch runner.

use crate::config::ConfigError;
use watchrate_core::{AttendanceError, PortError};

/// The primary error type for the `watchrate` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a failure of the watch-rate computation itself.
    #[error("Attendance error: {0}")]
    Attendance(#[from] AttendanceError),

    /// Represents a malformed schedule file.
    #[error("Schedule file error: {0}")]
    Json(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., reading the schedule file).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}
