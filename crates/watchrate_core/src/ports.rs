//! crates/watchrate_core/src/ports.rs
//!
//! Defines the contracts for the collaborators around the engine: whatever
//! supplies the attendance table and whatever stores the finished report.
//! These traits form the boundary of the hexagonal architecture, keeping the
//! core independent of files and formats.

use async_trait::async_trait;

use crate::domain::{AttendanceEvent, WatchReport};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from the underlying storage or format.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AttendanceSource: Send + Sync {
    /// Loads every join/leave row of the attendance table, in file order.
    async fn load_events(&self) -> PortResult<Vec<AttendanceEvent>>;
}

#[async_trait]
pub trait ReportSink: Send + Sync {
    /// Persists a complete report. Never called with a partial one.
    async fn write_report(&self, report: &WatchReport) -> PortResult<()>;
}
