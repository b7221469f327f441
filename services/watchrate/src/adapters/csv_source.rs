//! services/watchrate/src/adapters/csv_source.rs
//!
//! This module contains the CSV adapter that reads the meeting tool's attendance
//! export. It implements the `AttendanceSource` port from the `core` crate.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use watchrate_core::ports::{AttendanceSource, PortError, PortResult};
use watchrate_core::AttendanceEvent;

use crate::config::ColumnNames;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `AttendanceSource` port for a CSV file on disk.
#[derive(Clone, Debug)]
pub struct CsvAttendanceSource {
    path: PathBuf,
    columns: ColumnNames,
}

impl CsvAttendanceSource {
    /// Creates a new `CsvAttendanceSource`.
    pub fn new(path: impl Into<PathBuf>, columns: ColumnNames) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }
}

/// Parses CSV text into events. Columns other than the three configured ones
/// are ignored; a leading UTF-8 byte order mark is skipped. A file with no
/// content at all, not even a header, is an empty table.
pub fn parse_events(text: &str, columns: &ColumnNames) -> PortResult<Vec<AttendanceEvent>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| PortError::InvalidData(format!("Failed to read CSV header: {}", e)))?
        .clone();
    let position = |column: &str| {
        headers
            .iter()
            .position(|header| header.trim() == column)
            .ok_or_else(|| PortError::InvalidData(format!("Column '{}' not found", column)))
    };
    let name_at = position(&columns.name)?;
    let joined_at = position(&columns.joined)?;
    let left_at = position(&columns.left)?;

    let mut events = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| PortError::InvalidData(format!("Failed to read CSV row: {}", e)))?;
        let field = |index: usize| record.get(index).unwrap_or_default();
        events.push(AttendanceEvent::new(
            field(name_at),
            field(joined_at),
            field(left_at),
        ));
    }
    Ok(events)
}

//=========================================================================================
// `AttendanceSource` Trait Implementation
//=========================================================================================

#[async_trait]
impl AttendanceSource for CsvAttendanceSource {
    async fn load_events(&self) -> PortResult<Vec<AttendanceEvent>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => PortError::NotFound(self.path.display().to_string()),
                _ => PortError::Unexpected(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )),
            })?;

        let events = parse_events(&text, &self.columns)?;
        debug!("Read {} attendance rows from {}", events.len(), self.path.display());
        Ok(events)
    }
}
