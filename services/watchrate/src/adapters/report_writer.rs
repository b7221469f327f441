//! services/watchrate/src/adapters/report_writer.rs
//!
//! Adapters that implement the `ReportSink` port, writing the finished report
//! as CSV or JSON to a file or to standard output.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::info;
use watchrate_core::ports::{PortError, PortResult, ReportSink};
use watchrate_core::{WatchReport, WatchResult};

//=========================================================================================
// Output Record Struct
//=========================================================================================

/// One serialized row. Field names are the output column headers.
#[derive(Debug, Serialize)]
struct ReportRecord<'a> {
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "Class")]
    class: &'a str,
    #[serde(rename = "Watch Rate (%)")]
    watch_rate: f64,
    #[serde(rename = "Total Watch Time (minutes)")]
    total_minutes: f64,
}

impl<'a> From<&'a WatchResult> for ReportRecord<'a> {
    fn from(row: &'a WatchResult) -> Self {
        Self {
            name: &row.participant,
            class: &row.subject,
            watch_rate: row.rate,
            total_minutes: row.minutes,
        }
    }
}

/// Where a sink puts its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    async fn write(&self, bytes: &[u8]) -> PortResult<()> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(bytes).await.map_err(unexpected)?;
                stdout.flush().await.map_err(unexpected)?;
            }
            OutputTarget::File(path) => {
                tokio::fs::write(path, bytes).await.map_err(unexpected)?;
                info!("Report saved to {}", path.display());
            }
        }
        Ok(())
    }
}

fn unexpected(e: impl std::fmt::Display) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// CSV
//=========================================================================================

/// Renders the report as CSV with a header row.
pub fn render_csv(report: &WatchReport) -> PortResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if report.is_empty() {
        writer
            .write_record(["Name", "Class", "Watch Rate (%)", "Total Watch Time (minutes)"])
            .map_err(unexpected)?;
    }
    for row in &report.rows {
        writer.serialize(ReportRecord::from(row)).map_err(unexpected)?;
    }
    writer.into_inner().map_err(unexpected)
}

/// Writes the report as CSV.
#[derive(Debug, Clone)]
pub struct CsvReportSink {
    target: OutputTarget,
}

impl CsvReportSink {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ReportSink for CsvReportSink {
    async fn write_report(&self, report: &WatchReport) -> PortResult<()> {
        let bytes = render_csv(report)?;
        self.target.write(&bytes).await
    }
}

//=========================================================================================
// JSON
//=========================================================================================

/// Renders the report as a pretty-printed JSON array.
pub fn render_json(report: &WatchReport) -> PortResult<Vec<u8>> {
    let records: Vec<ReportRecord> = report.rows.iter().map(ReportRecord::from).collect();
    let mut bytes = serde_json::to_vec_pretty(&records).map_err(unexpected)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Writes the report as JSON.
#[derive(Debug, Clone)]
pub struct JsonReportSink {
    target: OutputTarget,
}

impl JsonReportSink {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ReportSink for JsonReportSink {
    async fn write_report(&self, report: &WatchReport) -> PortResult<()> {
        let bytes = render_json(report)?;
        self.target.write(&bytes).await
    }
}
