//! services/watchrate/src/runner.rs
//!
//! Drives one batch run: resolve the schedule, load the attendance table,
//! compute the report and hand it to the sink. Every error aborts the run
//! before anything is written.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info};
use watchrate_core::{
    compute_participant, compute_report, group_by_participant, AttendanceError, AttendanceEvent,
    AttendanceSource, ReportSink, Schedule, ScheduleEntry, WatchReport,
};

use crate::adapters::{CsvAttendanceSource, CsvReportSink, JsonReportSink, OutputTarget};
use crate::cli::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::AppError;
use crate::schedule::{class_entries, preset_entries, ScheduleFile};
use crate::session_date::resolve_session_date;

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Written { participants: usize, rows: usize },
    /// The attendance table had no rows; nothing was written.
    EmptyInput,
}

/// Builds the raw schedule rows from the flags, falling back to the configured course.
pub async fn schedule_entries(cli: &Cli, config: &Config) -> Result<Vec<ScheduleEntry>, AppError> {
    let minutes = cli.class_minutes.unwrap_or(config.class_minutes);

    if let Some(path) = &cli.schedule {
        debug!("Loading schedule from {}", path.display());
        return Ok(ScheduleFile::load(path).await?.entries(minutes)?);
    }
    if !cli.classes.is_empty() {
        return Ok(class_entries(&cli.classes, minutes)?);
    }

    let course = cli.course.unwrap_or(config.course);
    debug!("Using the {} course preset", course.name());
    Ok(preset_entries(course, cli.subject.as_deref()))
}

/// Computes participants on blocking worker tasks.
///
/// Results are joined in participant order, so the report is identical to the
/// one `compute_report` builds sequentially, errors included.
pub async fn compute_report_parallel(
    events: &[AttendanceEvent],
    schedule: Arc<Schedule>,
) -> Result<WatchReport, AppError> {
    if events.is_empty() {
        return Err(AttendanceError::EmptyInput.into());
    }

    let tasks = group_by_participant(events).into_iter().map(|group| {
        let schedule = Arc::clone(&schedule);
        tokio::task::spawn_blocking(move || compute_participant(&group, &schedule))
    });
    let results = try_join_all(tasks)
        .await
        .map_err(|e| AppError::Internal(format!("Worker task failed: {}", e)))?;

    let mut rows = Vec::with_capacity(results.len() * schedule.len());
    for participant_rows in results {
        rows.extend(participant_rows?);
    }
    Ok(WatchReport { rows })
}

/// Runs the whole batch.
pub async fn run(cli: &Cli, config: &Config) -> Result<RunOutcome, AppError> {
    // --- 1. Session Date & Schedule ---
    let year = cli.year.unwrap_or(config.year);
    let date = resolve_session_date(year, cli.month, cli.day, &cli.input)?;
    let entries = schedule_entries(cli, config).await?;
    let schedule = Arc::new(Schedule::new(date, &entries)?);
    info!("Session {} with {} classes", date, schedule.len());

    // --- 2. Load Attendance ---
    let source = CsvAttendanceSource::new(&cli.input, config.columns.clone());
    let events = source.load_events().await?;
    info!("Loaded {} attendance rows from {}", events.len(), cli.input.display());

    // --- 3. Compute ---
    let computed = if cli.parallel {
        compute_report_parallel(&events, Arc::clone(&schedule)).await
    } else {
        compute_report(&events, &schedule).map_err(AppError::from)
    };
    let report = match computed {
        Err(AppError::Attendance(AttendanceError::EmptyInput)) => {
            info!("{} has no attendance rows; no report written", cli.input.display());
            return Ok(RunOutcome::EmptyInput);
        }
        other => other?,
    };

    // --- 4. Write ---
    let target = match &cli.output {
        Some(path) => OutputTarget::File(path.clone()),
        None => OutputTarget::Stdout,
    };
    let sink: Box<dyn ReportSink> = match cli.format {
        OutputFormat::Csv => Box::new(CsvReportSink::new(target)),
        OutputFormat::Json => Box::new(JsonReportSink::new(target)),
    };
    sink.write_report(&report).await?;

    Ok(RunOutcome::Written {
        participants: report.participant_count(),
        rows: report.len(),
    })
}
