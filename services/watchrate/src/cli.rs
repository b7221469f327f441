//! CLI argument parsing for watchrate

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::schedule::{ClassSpec, Course};

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row (default)
    Csv,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "watchrate")]
#[command(version)]
#[command(about = "Computes per-class watch rates from a meeting attendance export", long_about = None)]
pub struct Cli {
    /// Attendance CSV exported from the meeting tool
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Write the report here instead of standard output
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Session year (default: WATCHRATE_YEAR or the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Session month; read from the file name's MMDD prefix when omitted
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Session day; read from the file name's MMDD prefix when omitted
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=31))]
    pub day: Option<u32>,

    /// Course preset: day, 006 or evening (default: WATCHRATE_COURSE or day)
    #[arg(long, conflicts_with_all = ["schedule", "classes"])]
    pub course: Option<Course>,

    /// Subject of the first preset class; later classes are numbered from it
    #[arg(long, value_name = "BASE", conflicts_with_all = ["schedule", "classes"])]
    pub subject: Option<String>,

    /// JSON schedule file
    #[arg(long, value_name = "FILE", conflicts_with = "classes")]
    pub schedule: Option<PathBuf>,

    /// Explicit class, repeatable (e.g. --class "Math=09:00-10:30")
    #[arg(long = "class", value_name = "SUBJECT=HH:MM[-HH:MM]")]
    pub classes: Vec<ClassSpec>,

    /// Length in minutes of classes given without an end time
    #[arg(long, value_name = "MINUTES", value_parser = clap::value_parser!(i64).range(1..))]
    pub class_minutes: Option<i64>,

    /// Compute participants on parallel worker tasks
    #[arg(long)]
    pub parallel: bool,
}
