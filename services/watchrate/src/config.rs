//! services/watchrate/src/config.rs
//!
//! Defines the runner's configuration structure and loading logic.
//!
//! Defaults are loaded from environment variables at startup. The `.env`
//! file is used for local setups. Command-line flags override these values.

use chrono::{Datelike, Local};
use tracing::Level;

use crate::schedule::Course;

/// Zoom's attendance export headers (Japanese locale).
pub const DEFAULT_NAME_COLUMN: &str = "名前（本来の名前）";
pub const DEFAULT_JOIN_COLUMN: &str = "参加時間";
pub const DEFAULT_LEAVE_COLUMN: &str = "退出日時";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Names of the CSV columns the source adapter reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnNames {
    pub name: String,
    pub joined: String,
    pub left: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME_COLUMN.to_string(),
            joined: DEFAULT_JOIN_COLUMN.to_string(),
            left: DEFAULT_LEAVE_COLUMN.to_string(),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub columns: ColumnNames,
    pub year: i32,
    pub course: Course,
    pub class_minutes: i64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory,
    /// but this is skipped in test builds to keep tests hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        // --- CSV Column Headers ---
        let defaults = ColumnNames::default();
        let columns = ColumnNames {
            name: lookup("WATCHRATE_NAME_COLUMN").unwrap_or(defaults.name),
            joined: lookup("WATCHRATE_JOIN_COLUMN").unwrap_or(defaults.joined),
            left: lookup("WATCHRATE_LEAVE_COLUMN").unwrap_or(defaults.left),
        };

        // --- Session Defaults ---
        let year = match lookup("WATCHRATE_YEAR") {
            Some(value) => value.trim().parse::<i32>().map_err(|_| {
                ConfigError::InvalidValue(
                    "WATCHRATE_YEAR".to_string(),
                    format!("'{}' is not a year", value),
                )
            })?,
            None => Local::now().year(),
        };

        let course = match lookup("WATCHRATE_COURSE") {
            Some(value) => value.parse::<Course>().map_err(|e| {
                ConfigError::InvalidValue("WATCHRATE_COURSE".to_string(), e)
            })?,
            None => Course::Day,
        };

        let class_minutes = match lookup("WATCHRATE_CLASS_MINUTES") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| *minutes > 0)
                .ok_or_else(|| {
                    ConfigError::InvalidValue(
                        "WATCHRATE_CLASS_MINUTES".to_string(),
                        format!("'{}' is not a positive number of minutes", value),
                    )
                })?,
            None => 90,
        };

        Ok(Self {
            log_level,
            columns,
            year,
            course,
            class_minutes,
        })
    }
}
