//! Error types for calstats-core

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

use crate::ingest::DatetimeError;

/// Main error type for the calstats-core library
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Calendar root directory is missing
    #[error("calendar directory {0:?} does not exist")]
    CalendarDirNotFound(PathBuf),

    /// Categorization rules file is missing
    ///
    /// Classification has no built-in rules, so this is fatal for a run.
    #[error("categorization rules file {0:?} not found; create it with categorization rules")]
    RulesNotFound(PathBuf),

    /// Date range with end before start
    #[error("invalid date range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Invalid file discovery pattern
    #[error("invalid calendar file pattern: {0}")]
    Pattern(String),

    /// Datetime token that could not be decoded
    #[error("datetime error: {0}")]
    Datetime(#[from] DatetimeError),
}

/// Result type alias for calstats-core
pub type Result<T> = std::result::Result<T, Error>;
