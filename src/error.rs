//! Error types for the trip-log engine.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for library operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    #[error(transparent)]
    EmptySequence(#[from] EmptySequenceError),
}

/// A city's trip log could not be located, read, or parsed.
///
/// Always fatal for the session; nothing is retried.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// City key outside the known set
    #[error("unknown city '{key}' (expected chicago, new york city or washington)")]
    UnknownCity { key: String },

    /// File could not be opened or read
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row-level CSV failure (bad quoting, non-numeric duration, ...)
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header row lacks a mandatory column
    #[error("{path} has no '{column}' column")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{path} row {row}: invalid {column} '{value}'")]
    InvalidTimestamp {
        path: PathBuf,
        row: u64,
        column: &'static str,
        value: String,
    },

    /// Duration is negative, NaN or infinite
    #[error("{path} row {row}: invalid trip duration {value}")]
    InvalidDuration { path: PathBuf, row: u64, value: f64 },

    #[error("{path} row {row}: birth year {value} is out of range")]
    InvalidBirthYear { path: PathBuf, row: u64, value: f64 },

    /// City map file could not be parsed
    #[error("invalid city source map {path}: {reason}")]
    InvalidSourceMap { path: PathBuf, reason: String },
}

/// A month or day filter value outside the accepted set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidFilterError {
    #[error("'{0}' is not a valid month filter (expected all or january..june)")]
    Month(String),

    #[error("'{0}' is not a valid day filter (expected all or monday..sunday)")]
    Day(String),
}

/// A statistic was requested over zero records.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no records to analyze")]
pub struct EmptySequenceError;

pub type Result<T> = std::result::Result<T, Error>;
