//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with one enum per pipeline stage,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and deriving the activity table
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV read failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {column} (accepted names: {aliases})")]
    MissingColumn {
        column: &'static str,
        aliases: String,
    },

    #[error("Unparseable date {value:?} on row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("Invalid number {value:?} in column {column} on row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },
}

/// Errors that can occur during aggregation
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("No activity records to analyze")]
    NoRecords,
}

/// Errors that can occur while building report content
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Missing statistic in {section}: {key}")]
    MissingStatistic { section: &'static str, key: String },

    #[error("PDF construction failed: {0}")]
    Pdf(#[from] lopdf::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to write PDF {}: {source}", path.display())]
    Pdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
