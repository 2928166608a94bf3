//! Output writers for analysis artifacts.
//!
//! This module handles writing results to disk:
//! - Cleaned-data and summary CSV exports
//! - JSON analysis dump
//! - PDF report and SVG charts
//!
//! Every writer goes through [`write_atomically`], so a failed write never
//! leaves a partial file at the target path.

pub mod csv;
pub mod json;
pub mod pdf;
pub mod svg;

// Re-export main functions
pub use self::csv::{summary_metrics, write_derived_csv, write_summary_csv, SummaryMetric};
pub use json::{analysis_to_string, write_analysis_json};
pub use pdf::write_pdf;
pub use svg::write_svg;

use crate::utils::error::OutputError;
use log::debug;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Write a file through a temporary in the target directory
///
/// **Public** - shared by every writer in this module
///
/// # Arguments
/// * `path` - Final output path
/// * `write` - Fills the (buffered) temporary file
///
/// # Returns
/// Number of bytes written
///
/// # Errors
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error creating, writing or persisting the file
/// * Any error returned by `write`; the temporary file is removed in that case
pub fn write_atomically<F>(path: &Path, write: F) -> Result<u64, OutputError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), OutputError>,
{
    validate_path(path)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !dir.exists() {
        debug!("Creating parent directories: {}", dir.display());
        std::fs::create_dir_all(dir).map_err(|e| {
            OutputError::InvalidPath(format!("Cannot create directory {}: {}", dir.display(), e))
        })?;
    }

    let write_failed = |source| OutputError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_failed)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        write(&mut writer)?;
        writer.flush().map_err(write_failed)?;
    }

    let bytes = temp.as_file().metadata().map_err(write_failed)?.len();
    temp.persist(path).map_err(|e| write_failed(e.error))?;

    debug!("Persisted {} ({} bytes)", path.display(), bytes);
    Ok(bytes)
}

/// Validate that an output path is writable
///
/// **Public** - also used by the report command before running the pipeline
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}
