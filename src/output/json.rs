//! JSON analysis dump.
//!
//! Unlike the summary CSV, the dump keeps raw computed values (no rounding).

use super::write_atomically;
use crate::aggregator::results::AnalysisResult;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Versioned envelope around the analysis result
#[derive(Debug, Serialize)]
struct AnalysisDocument<'a> {
    schema_version: &'static str,
    tool_version: &'static str,
    analysis: &'a AnalysisResult,
}

impl<'a> AnalysisDocument<'a> {
    fn new(analysis: &'a AnalysisResult) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            tool_version: env!("CARGO_PKG_VERSION"),
            analysis,
        }
    }
}

/// Write the analysis result to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `result` - Analysis result to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::WriteFailed` / `OutputError::InvalidPath` - See [`write_atomically`]
pub fn write_analysis_json(
    result: &AnalysisResult,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing analysis JSON to: {}", output_path.display());

    let bytes = write_atomically(output_path, |w| {
        serde_json::to_writer_pretty(w, &AnalysisDocument::new(result))?;
        Ok(())
    })?;

    info!("Analysis JSON written ({} bytes)", bytes);
    Ok(())
}

/// Serialize the analysis result to a pretty JSON string
///
/// **Public** - useful for tests and debugging
pub fn analysis_to_string(result: &AnalysisResult) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(&AnalysisDocument::new(result))?)
}
