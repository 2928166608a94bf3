//! SVG chart output writer.

use super::write_atomically;
use crate::utils::error::OutputError;
use log::info;
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Arguments
/// * `svg_content` - SVG string from `report::render_chart_svg`
/// * `output_path` - Path to output SVG file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    let bytes = write_atomically(output_path, |w| {
        w.write_all(svg_content.as_bytes())
            .map_err(|source| OutputError::WriteFailed {
                path: output_path.to_path_buf(),
                source,
            })
    })?;

    info!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        bytes,
        bytes as f64 / 1024.0
    );
    Ok(())
}
