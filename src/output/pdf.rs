//! PDF report output writer.

use super::write_atomically;
use crate::utils::error::OutputError;
use log::info;
use lopdf::Document;
use std::path::Path;

/// Save a built report document
///
/// **Public** - main entry point for PDF output
///
/// # Arguments
/// * `document` - Document from `report::build_pdf`; saving finalizes its xref table
/// * `output_path` - Path to output PDF file
///
/// # Errors
/// * `OutputError::Pdf` - lopdf failed to serialize the document
/// * `OutputError::WriteFailed` / `OutputError::InvalidPath` - See [`super::write_atomically`]
pub fn write_pdf(document: &mut Document, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing PDF report to: {}", output_path.display());

    let bytes = write_atomically(output_path, |mut w| {
        document
            .save_to(&mut w)
            .map_err(|source| OutputError::Pdf {
                path: output_path.to_path_buf(),
                source: source.into(),
            })
    })?;

    info!(
        "PDF written successfully ({} pages, {:.2} KB)",
        document.get_pages().len(),
        bytes as f64 / 1024.0
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{build_pdf, Block, ReportConfig, ReportPage};
    use tempfile::tempdir;

    #[test]
    fn test_write_pdf_round_trips_through_lopdf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let pages = vec![
            ReportPage {
                blocks: vec![Block::Title("First".to_string())],
            },
            ReportPage {
                blocks: vec![Block::Paragraph("Second".to_string())],
            },
        ];
        let mut document = build_pdf(&pages, &ReportConfig::default()).unwrap();

        write_pdf(&mut document, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded.get_pages().len(), 2);
    }
}
