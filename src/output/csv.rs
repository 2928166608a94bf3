//! CSV exports: the cleaned per-record table and the headline summary.

use super::write_atomically;
use crate::aggregator::results::{day_label, AnalysisResult};
use crate::parser::schema::{day_name, DerivedTable};
use crate::utils::config::{DERIVED_COLUMNS, OUTPUT_DATE_FORMAT};
use crate::utils::error::OutputError;
use ::csv::WriterBuilder;
use log::info;
use serde::Serialize;
use std::path::Path;

/// One row of the summary export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryMetric {
    #[serde(rename = "Metric")]
    pub metric: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl SummaryMetric {
    fn new(metric: &str, value: impl Into<String>) -> Self {
        Self {
            metric: metric.to_string(),
            value: value.into(),
        }
    }
}

/// Write the derived table as CSV
///
/// **Public** - cleaned-data export
///
/// # Arguments
/// * `table` - Derived table from the loader
/// * `output_path` - Destination file
///
/// # Returns
/// Ok if file written successfully
///
/// Columns are the input columns (date rewritten as `YYYY-MM-DD`) followed by
/// the five derived columns. Numbers use Rust's shortest round-trip form, so
/// loading the export again reproduces the same records.
///
/// # Errors
/// * `OutputError::Csv` - Row serialization failed
/// * `OutputError::WriteFailed` / `OutputError::InvalidPath` - See [`write_atomically`]
pub fn write_derived_csv(
    table: &DerivedTable,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing cleaned data to: {}", output_path.display());

    let csv_error = |source| OutputError::Csv {
        path: output_path.to_path_buf(),
        source,
    };

    let bytes = write_atomically(output_path, |w| {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(w);

        let header = table
            .input_columns()
            .iter()
            .map(String::as_str)
            .chain(DERIVED_COLUMNS.iter().copied());
        writer.write_record(header).map_err(csv_error)?;

        let date_position = table.date_position();
        for (record, cells) in table.rows() {
            let mut row: Vec<String> = cells.to_vec();
            if let Some(date) = row.get_mut(date_position) {
                *date = record.date.format(OUTPUT_DATE_FORMAT).to_string();
            }
            row.push(record.activity_level.label().to_string());
            row.push(day_name(record.day_of_week).to_string());
            row.push(record.total_active_minutes.to_string());
            row.push(record.activity_percentage.to_string());
            row.push(if record.is_weekend { "True" } else { "False" }.to_string());

            writer.write_record(&row).map_err(csv_error)?;
        }

        writer.flush().map_err(|e| csv_error(e.into()))?;
        Ok(())
    })?;

    info!(
        "Cleaned data written ({} rows, {} bytes)",
        table.len(),
        bytes
    );
    Ok(())
}

/// The six headline metrics of the summary export
///
/// **Public** - values are display strings with fixed precision
pub fn summary_metrics(result: &AnalysisResult) -> Vec<SummaryMetric> {
    let stats = &result.basic_stats;
    let weekly = &result.weekly_patterns;

    vec![
        SummaryMetric::new("Total Records", stats.total_records.to_string()),
        SummaryMetric::new("Unique Users", stats.unique_users.to_string()),
        SummaryMetric::new("Average Daily Steps", format!("{:.0}", stats.avg_steps)),
        SummaryMetric::new(
            "Average Sedentary Hours",
            format!("{:.1}", stats.avg_sedentary_hours),
        ),
        SummaryMetric::new("Most Active Day", day_label(weekly.most_active())),
        SummaryMetric::new("Least Active Day", day_label(weekly.least_active())),
    ]
}

/// Write summary metrics as a `Metric,Value` CSV
///
/// **Public** - summary export
///
/// # Errors
/// * `OutputError::Csv` - Row serialization failed
/// * `OutputError::WriteFailed` / `OutputError::InvalidPath` - See [`write_atomically`]
pub fn write_summary_csv(
    metrics: &[SummaryMetric],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();
    info!("Writing summary to: {}", output_path.display());

    let csv_error = |source| OutputError::Csv {
        path: output_path.to_path_buf(),
        source,
    };

    let bytes = write_atomically(output_path, |w| {
        let mut writer = WriterBuilder::new().has_headers(true).from_writer(w);
        for metric in metrics {
            writer.serialize(metric).map_err(csv_error)?;
        }
        writer.flush().map_err(|e| csv_error(e.into()))?;
        Ok(())
    })?;

    info!("Summary written ({} metrics, {} bytes)", metrics.len(), bytes);
    Ok(())
}
