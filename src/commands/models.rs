use crate::report::ReportConfig;
use crate::utils::config::{DEFAULT_DATA_FILE, DEFAULT_REPORT_FILE, DEFAULT_SUMMARY_FILE};
use std::path::PathBuf;

/// Arguments for the report command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ReportArgs {
    /// Daily activity CSV to analyze
    pub input: PathBuf,

    /// Directory receiving the report and the CSV exports
    pub output_dir: PathBuf,

    /// PDF report file name
    pub report_file: String,

    /// Cleaned-data CSV file name
    pub data_file: String,

    /// Summary CSV file name
    pub summary_file: String,

    /// Full analysis dump (optional)
    pub json_output: Option<PathBuf>,

    /// Directory for standalone SVG charts (optional)
    pub charts_dir: Option<PathBuf>,

    /// Report titles
    pub report_config: ReportConfig,

    /// Print a summary table to stdout
    pub print_summary: bool,
}

impl ReportArgs {
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn data_path(&self) -> PathBuf {
        self.output_dir.join(&self.data_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_dir: PathBuf::from("."),
            report_file: DEFAULT_REPORT_FILE.to_string(),
            data_file: DEFAULT_DATA_FILE.to_string(),
            summary_file: DEFAULT_SUMMARY_FILE.to_string(),
            json_output: None,
            charts_dir: None,
            report_config: ReportConfig::default(),
            print_summary: false,
        }
    }
}
