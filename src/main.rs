//! Activity Insights CLI
//!
//! Descriptive analysis and PDF reporting for daily fitness tracker exports.

use activity_insights::commands::{
    display_schema, display_version, execute_report, validate_activity_file, validate_args,
    ReportArgs,
};
use activity_insights::report::ReportConfig;
use activity_insights::utils::config::{
    DEFAULT_DATA_FILE, DEFAULT_REPORT_FILE, DEFAULT_SUMMARY_FILE,
};
use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Activity Insights - analysis and reporting for fitness tracker data
#[derive(Parser, Debug)]
#[command(name = "activity-insights")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a daily activity CSV and write the report and exports
    Report {
        /// Daily activity CSV
        #[arg(short, long, env = "ACTIVITY_INPUT")]
        input: PathBuf,

        /// Directory for the report and CSV exports
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// PDF report file name
        #[arg(long, default_value = DEFAULT_REPORT_FILE)]
        pdf: String,

        /// Cleaned-data CSV file name
        #[arg(long, default_value = DEFAULT_DATA_FILE)]
        data_csv: String,

        /// Summary CSV file name
        #[arg(long, default_value = DEFAULT_SUMMARY_FILE)]
        summary_csv: String,

        /// Also write the full analysis as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Also write each dashboard chart as SVG into this directory
        #[arg(long)]
        charts_dir: Option<PathBuf>,

        /// Report title
        #[arg(long)]
        title: Option<String>,

        /// Print a summary table to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a daily activity CSV without writing anything
    Validate {
        /// Path to the activity CSV
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display accepted input columns
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Report {
            input,
            output_dir,
            pdf,
            data_csv,
            summary_csv,
            json,
            charts_dir,
            title,
            summary,
        } => {
            let mut report_config = ReportConfig::new();
            if let Some(title) = title {
                report_config = report_config.with_title(title);
            }

            let args = ReportArgs {
                input,
                output_dir,
                report_file: pdf,
                data_file: data_csv,
                summary_file: summary_csv,
                json_output: json,
                charts_dir,
                report_config,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_report(args)?;
        }

        Commands::Validate { file } => {
            validate_activity_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
