//! Report command implementation.
//!
//! The report command:
//! 1. Loads and derives the activity table
//! 2. Computes the analysis
//! 3. Renders the report pages and PDF document
//! 4. Writes the PDF report (and optional SVG charts)
//! 5. Writes the CSV exports (and optional JSON dump)
//!
//! Steps 4 and 5 are independent: a failed report does not stop the exports,
//! and the command fails afterwards with the first error.

use super::models::ReportArgs;
use crate::aggregator::{analyze, AnalysisResult};
use crate::output::{
    summary_metrics, write_analysis_json, write_derived_csv, write_pdf, write_summary_csv,
    write_svg, SummaryMetric,
};
use crate::parser::{load_activity_csv, DerivedTable};
use crate::report::{build_pdf, dashboard_charts, render_chart_svg, render_pages};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, error, info};
use std::time::Instant;

/// Execute the report command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Report command arguments
///
/// # Returns
/// Ok if every requested artifact was written
///
/// # Errors
/// * Input loading or format errors (nothing is written)
/// * Empty input (nothing is written)
/// * Rendering or file write errors, after all other outputs were attempted
pub fn execute_report(args: ReportArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1: Load
    info!("Step 1/5: Loading activity data...");
    let table = load_activity_csv(&args.input)
        .with_context(|| format!("Failed to load activity data from {}", args.input.display()))?;

    // Step 2: Analyze
    info!("Step 2/5: Computing statistics...");
    let result = analyze(&table).context("Failed to analyze activity data")?;

    debug!(
        "Weekly means: {:?}",
        result
            .weekly_patterns
            .days()
            .iter()
            .map(|d| d.mean_steps)
            .collect::<Vec<_>>()
    );

    // Step 3 + 4: Report
    let report_outcome = write_report(&args, &result);
    if let Err(e) = &report_outcome {
        error!("Report generation failed: {:#}", e);
    }

    // Step 5: Exports
    info!("Step 5/5: Writing exports...");
    let metrics = summary_metrics(&result);
    let export_outcome = write_exports(&args, &table, &result, &metrics);
    if let Err(e) = &export_outcome {
        error!("Export failed: {:#}", e);
    }

    if args.print_summary {
        println!("{}", render_terminal_summary(&result, &metrics));
    }

    report_outcome?;
    export_outcome?;

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Render and write the PDF report and optional SVG charts
///
/// **Private** - steps 3 and 4 of execute_report
fn write_report(args: &ReportArgs, result: &AnalysisResult) -> Result<()> {
    info!("Step 3/5: Rendering report...");
    let pages = render_pages(result, &args.report_config).context("Failed to render report pages")?;
    let mut document =
        build_pdf(&pages, &args.report_config).context("Failed to build PDF document")?;

    info!("Step 4/5: Writing report...");
    let report_path = args.report_path();
    write_pdf(&mut document, &report_path).context("Failed to write PDF report")?;
    info!("✓ Report written to: {}", report_path.display());

    if let Some(charts_dir) = &args.charts_dir {
        let charts = dashboard_charts(result).context("Failed to build dashboard charts")?;
        for chart in &charts {
            let path = charts_dir.join(format!("{}.svg", chart.slug()));
            write_svg(&render_chart_svg(chart), &path)
                .with_context(|| format!("Failed to write chart {}", path.display()))?;
        }
        info!("✓ {} charts written to: {}", charts.len(), charts_dir.display());
    }

    Ok(())
}

/// Write the CSV exports and the optional JSON dump
///
/// **Private** - step 5 of execute_report; every export is attempted
fn write_exports(
    args: &ReportArgs,
    table: &DerivedTable,
    result: &AnalysisResult,
    metrics: &[SummaryMetric],
) -> Result<()> {
    let data_path = args.data_path();
    let data = write_derived_csv(table, &data_path).context("Failed to write cleaned data CSV");
    if data.is_ok() {
        info!("✓ Cleaned data written to: {}", data_path.display());
    }

    let summary_path = args.summary_path();
    let summary = write_summary_csv(metrics, &summary_path).context("Failed to write summary CSV");
    if summary.is_ok() {
        info!("✓ Summary written to: {}", summary_path.display());
    }

    let json = match &args.json_output {
        Some(path) => {
            let outcome = write_analysis_json(result, path).context("Failed to write analysis JSON");
            if outcome.is_ok() {
                info!("✓ Analysis JSON written to: {}", path.display());
            }
            outcome
        }
        None => Ok(()),
    };

    data.and(summary).and(json)
}

/// Validate report arguments
///
/// **Public** - can be called before execute_report for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &ReportArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    for (name, value) in [
        ("report", &args.report_file),
        ("data", &args.data_file),
        ("summary", &args.summary_file),
    ] {
        if value.trim().is_empty() {
            anyhow::bail!("{} file name cannot be empty", name);
        }
    }

    let outputs = [args.report_path(), args.data_path(), args.summary_path()];
    for (i, path) in outputs.iter().enumerate() {
        if outputs[..i].contains(path) {
            anyhow::bail!("Output files must be distinct: {}", path.display());
        }
    }

    if let Some(dir) = &args.charts_dir {
        if dir.is_file() {
            anyhow::bail!("Charts directory is a file: {}", dir.display());
        }
    }

    if args.report_config.title.trim().is_empty() {
        anyhow::bail!("Report title cannot be empty");
    }

    Ok(())
}

/// Render the headline numbers for the terminal
///
/// **Public** - printed by `report --summary`
pub fn render_terminal_summary(result: &AnalysisResult, metrics: &[SummaryMetric]) -> String {
    let mut out = String::new();
    out.push_str(&format!("\n{}\n", "=".repeat(60)));
    out.push_str(&format!("{}\n", "ANALYSIS SUMMARY".bold()));
    out.push_str(&format!("{}\n", "=".repeat(60)));

    for metric in metrics {
        out.push_str(&format!("{:<26} {}\n", metric.metric, metric.value.cyan()));
    }

    out.push_str("\nUser activity levels:\n");
    for (level, share) in result.user_activity_levels.iter() {
        out.push_str(&format!("  {:<16} {:>5.1}%\n", level.label(), share));
    }

    match result.steps_calories_correlation {
        Some(r) => out.push_str(&format!("\nSteps/calories correlation: {:.2}\n", r)),
        None => out.push_str(&format!("\nSteps/calories correlation: {}\n", "n/a".yellow())),
    }
    out.push_str(&"=".repeat(60));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args_with_input(input: PathBuf) -> ReportArgs {
        ReportArgs {
            input,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_args_missing_input() {
        let args = args_with_input(PathBuf::from("definitely/not/here.csv"));
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_empty_input() {
        assert!(validate_args(&ReportArgs::default()).is_err());
    }

    #[test]
    fn test_validate_args_valid() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("daily.csv");
        std::fs::write(&input, "Id\n").unwrap();

        assert!(validate_args(&args_with_input(input)).is_ok());
    }

    #[test]
    fn test_validate_args_colliding_outputs() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("daily.csv");
        std::fs::write(&input, "Id\n").unwrap();

        let args = ReportArgs {
            summary_file: "same.csv".to_string(),
            data_file: "same.csv".to_string(),
            ..args_with_input(input)
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_blank_file_name() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("daily.csv");
        std::fs::write(&input, "Id\n").unwrap();

        let args = ReportArgs {
            report_file: "  ".to_string(),
            ..args_with_input(input)
        };
        assert!(validate_args(&args).is_err());
    }
}
