use crate::aggregator::calculate_basic_stats;
use crate::parser::load_activity_csv;
use crate::utils::config::{
    CALORIES_COLUMNS, DATE_COLUMNS, DATE_FORMATS, DERIVED_COLUMNS, FAIRLY_ACTIVE_COLUMNS,
    LIGHTLY_ACTIVE_COLUMNS, SCHEMA_VERSION, SEDENTARY_COLUMNS, TOTAL_STEPS_COLUMNS,
    USER_ID_COLUMNS, VERY_ACTIVE_COLUMNS,
};
use anyhow::{Context, Result};
use std::path::Path;

/// Load and derive an activity CSV without writing anything
pub fn validate_activity_file(file_path: &Path) -> Result<()> {
    println!("Validating activity data: {}", file_path.display());

    let table = load_activity_csv(file_path)
        .with_context(|| format!("Invalid activity data in {}", file_path.display()))?;
    let stats = calculate_basic_stats(table.records())
        .context("File contains a header but no records")?;

    println!("✓ Valid activity CSV");
    println!("  Records: {}", stats.total_records);
    println!("  Users: {}", stats.unique_users);
    println!("  Date range: {}", stats.date_range());
    println!("  Columns carried to export: {}", table.input_columns().len());
    if stats.records_over_day_length > 0 {
        println!(
            "  Records over 1,440 logged minutes: {}",
            stats.records_over_day_length
        );
    }

    Ok(())
}

/// Display accepted input columns and the export layout
pub fn display_schema(show_details: bool) {
    println!("Daily Activity Input Schema");
    println!("Analysis Schema Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Required columns (accepted header names):");
        for (field, aliases) in [
            ("user id", USER_ID_COLUMNS),
            ("date", DATE_COLUMNS),
            ("total steps", TOTAL_STEPS_COLUMNS),
            ("calories", CALORIES_COLUMNS),
            ("very active minutes", VERY_ACTIVE_COLUMNS),
            ("fairly active minutes", FAIRLY_ACTIVE_COLUMNS),
            ("lightly active minutes", LIGHTLY_ACTIVE_COLUMNS),
            ("sedentary minutes", SEDENTARY_COLUMNS),
        ] {
            println!("  {:<24} {}", field, aliases.join(", "));
        }
        println!();
        println!("Date formats: {}", DATE_FORMATS.join(", "));
        println!("Other columns are carried through to the cleaned-data export.");
        println!("Derived columns appended on export: {}", DERIVED_COLUMNS.join(", "));
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("Activity Insights v{}", env!("CARGO_PKG_VERSION"));
    println!("Analysis Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Descriptive analysis and PDF reporting for daily fitness tracker exports.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_header_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(
            &path,
            "Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes\n",
        )
        .unwrap();

        assert!(validate_activity_file(&path).is_err());
    }

    #[test]
    fn test_validate_good_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("daily.csv");
        std::fs::write(
            &path,
            "Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes\n\
             1,4/12/2016,1000,1500,0,0,60,1200\n",
        )
        .unwrap();

        assert!(validate_activity_file(&path).is_ok());
    }
}
