//! Loader for daily activity CSV exports.
//!
//! Resolves the required columns by header name, parses dates and
//! measurements, and derives every record once. Parsing is strict about
//! structure (missing columns, unparseable dates and non-numeric text are
//! fatal) and lenient about values: empty measurement cells become NaN and
//! negative values are kept as they are.

use super::schema::{ActivityRecord, DerivedTable, RawActivity};
use crate::utils::config::{
    CALORIES_COLUMNS, DATE_COLUMNS, DATE_FORMATS, DERIVED_COLUMNS, FAIRLY_ACTIVE_COLUMNS,
    LIGHTLY_ACTIVE_COLUMNS, SEDENTARY_COLUMNS, TOTAL_STEPS_COLUMNS, USER_ID_COLUMNS,
    VERY_ACTIVE_COLUMNS,
};
use crate::utils::error::LoadError;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Load and derive an activity table from a CSV file
///
/// **Public** - main entry point for loading
///
/// # Arguments
/// * `path` - Path to a CSV file with a header row
///
/// # Returns
/// The derived table, one record per input row, in input order
///
/// # Errors
/// * `LoadError::Io` - File cannot be opened
/// * `LoadError::MissingColumn` - A required column is absent
/// * `LoadError::InvalidDate` - A date matches none of the accepted formats
/// * `LoadError::InvalidNumber` - A measurement cell holds non-numeric text
/// * `LoadError::Csv` - Malformed CSV (ragged rows, bad quoting)
pub fn load_activity_csv(path: impl AsRef<Path>) -> Result<DerivedTable, LoadError> {
    let path = path.as_ref();

    info!("Loading activity data from: {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_activity_reader(file)
}

/// Load and derive an activity table from any reader
///
/// **Public** - same contract as [`load_activity_csv`], used for in-memory input
pub fn load_activity_reader<R: Read>(reader: R) -> Result<DerivedTable, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let layout = ColumnLayout::resolve(&headers)?;

    debug!(
        "Resolved {} input columns ({} carried through to export)",
        headers.len(),
        layout.passthrough.len()
    );

    let mut records = Vec::new();
    let mut cells = Vec::new();
    let mut empty_cells = 0usize;

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        // Line 1 is the header
        let row_number = index + 2;

        let raw = layout.parse_row(&row, row_number, &mut empty_cells)?;
        records.push(ActivityRecord::derive(raw));
        cells.push(layout.passthrough_cells(&row));
    }

    if empty_cells > 0 {
        warn!(
            "{} empty measurement cells passed through as NaN",
            empty_cells
        );
    }

    let over_day = records.iter().filter(|r| r.exceeds_day_length()).count();
    if over_day > 0 {
        warn!(
            "{} records log more than 1440 minutes in a day (kept as-is)",
            over_day
        );
    }

    let unique_users = records
        .iter()
        .map(|r| r.user_id.as_str())
        .collect::<HashSet<_>>()
        .len();
    info!(
        "Loaded {} records from {} users",
        records.len(),
        unique_users
    );

    let input_columns = layout
        .passthrough
        .iter()
        .map(|&i| headers[i].to_string())
        .collect();

    Ok(DerivedTable::new(
        input_columns,
        layout.date_position,
        records,
        cells,
    ))
}

/// Parse a date in any of the accepted formats
///
/// **Public** - also used to validate single values
pub fn parse_activity_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Column positions resolved from the header row
///
/// **Private** - internal to the loader
struct ColumnLayout {
    user_id: usize,
    date: usize,
    total_steps: usize,
    calories: usize,
    very_active: usize,
    fairly_active: usize,
    lightly_active: usize,
    sedentary: usize,
    /// Input columns written back out, in input order
    passthrough: Vec<usize>,
    /// Position of the date column within `passthrough`
    date_position: usize,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        let date = find_column(headers, "date", DATE_COLUMNS)?;

        // Derived columns are recomputed; an input carrying them (a re-loaded
        // export) would otherwise duplicate them
        let passthrough: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, name)| !DERIVED_COLUMNS.contains(name))
            .map(|(i, _)| i)
            .collect();

        let date_position = passthrough
            .iter()
            .position(|&i| i == date)
            .unwrap_or_default();

        Ok(Self {
            user_id: find_column(headers, "user id", USER_ID_COLUMNS)?,
            date,
            total_steps: find_column(headers, "total steps", TOTAL_STEPS_COLUMNS)?,
            calories: find_column(headers, "calories", CALORIES_COLUMNS)?,
            very_active: find_column(headers, "very active minutes", VERY_ACTIVE_COLUMNS)?,
            fairly_active: find_column(headers, "fairly active minutes", FAIRLY_ACTIVE_COLUMNS)?,
            lightly_active: find_column(
                headers,
                "lightly active minutes",
                LIGHTLY_ACTIVE_COLUMNS,
            )?,
            sedentary: find_column(headers, "sedentary minutes", SEDENTARY_COLUMNS)?,
            passthrough,
            date_position,
        })
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        row_number: usize,
        empty_cells: &mut usize,
    ) -> Result<RawActivity, LoadError> {
        let cell = |index: usize| row.get(index).unwrap_or("");

        let date_value = cell(self.date);
        let date = parse_activity_date(date_value).ok_or_else(|| LoadError::InvalidDate {
            row: row_number,
            value: date_value.to_string(),
        })?;

        let mut number = |index: usize, column: &str| -> Result<f64, LoadError> {
            let value = cell(index);
            if value.is_empty() {
                *empty_cells += 1;
                return Ok(f64::NAN);
            }
            value.parse::<f64>().map_err(|_| LoadError::InvalidNumber {
                row: row_number,
                column: column.to_string(),
                value: value.to_string(),
            })
        };

        Ok(RawActivity {
            user_id: cell(self.user_id).to_string(),
            date,
            total_steps: number(self.total_steps, "total steps")?,
            calories: number(self.calories, "calories")?,
            very_active_minutes: number(self.very_active, "very active minutes")?,
            fairly_active_minutes: number(self.fairly_active, "fairly active minutes")?,
            lightly_active_minutes: number(self.lightly_active, "lightly active minutes")?,
            sedentary_minutes: number(self.sedentary, "sedentary minutes")?,
        })
    }

    fn passthrough_cells(&self, row: &StringRecord) -> Vec<String> {
        self.passthrough
            .iter()
            .map(|&i| row.get(i).unwrap_or("").to_string())
            .collect()
    }
}

/// Find the first header matching any alias
///
/// **Private** - internal helper for ColumnLayout::resolve
fn find_column(
    headers: &StringRecord,
    column: &'static str,
    aliases: &[&str],
) -> Result<usize, LoadError> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == *alias))
        .ok_or_else(|| LoadError::MissingColumn {
            column,
            aliases: aliases.join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::ActivityLevel;
    use chrono::Weekday;

    const FITBIT_CSV: &str = "\
Id,ActivityDate,TotalSteps,TotalDistance,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,Calories
1503960366,4/12/2016,13162,8.5,25,13,328,728,1985
1503960366,4/13/2016,10735,6.97,21,19,217,776,1797
";

    #[test]
    fn test_load_fitbit_layout() {
        let table = load_activity_reader(FITBIT_CSV.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.user_id, "1503960366");
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2016, 4, 12).unwrap());
        assert_eq!(first.day_of_week, Weekday::Tue);
        assert_eq!(first.total_steps, 13162.0);
        assert_eq!(first.calories, 1985.0);
        assert_eq!(first.total_active_minutes, 366.0);
        assert_eq!(first.activity_level, ActivityLevel::VeryActive);
    }

    #[test]
    fn test_passthrough_keeps_unmodelled_columns() {
        let table = load_activity_reader(FITBIT_CSV.as_bytes()).unwrap();

        assert!(table.input_columns().iter().any(|c| c == "TotalDistance"));
        assert_eq!(table.input_columns()[table.date_position()], "ActivityDate");
    }

    #[test]
    fn test_parse_activity_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2016, 4, 12).unwrap();
        assert_eq!(parse_activity_date("2016-04-12"), Some(expected));
        assert_eq!(parse_activity_date("4/12/2016"), Some(expected));
        assert_eq!(parse_activity_date("04/12/2016"), Some(expected));
        assert_eq!(parse_activity_date("12.04.2016"), None);
        assert_eq!(parse_activity_date(""), None);
    }

    #[test]
    fn test_invalid_date_reports_row() {
        let input = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
a,2016-04-12,100,1800,0,0,10,1000
a,not-a-date,100,1800,0,0,10,1000
";
        let err = load_activity_reader(input.as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidDate { row, value } => {
                assert_eq!(row, 3);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_column() {
        let input = "Id,ActivityDate,TotalSteps\na,2016-04-12,100\n";
        let err = load_activity_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "calories",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_cell_becomes_nan_and_negative_kept() {
        let input = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
a,2016-04-12,,1800,0,0,10,-5
";
        let table = load_activity_reader(input.as_bytes()).unwrap();
        let record = &table.records()[0];
        assert!(record.total_steps.is_nan());
        assert_eq!(record.sedentary_minutes, -5.0);
    }

    #[test]
    fn test_non_numeric_measurement_is_fatal() {
        let input = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes
a,2016-04-12,lots,1800,0,0,10,1000
";
        let err = load_activity_reader(input.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidNumber { row: 2, .. }));
    }

    #[test]
    fn test_derived_input_columns_are_ignored() {
        let input = "\
Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes,ActivityLevel
a,2016-04-12,12000,1800,0,0,10,1000,Sedentary
";
        let table = load_activity_reader(input.as_bytes()).unwrap();
        assert_eq!(table.records()[0].activity_level, ActivityLevel::VeryActive);
        assert!(!table.input_columns().iter().any(|c| c == "ActivityLevel"));
    }

    #[test]
    fn test_header_only_input_is_empty_table() {
        let input = "Id,ActivityDate,TotalSteps,Calories,VeryActiveMinutes,FairlyActiveMinutes,LightlyActiveMinutes,SedentaryMinutes\n";
        let table = load_activity_reader(input.as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
