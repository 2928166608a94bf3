//! Configuration and constants for the pipeline.

/// Version tag written into the JSON analysis dump
pub const SCHEMA_VERSION: &str = "1.0.0";

// Step thresholds for the activity-level buckets (half-open, lower bound inclusive)
pub const LIGHTLY_ACTIVE_MIN_STEPS: f64 = 5_000.0;
pub const FAIRLY_ACTIVE_MIN_STEPS: f64 = 7_500.0;
pub const VERY_ACTIVE_MIN_STEPS: f64 = 10_000.0;

/// Minutes in a calendar day; logged minute fields should not sum past this
pub const MINUTES_PER_DAY: f64 = 1_440.0;

/// Accepted date formats, tried in order
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

/// Format used when writing dates back out
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

// Header aliases for each required input column (exports use different casings)
pub const USER_ID_COLUMNS: &[&str] = &["Id", "UserId", "user_id", "id"];
pub const DATE_COLUMNS: &[&str] = &["ActivityDate", "Date", "activity_date", "date"];
pub const TOTAL_STEPS_COLUMNS: &[&str] = &["TotalSteps", "Steps", "total_steps", "steps"];
pub const CALORIES_COLUMNS: &[&str] = &["Calories", "calories"];
pub const VERY_ACTIVE_COLUMNS: &[&str] = &["VeryActiveMinutes", "very_active_minutes"];
pub const FAIRLY_ACTIVE_COLUMNS: &[&str] = &["FairlyActiveMinutes", "fairly_active_minutes"];
pub const LIGHTLY_ACTIVE_COLUMNS: &[&str] = &["LightlyActiveMinutes", "lightly_active_minutes"];
pub const SEDENTARY_COLUMNS: &[&str] = &["SedentaryMinutes", "sedentary_minutes"];

// Derived columns appended to the cleaned-data export
pub const DERIVED_COLUMNS: &[&str] = &[
    "ActivityLevel",
    "DayOfWeek",
    "TotalActiveMinutes",
    "ActivityPercentage",
    "IsWeekend",
];

// Default output file names
pub const DEFAULT_REPORT_FILE: &str = "bellabeat_analysis_report.pdf";
pub const DEFAULT_DATA_FILE: &str = "bellabeat_cleaned_data.csv";
pub const DEFAULT_SUMMARY_FILE: &str = "analysis_summary.csv";

// Report titles
pub const DEFAULT_REPORT_TITLE: &str = "Bellabeat Case Study Analysis Report";
pub const DEFAULT_DASHBOARD_TITLE: &str = "FitBit Data Analysis Dashboard - Bellabeat Case Study";
