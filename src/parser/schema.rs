//! Record types for the daily activity table.
//!
//! An [`ActivityRecord`] carries the raw measurements of one user-day plus the
//! fields derived from them. Derived fields are computed exactly once, in
//! [`ActivityRecord::derive`], and the table hands records out by shared
//! reference only.

use crate::utils::config::{
    FAIRLY_ACTIVE_MIN_STEPS, LIGHTLY_ACTIVE_MIN_STEPS, MINUTES_PER_DAY, OUTPUT_DATE_FORMAT,
    VERY_ACTIVE_MIN_STEPS,
};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Days in report order
pub const WEEK_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Activity bucket assigned from a step count
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityLevel {
    #[serde(rename = "Sedentary")]
    Sedentary,
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    #[serde(rename = "Fairly Active")]
    FairlyActive,
    #[serde(rename = "Very Active")]
    VeryActive,
}

impl ActivityLevel {
    /// All buckets, least to most active
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::FairlyActive,
        ActivityLevel::VeryActive,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::FairlyActive => "Fairly Active",
            ActivityLevel::VeryActive => "Very Active",
        }
    }

    /// Step range as printed in the detail page
    pub fn step_range(self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "<5000 steps",
            ActivityLevel::LightlyActive => "5000-7499",
            ActivityLevel::FairlyActive => "7500-9999",
            ActivityLevel::VeryActive => "10000+",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a step count into its activity bucket
///
/// **Public** - shared by record derivation and the per-user aggregation
///
/// Buckets are half-open with an inclusive lower bound:
/// `< 5000` Sedentary, `[5000, 7500)` Lightly Active, `[7500, 10000)` Fairly
/// Active, `>= 10000` Very Active. A NaN step count (empty input cell) falls
/// through every comparison and lands in Sedentary.
pub fn classify_activity_level(steps: f64) -> ActivityLevel {
    if steps >= VERY_ACTIVE_MIN_STEPS {
        ActivityLevel::VeryActive
    } else if steps >= FAIRLY_ACTIVE_MIN_STEPS {
        ActivityLevel::FairlyActive
    } else if steps >= LIGHTLY_ACTIVE_MIN_STEPS {
        ActivityLevel::LightlyActive
    } else {
        ActivityLevel::Sedentary
    }
}

/// Full English day name ("Monday")
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Serde helper writing a weekday as its full name
pub fn serialize_day_name<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(day_name(*day))
}

/// Measurements of one user-day as read from input
#[derive(Debug, Clone, PartialEq)]
pub struct RawActivity {
    pub user_id: String,
    pub date: NaiveDate,
    pub total_steps: f64,
    pub calories: f64,
    pub very_active_minutes: f64,
    pub fairly_active_minutes: f64,
    pub lightly_active_minutes: f64,
    pub sedentary_minutes: f64,
}

/// One user's activity for one calendar day, with derived fields
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRecord {
    pub user_id: String,
    pub date: NaiveDate,
    pub total_steps: f64,
    pub calories: f64,
    pub very_active_minutes: f64,
    pub fairly_active_minutes: f64,
    pub lightly_active_minutes: f64,
    pub sedentary_minutes: f64,

    /// Bucket of `total_steps`
    pub activity_level: ActivityLevel,

    /// Weekday of the naive `date` (no timezone conversion)
    pub day_of_week: Weekday,

    /// Very + fairly + lightly active minutes
    pub total_active_minutes: f64,

    /// Active share of logged minutes, 0.0 when nothing was logged
    pub activity_percentage: f64,

    /// Saturday or Sunday
    pub is_weekend: bool,
}

impl ActivityRecord {
    /// Build a record and compute its derived fields
    ///
    /// **Public** - the only place derived fields are computed
    pub fn derive(raw: RawActivity) -> Self {
        let total_active_minutes =
            raw.very_active_minutes + raw.fairly_active_minutes + raw.lightly_active_minutes;
        let logged_minutes = total_active_minutes + raw.sedentary_minutes;
        let activity_percentage = if logged_minutes == 0.0 {
            0.0
        } else {
            total_active_minutes / logged_minutes * 100.0
        };
        let day_of_week = raw.date.weekday();

        Self {
            activity_level: classify_activity_level(raw.total_steps),
            day_of_week,
            total_active_minutes,
            activity_percentage,
            is_weekend: matches!(day_of_week, Weekday::Sat | Weekday::Sun),
            user_id: raw.user_id,
            date: raw.date,
            total_steps: raw.total_steps,
            calories: raw.calories,
            very_active_minutes: raw.very_active_minutes,
            fairly_active_minutes: raw.fairly_active_minutes,
            lightly_active_minutes: raw.lightly_active_minutes,
            sedentary_minutes: raw.sedentary_minutes,
        }
    }

    /// True when the logged minutes add up to more than a day
    pub fn exceeds_day_length(&self) -> bool {
        self.total_active_minutes + self.sedentary_minutes > MINUTES_PER_DAY
    }
}

/// Canonical input columns used when a table is built from records directly
const CANONICAL_COLUMNS: [&str; 8] = [
    "Id",
    "ActivityDate",
    "TotalSteps",
    "Calories",
    "VeryActiveMinutes",
    "FairlyActiveMinutes",
    "LightlyActiveMinutes",
    "SedentaryMinutes",
];

/// The derived activity table
///
/// Immutable once built. Besides the records it keeps every input column
/// verbatim (minus columns named like a derived column) so the cleaned-data
/// export mirrors the input file.
#[derive(Debug, Clone)]
pub struct DerivedTable {
    input_columns: Vec<String>,
    date_position: usize,
    records: Vec<ActivityRecord>,
    cells: Vec<Vec<String>>,
}

impl DerivedTable {
    /// Assemble a table from loader output
    ///
    /// `cells[i]` holds the pass-through input cells of `records[i]`, aligned
    /// with `input_columns`; `date_position` indexes the date column.
    pub(crate) fn new(
        input_columns: Vec<String>,
        date_position: usize,
        records: Vec<ActivityRecord>,
        cells: Vec<Vec<String>>,
    ) -> Self {
        debug_assert_eq!(records.len(), cells.len());
        Self {
            input_columns,
            date_position,
            records,
            cells,
        }
    }

    /// Build a table from already-derived records, using canonical column names
    pub fn from_records(records: Vec<ActivityRecord>) -> Self {
        let cells = records
            .iter()
            .map(|r| {
                vec![
                    r.user_id.clone(),
                    r.date.format(OUTPUT_DATE_FORMAT).to_string(),
                    r.total_steps.to_string(),
                    r.calories.to_string(),
                    r.very_active_minutes.to_string(),
                    r.fairly_active_minutes.to_string(),
                    r.lightly_active_minutes.to_string(),
                    r.sedentary_minutes.to_string(),
                ]
            })
            .collect();

        Self::new(
            CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect(),
            1,
            records,
            cells,
        )
    }

    pub fn records(&self) -> &[ActivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Input column names carried through to the export
    pub fn input_columns(&self) -> &[String] {
        &self.input_columns
    }

    /// Position of the date column within [`Self::input_columns`]
    pub fn date_position(&self) -> usize {
        self.date_position
    }

    /// Records paired with their pass-through input cells, in input order
    pub fn rows(&self) -> impl Iterator<Item = (&ActivityRecord, &[String])> {
        self.records
            .iter()
            .zip(self.cells.iter().map(Vec::as_slice))
    }
}
