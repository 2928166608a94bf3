//! Analysis result types.
//!
//! Everything the report and exports read comes out of one
//! [`AnalysisResult`], computed once from the derived table.

use crate::parser::schema::{day_name, serialize_day_name, ActivityLevel, WEEK_ORDER};
use chrono::{NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeMap;

/// Complete output of the aggregation stage
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub basic_stats: BasicStats,

    /// Means of the direct measurement columns
    pub daily_averages: DailyAverages,

    /// Share of records per activity level
    pub activity_distribution: LevelDistribution,

    /// Share of users per activity level, bucketed from each user's mean steps
    pub user_activity_levels: LevelDistribution,

    /// Mean steps per weekday, Monday to Sunday
    pub weekly_patterns: WeeklyPatterns,

    pub weekend_comparison: WeekendComparison,

    /// Pearson correlation between daily steps and calories
    pub steps_calories_correlation: Option<f64>,
}

/// Dataset-level figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub total_records: usize,
    pub unique_users: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub avg_steps: f64,
    pub avg_calories: f64,
    pub avg_sedentary_hours: f64,

    /// Records whose logged minutes exceed a calendar day
    pub records_over_day_length: usize,
}

impl BasicStats {
    /// Inclusive date range, e.g. "2016-04-12 to 2016-05-12"
    pub fn date_range(&self) -> String {
        format!(
            "{} to {}",
            self.first_date.format("%Y-%m-%d"),
            self.last_date.format("%Y-%m-%d")
        )
    }
}

/// Mean of each measurement column across all records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyAverages {
    pub steps: f64,
    pub very_active_minutes: f64,
    pub fairly_active_minutes: f64,
    pub lightly_active_minutes: f64,
    pub sedentary_minutes: f64,
}

/// Percentage per activity level
///
/// Built by the aggregator with all four levels present (0.0 for empty
/// buckets). Lookups still go through [`LevelDistribution::share`] so a
/// distribution assembled elsewhere with missing keys is caught by the
/// renderer instead of silently reading as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct LevelDistribution(BTreeMap<ActivityLevel, f64>);

impl LevelDistribution {
    /// Percentages from bucket counts; every level gets an entry
    pub fn from_counts(counts: &BTreeMap<ActivityLevel, usize>, total: usize) -> Self {
        let shares = ActivityLevel::ALL
            .iter()
            .map(|&level| {
                let count = counts.get(&level).copied().unwrap_or(0);
                (level, percentage(count, total))
            })
            .collect();
        Self(shares)
    }

    pub fn share(&self, level: ActivityLevel) -> Option<f64> {
        self.0.get(&level).copied()
    }

    /// Entries in level order
    pub fn iter(&self) -> impl Iterator<Item = (ActivityLevel, f64)> + '_ {
        self.0.iter().map(|(&level, &share)| (level, share))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all shares (100 for a non-empty input)
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(ActivityLevel, f64)> for LevelDistribution {
    fn from_iter<I: IntoIterator<Item = (ActivityLevel, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Mean steps for one weekday
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DayAverage {
    #[serde(serialize_with = "serialize_day_name")]
    pub day: Weekday,

    /// `None` when no record falls on this weekday
    pub mean_steps: Option<f64>,
}

/// Mean steps per weekday, always seven entries Monday to Sunday
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WeeklyPatterns(Vec<DayAverage>);

impl WeeklyPatterns {
    /// Build from per-weekday means indexed Monday = 0
    pub fn from_means(means: [Option<f64>; 7]) -> Self {
        Self(
            WEEK_ORDER
                .iter()
                .zip(means)
                .map(|(&day, mean_steps)| DayAverage { day, mean_steps })
                .collect(),
        )
    }

    pub fn days(&self) -> &[DayAverage] {
        &self.0
    }

    pub fn get(&self, day: Weekday) -> Option<f64> {
        self.0
            .iter()
            .find(|d| d.day == day)
            .and_then(|d| d.mean_steps)
    }

    /// Day with the highest mean; ties go to the earliest day in the week
    pub fn most_active(&self) -> Option<Weekday> {
        self.extreme(|candidate, best| candidate > best)
    }

    /// Day with the lowest mean; ties go to the earliest day in the week
    pub fn least_active(&self) -> Option<Weekday> {
        self.extreme(|candidate, best| candidate < best)
    }

    fn extreme(&self, better: impl Fn(f64, f64) -> bool) -> Option<Weekday> {
        let mut best: Option<(Weekday, f64)> = None;
        for entry in &self.0 {
            let Some(mean) = entry.mean_steps else {
                continue;
            };
            if mean.is_nan() {
                continue;
            }
            match best {
                Some((_, current)) if !better(mean, current) => {}
                _ => best = Some((entry.day, mean)),
            }
        }
        best.map(|(day, _)| day)
    }
}

/// Means for one side of the weekend/weekday split
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans {
    pub records: usize,
    pub mean_steps: f64,
    pub mean_very_active_minutes: f64,
    pub mean_sedentary_minutes: f64,
}

/// Weekend versus weekday means; a side with no records is `None`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekendComparison {
    pub weekday: Option<GroupMeans>,
    pub weekend: Option<GroupMeans>,
}

/// Percentage of `part` in `total`, 0.0 when `total` is zero
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Weekday name or "n/a"
pub fn day_label(day: Option<Weekday>) -> &'static str {
    day.map(day_name).unwrap_or("n/a")
}
