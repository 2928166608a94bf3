//! Compute descriptive statistics from the derived activity table.
//!
//! Every statistic is an explicit group-by: accumulators keyed by the group
//! value, means read at the end. The table is only ever borrowed.

use super::accumulator::{MeanAccumulator, PearsonAccumulator};
use super::results::{
    AnalysisResult, BasicStats, DailyAverages, GroupMeans, LevelDistribution, WeekendComparison,
    WeeklyPatterns,
};
use crate::parser::schema::{classify_activity_level, ActivityLevel, ActivityRecord, DerivedTable};
use crate::utils::error::AnalysisError;
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};

/// Run every aggregation over the derived table
///
/// **Public** - main entry point for the aggregation stage
///
/// # Arguments
/// * `table` - Derived activity table from the loader
///
/// # Returns
/// The complete analysis; calling this twice on the same table yields equal results
///
/// # Errors
/// * `AnalysisError::NoRecords` - The table is empty
pub fn analyze(table: &DerivedTable) -> Result<AnalysisResult, AnalysisError> {
    let records = table.records();

    debug!("Aggregating {} records", records.len());

    let basic_stats = calculate_basic_stats(records)?;
    let result = AnalysisResult {
        daily_averages: calculate_daily_averages(records),
        activity_distribution: calculate_activity_distribution(records),
        user_activity_levels: calculate_user_activity_levels(records),
        weekly_patterns: calculate_weekly_patterns(records),
        weekend_comparison: calculate_weekend_comparison(records),
        steps_calories_correlation: calculate_steps_calories_correlation(records),
        basic_stats,
    };

    info!(
        "Analysis: {} records, {} users, {:.0} mean steps",
        result.basic_stats.total_records,
        result.basic_stats.unique_users,
        result.basic_stats.avg_steps
    );

    Ok(result)
}

/// Record and user counts, date range and headline means
///
/// **Public** - also used standalone by the validate command
///
/// # Errors
/// * `AnalysisError::NoRecords` - No records to take a date range from
pub fn calculate_basic_stats(records: &[ActivityRecord]) -> Result<BasicStats, AnalysisError> {
    let first_date = records
        .iter()
        .map(|r| r.date)
        .min()
        .ok_or(AnalysisError::NoRecords)?;
    let last_date = records
        .iter()
        .map(|r| r.date)
        .max()
        .ok_or(AnalysisError::NoRecords)?;

    Ok(BasicStats {
        total_records: records.len(),
        unique_users: count_unique_users(records),
        first_date,
        last_date,
        avg_steps: mean_of(records, |r| r.total_steps),
        avg_calories: mean_of(records, |r| r.calories),
        avg_sedentary_hours: mean_of(records, |r| r.sedentary_minutes) / 60.0,
        records_over_day_length: records.iter().filter(|r| r.exceeds_day_length()).count(),
    })
}

/// Number of distinct user ids
pub fn count_unique_users(records: &[ActivityRecord]) -> usize {
    records
        .iter()
        .map(|r| r.user_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Means of the five measurement columns plotted on the dashboard
pub fn calculate_daily_averages(records: &[ActivityRecord]) -> DailyAverages {
    DailyAverages {
        steps: mean_of(records, |r| r.total_steps),
        very_active_minutes: mean_of(records, |r| r.very_active_minutes),
        fairly_active_minutes: mean_of(records, |r| r.fairly_active_minutes),
        lightly_active_minutes: mean_of(records, |r| r.lightly_active_minutes),
        sedentary_minutes: mean_of(records, |r| r.sedentary_minutes),
    }
}

/// Share of records in each activity level
///
/// **Public** - record-level distribution; all four levels always present
pub fn calculate_activity_distribution(records: &[ActivityRecord]) -> LevelDistribution {
    let mut counts: BTreeMap<ActivityLevel, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.activity_level).or_insert(0) += 1;
    }
    LevelDistribution::from_counts(&counts, records.len())
}

/// Share of users in each activity level
///
/// **Public** - user-level distribution
///
/// Each user is classified once, from the mean of their daily steps, with the
/// same thresholds as individual records. This differs from the record-level
/// distribution whenever a user's days fall into different buckets.
pub fn calculate_user_activity_levels(records: &[ActivityRecord]) -> LevelDistribution {
    let mut per_user: BTreeMap<&str, MeanAccumulator> = BTreeMap::new();
    for record in records {
        per_user
            .entry(record.user_id.as_str())
            .or_default()
            .push(record.total_steps);
    }

    let mut counts: BTreeMap<ActivityLevel, usize> = BTreeMap::new();
    for (user, steps) in &per_user {
        let mean = steps.mean().unwrap_or(f64::NAN);
        let level = classify_activity_level(mean);
        debug!("User {} averages {:.0} steps ({})", user, mean, level);
        *counts.entry(level).or_insert(0) += 1;
    }

    LevelDistribution::from_counts(&counts, per_user.len())
}

/// Mean steps per weekday in Monday to Sunday order
///
/// **Public** - days without records report `None`
pub fn calculate_weekly_patterns(records: &[ActivityRecord]) -> WeeklyPatterns {
    let mut days = [MeanAccumulator::default(); 7];
    for record in records {
        days[record.day_of_week.num_days_from_monday() as usize].push(record.total_steps);
    }
    WeeklyPatterns::from_means(days.map(|acc| acc.mean()))
}

/// Weekend versus weekday means of steps, very active and sedentary minutes
pub fn calculate_weekend_comparison(records: &[ActivityRecord]) -> WeekendComparison {
    let group = |weekend: bool| -> Option<GroupMeans> {
        let mut steps = MeanAccumulator::new();
        let mut very_active = MeanAccumulator::new();
        let mut sedentary = MeanAccumulator::new();

        for record in records.iter().filter(|r| r.is_weekend == weekend) {
            steps.push(record.total_steps);
            very_active.push(record.very_active_minutes);
            sedentary.push(record.sedentary_minutes);
        }

        Some(GroupMeans {
            records: steps.count,
            mean_steps: steps.mean()?,
            mean_very_active_minutes: very_active.mean()?,
            mean_sedentary_minutes: sedentary.mean()?,
        })
    };

    WeekendComparison {
        weekday: group(false),
        weekend: group(true),
    }
}

/// Mean of one column; NaN for an empty slice
fn mean_of(records: &[ActivityRecord], field: fn(&ActivityRecord) -> f64) -> f64 {
    records
        .iter()
        .map(field)
        .collect::<MeanAccumulator>()
        .mean()
        .unwrap_or(f64::NAN)
}

/// Pearson correlation between steps and calories across all records
pub fn calculate_steps_calories_correlation(records: &[ActivityRecord]) -> Option<f64> {
    let mut acc = PearsonAccumulator::new();
    for record in records {
        acc.push(record.total_steps, record.calories);
    }
    acc.correlation()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::RawActivity;
    use chrono::{NaiveDate, Weekday};

    fn record(user: &str, date: (i32, u32, u32), steps: f64, calories: f64) -> ActivityRecord {
        ActivityRecord::derive(RawActivity {
            user_id: user.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            total_steps: steps,
            calories,
            very_active_minutes: 10.0,
            fairly_active_minutes: 5.0,
            lightly_active_minutes: 100.0,
            sedentary_minutes: 600.0,
        })
    }

    #[test]
    fn test_analyze_empty_table() {
        let table = DerivedTable::from_records(Vec::new());
        assert!(matches!(analyze(&table), Err(AnalysisError::NoRecords)));
    }

    #[test]
    fn test_basic_stats() {
        let records = vec![
            record("a", (2016, 4, 12), 1000.0, 1500.0),
            record("b", (2016, 4, 14), 3000.0, 2500.0),
            record("a", (2016, 4, 13), 2000.0, 2000.0),
        ];

        let stats = calculate_basic_stats(&records).unwrap();

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.unique_users, 2);
        assert_eq!(stats.date_range(), "2016-04-12 to 2016-04-14");
        assert_eq!(stats.avg_steps, 2000.0);
        assert_eq!(stats.avg_calories, 2000.0);
        assert_eq!(stats.avg_sedentary_hours, 10.0);
        assert_eq!(stats.records_over_day_length, 0);
    }

    #[test]
    fn test_activity_distribution_zero_buckets_present() {
        let records = vec![
            record("a", (2016, 4, 11), 12000.0, 2000.0),
            record("a", (2016, 4, 12), 11000.0, 2000.0),
        ];

        let dist = calculate_activity_distribution(&records);

        assert_eq!(dist.len(), 4);
        assert_eq!(dist.share(ActivityLevel::VeryActive), Some(100.0));
        assert_eq!(dist.share(ActivityLevel::Sedentary), Some(0.0));
    }

    #[test]
    fn test_user_levels_use_mean_steps() {
        // One user, one day in each extreme bucket; mean lands in Fairly Active
        let records = vec![
            record("a", (2016, 4, 11), 3000.0, 2000.0),
            record("a", (2016, 4, 12), 12000.0, 2000.0),
        ];

        let users = calculate_user_activity_levels(&records);
        let days = calculate_activity_distribution(&records);

        assert_eq!(users.share(ActivityLevel::FairlyActive), Some(100.0));
        assert_eq!(days.share(ActivityLevel::FairlyActive), Some(0.0));
        assert_ne!(users, days);
    }

    #[test]
    fn test_weekly_patterns_fixed_order() {
        let records = vec![
            record("a", (2016, 4, 17), 7000.0, 2000.0), // Sunday
            record("a", (2016, 4, 11), 3000.0, 2000.0), // Monday
            record("b", (2016, 4, 11), 8000.0, 2000.0), // Monday
        ];

        let patterns = calculate_weekly_patterns(&records);
        let days: Vec<Weekday> = patterns.days().iter().map(|d| d.day).collect();

        assert_eq!(days.first(), Some(&Weekday::Mon));
        assert_eq!(days.last(), Some(&Weekday::Sun));
        assert_eq!(patterns.get(Weekday::Mon), Some(5500.0));
        assert_eq!(patterns.get(Weekday::Sun), Some(7000.0));
        assert_eq!(patterns.get(Weekday::Wed), None);
    }

    #[test]
    fn test_weekend_comparison_missing_side() {
        let records = vec![record("a", (2016, 4, 11), 3000.0, 2000.0)];

        let comparison = calculate_weekend_comparison(&records);

        let weekday = comparison.weekday.unwrap();
        assert_eq!(weekday.records, 1);
        assert_eq!(weekday.mean_steps, 3000.0);
        assert_eq!(weekday.mean_very_active_minutes, 10.0);
        assert_eq!(weekday.mean_sedentary_minutes, 600.0);
        assert!(comparison.weekend.is_none());
    }

    #[test]
    fn test_correlation_from_records() {
        let records = vec![
            record("a", (2016, 4, 11), 1000.0, 1500.0),
            record("a", (2016, 4, 12), 2000.0, 1700.0),
            record("a", (2016, 4, 13), 3000.0, 1900.0),
        ];

        let r = calculate_steps_calories_correlation(&records).unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let table = DerivedTable::from_records(vec![
            record("b", (2016, 4, 11), 6000.0, 2100.0),
            record("a", (2016, 4, 16), 9000.0, 2600.0),
        ]);

        assert_eq!(analyze(&table).unwrap(), analyze(&table).unwrap());
    }
}
