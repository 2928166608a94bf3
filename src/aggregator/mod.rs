//! Aggregation of the derived activity table into report statistics.
//!
//! This module transforms the derived records into:
//! - Basic dataset statistics and daily column means
//! - Record-level and user-level activity distributions
//! - Weekly patterns and the weekend/weekday comparison

pub mod accumulator;
pub mod metrics;
pub mod results;

// Re-export main types and functions
pub use accumulator::{MeanAccumulator, PearsonAccumulator};
pub use metrics::{
    analyze, calculate_activity_distribution, calculate_basic_stats, calculate_user_activity_levels,
    calculate_weekend_comparison, calculate_weekly_patterns,
};
pub use results::{
    AnalysisResult, BasicStats, DailyAverages, DayAverage, GroupMeans, LevelDistribution,
    WeekendComparison, WeeklyPatterns,
};
