//! Chart content for the dashboard page.
//!
//! Each chart takes its data from exactly one field of the analysis result
//! and does no aggregation of its own.

use crate::aggregator::results::{AnalysisResult, DailyAverages, LevelDistribution, WeeklyPatterns};
use crate::parser::schema::{day_name, ActivityLevel};
use crate::utils::error::RenderError;

/// An sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `#rrggbb` for SVG
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Components in 0..=1 for PDF color operators
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.0 as f32 / 255.0,
            self.1 as f32 / 255.0,
            self.2 as f32 / 255.0,
        )
    }
}

// Palette
pub const LEVEL_COLORS: [Rgb; 4] = [
    Rgb(0xE7, 0x4C, 0x3C),
    Rgb(0xF3, 0x9C, 0x12),
    Rgb(0xF1, 0xC4, 0x0F),
    Rgb(0x27, 0xAE, 0x60),
];
pub const METRIC_COLORS: [Rgb; 5] = [
    Rgb(0x34, 0x98, 0xDB),
    Rgb(0xE7, 0x4C, 0x3C),
    Rgb(0xF3, 0x9C, 0x12),
    Rgb(0xF1, 0xC4, 0x0F),
    Rgb(0x95, 0xA5, 0xA6),
];
pub const TREND_COLOR: Rgb = Rgb(0x2E, 0xCC, 0x71);
pub const TEXT_COLOR: Rgb = Rgb(0x22, 0x22, 0x22);
pub const AXIS_COLOR: Rgb = Rgb(0x88, 0x88, 0x88);

/// How a chart is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Proportions of a whole
    Pie,
    /// One vertical bar per category, value printed above
    VerticalBar,
    /// Ordered points joined by a line; missing values break the line
    Line,
    /// One horizontal bar per category, value printed as a percentage
    HorizontalBar,
}

/// One category and its value
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// Category label; `\n` splits it over two lines
    pub label: String,
    pub value: Option<f64>,
    pub color: Rgb,
}

/// A chart ready to be laid out
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
    pub value_axis: Option<String>,
    pub category_axis: Option<String>,
}

impl Chart {
    /// Largest finite value, 0.0 when there is none
    pub fn max_value(&self) -> f64 {
        self.points
            .iter()
            .filter_map(|p| p.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max)
    }

    /// File-name friendly slug of the title
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.ends_with('_') && !slug.is_empty() {
                slug.push('_');
            }
        }
        slug.trim_end_matches('_').to_string()
    }
}

/// Share of records per activity level (pie)
///
/// **Public** - sourced from `activity_distribution`
///
/// # Errors
/// * `RenderError::MissingStatistic` - A level is absent from the distribution
pub fn activity_share_chart(distribution: &LevelDistribution) -> Result<Chart, RenderError> {
    Ok(Chart {
        title: "Activity Level Distribution\n(by records)".to_string(),
        kind: ChartKind::Pie,
        points: level_points(distribution, "activity distribution")?,
        value_axis: None,
        category_axis: None,
    })
}

/// Mean steps and minute columns (vertical bars)
///
/// **Public** - sourced from `daily_averages`
pub fn daily_metrics_chart(averages: &DailyAverages) -> Chart {
    let values = [
        ("Steps", averages.steps),
        ("Very Active\nMins", averages.very_active_minutes),
        ("Fairly Active\nMins", averages.fairly_active_minutes),
        ("Lightly Active\nMins", averages.lightly_active_minutes),
        ("Sedentary\nMins", averages.sedentary_minutes),
    ];

    Chart {
        title: "Average Daily Metrics".to_string(),
        kind: ChartKind::VerticalBar,
        points: values
            .iter()
            .zip(METRIC_COLORS)
            .map(|(&(label, value), color)| ChartPoint {
                label: label.to_string(),
                value: Some(value),
                color,
            })
            .collect(),
        value_axis: Some("Count".to_string()),
        category_axis: None,
    }
}

/// Mean steps per weekday (line)
///
/// **Public** - sourced from `weekly_patterns`
pub fn weekly_trend_chart(patterns: &WeeklyPatterns) -> Chart {
    Chart {
        title: "Weekly Activity Patterns".to_string(),
        kind: ChartKind::Line,
        points: patterns
            .days()
            .iter()
            .map(|d| ChartPoint {
                label: day_name(d.day).to_string(),
                value: d.mean_steps,
                color: TREND_COLOR,
            })
            .collect(),
        value_axis: Some("Average Steps".to_string()),
        category_axis: Some("Day of Week".to_string()),
    }
}

/// Share of users per activity level (horizontal bars)
///
/// **Public** - sourced from `user_activity_levels`
///
/// # Errors
/// * `RenderError::MissingStatistic` - A level is absent from the distribution
pub fn user_levels_chart(distribution: &LevelDistribution) -> Result<Chart, RenderError> {
    Ok(Chart {
        title: "User Activity Level Distribution\n(by average daily steps)".to_string(),
        kind: ChartKind::HorizontalBar,
        points: level_points(distribution, "user activity levels")?,
        value_axis: Some("Percentage of Users".to_string()),
        category_axis: None,
    })
}

/// The four dashboard charts in page order
pub fn dashboard_charts(result: &AnalysisResult) -> Result<Vec<Chart>, RenderError> {
    Ok(vec![
        activity_share_chart(&result.activity_distribution)?,
        daily_metrics_chart(&result.daily_averages),
        weekly_trend_chart(&result.weekly_patterns),
        user_levels_chart(&result.user_activity_levels)?,
    ])
}

/// Look up a required level share
///
/// **Public** - shared by charts and text pages
pub fn require_share(
    distribution: &LevelDistribution,
    section: &'static str,
    level: ActivityLevel,
) -> Result<f64, RenderError> {
    distribution
        .share(level)
        .ok_or_else(|| RenderError::MissingStatistic {
            section,
            key: level.label().to_string(),
        })
}

fn level_points(
    distribution: &LevelDistribution,
    section: &'static str,
) -> Result<Vec<ChartPoint>, RenderError> {
    ActivityLevel::ALL
        .iter()
        .zip(LEVEL_COLORS)
        .map(|(&level, color)| -> Result<ChartPoint, RenderError> {
            Ok(ChartPoint {
                label: level.label().to_string(),
                value: Some(require_share(distribution, section, level)?),
                color,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn even_distribution() -> LevelDistribution {
        ActivityLevel::ALL.iter().map(|&l| (l, 25.0)).collect()
    }

    #[test]
    fn test_activity_share_chart_points() {
        let chart = activity_share_chart(&even_distribution()).unwrap();

        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.points.len(), 4);
        assert_eq!(chart.points[1].label, "Lightly Active");
        assert_eq!(chart.points[1].color, LEVEL_COLORS[1]);
    }

    #[test]
    fn test_missing_level_is_reported() {
        let partial: LevelDistribution = [(ActivityLevel::Sedentary, 100.0)].into_iter().collect();

        let err = user_levels_chart(&partial).unwrap_err();
        match err {
            RenderError::MissingStatistic { section, key } => {
                assert_eq!(section, "user activity levels");
                assert_eq!(key, "Lightly Active");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_weekly_trend_keeps_missing_days() {
        let patterns =
            WeeklyPatterns::from_means([Some(5500.0), None, None, None, None, None, Some(100.0)]);
        let chart = weekly_trend_chart(&patterns);

        assert_eq!(chart.points.len(), 7);
        assert_eq!(chart.points[0].label, "Monday");
        assert_eq!(chart.points[1].value, None);
        assert_eq!(chart.max_value(), 5500.0);
    }

    #[test]
    fn test_slug() {
        let chart = weekly_trend_chart(&WeeklyPatterns::from_means([None; 7]));
        assert_eq!(chart.slug(), "weekly_activity_patterns");

        let pie = activity_share_chart(&even_distribution()).unwrap();
        assert_eq!(pie.slug(), "activity_level_distribution_by_records");
    }

    #[test]
    fn test_rgb_formats() {
        assert_eq!(Rgb(0xE7, 0x4C, 0x3C).hex(), "#E74C3C");
        assert_eq!(Rgb(255, 0, 0).unit(), (1.0, 0.0, 0.0));
    }
}
