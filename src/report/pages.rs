//! Report page content.
//!
//! Turns an [`AnalysisResult`] into three pages of text blocks and charts:
//! executive summary, dashboard, detailed analysis. Layout and drawing live
//! in `layout`, `pdf` and `svg`; this module only decides what is said.

use super::charts::{dashboard_charts, require_share, Chart};
use crate::aggregator::results::{day_label, AnalysisResult, GroupMeans};
use crate::parser::schema::{day_name, ActivityLevel};
use crate::utils::config::{DEFAULT_DASHBOARD_TITLE, DEFAULT_REPORT_TITLE};
use crate::utils::error::RenderError;
use log::debug;

/// Fixed marketing bullets on the summary page. Static template text, not
/// derived from the data.
pub const MARKETING_OPPORTUNITIES: &[&str] = &[
    "Target sedentary behavior reduction",
    "Focus on weekday activity improvement",
    "Emphasize holistic wellness beyond just steps",
    "Develop women-specific wellness features",
];

/// Report configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Title of the summary page and the PDF document
    pub title: String,
    /// Title above the chart grid
    pub dashboard_title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            dashboard_title: DEFAULT_DASHBOARD_TITLE.to_string(),
        }
    }
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_dashboard_title(mut self, title: impl Into<String>) -> Self {
        self.dashboard_title = title.into();
        self
    }
}

/// A unit of page content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Large centered page title
    Title(String),
    Heading(String),
    Paragraph(String),
    Bullets(Vec<String>),
    /// Charts laid out two per row
    Charts(Vec<Chart>),
}

/// One page of the report
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportPage {
    pub blocks: Vec<Block>,
}

impl ReportPage {
    fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }

    /// Plain-text rendering of the text blocks, one line per entry
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for block in &self.blocks {
            match block {
                Block::Title(text) | Block::Heading(text) | Block::Paragraph(text) => {
                    lines.push(text.clone())
                }
                Block::Bullets(items) => lines.extend(items.iter().map(|i| format!("- {}", i))),
                Block::Charts(charts) => {
                    lines.extend(charts.iter().map(|c| format!("[chart] {}", c.title.replace('\n', " "))))
                }
            }
        }
        lines
    }

    /// Charts on this page
    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Charts(charts) => Some(charts),
                _ => None,
            })
            .flatten()
    }
}

/// Build the three report pages
///
/// **Public** - main entry point for report content
///
/// # Arguments
/// * `result` - Analysis result from the aggregator
/// * `config` - Titles
///
/// # Returns
/// Summary, dashboard and detail pages, in that order
///
/// # Errors
/// * `RenderError::MissingStatistic` - A distribution lacks one of the four levels
pub fn render_pages(
    result: &AnalysisResult,
    config: &ReportConfig,
) -> Result<Vec<ReportPage>, RenderError> {
    let pages = vec![
        summary_page(result, config)?,
        dashboard_page(result, config)?,
        detail_page(result)?,
    ];
    debug!("Rendered {} report pages", pages.len());
    Ok(pages)
}

/// Page 1: dataset overview, key findings, marketing opportunities
pub fn summary_page(
    result: &AnalysisResult,
    config: &ReportConfig,
) -> Result<ReportPage, RenderError> {
    let stats = &result.basic_stats;
    let users = &result.user_activity_levels;

    let mut overview = vec![
        format!(
            "{} activity records from {} unique users",
            stats.total_records, stats.unique_users
        ),
        format!("Data period: {}", stats.date_range()),
        format!("Average daily steps: {}", format_thousands(stats.avg_steps)),
        format!("Average daily calories: {}", format_thousands(stats.avg_calories)),
    ];
    if stats.records_over_day_length > 0 {
        overview.push(format!(
            "{} records log more than 1,440 minutes in a day",
            stats.records_over_day_length
        ));
    }

    let very_active = require_share(users, "user activity levels", ActivityLevel::VeryActive)?;
    let sedentary = require_share(users, "user activity levels", ActivityLevel::Sedentary)?;

    let mut findings = vec![
        format!(
            "Users spend {:.1} hours/day sedentary",
            stats.avg_sedentary_hours
        ),
        format!("{:.1}% of users are classified as \"Very Active\"", very_active),
        format!("{:.1}% of users fall into \"Sedentary\" category", sedentary),
        format!(
            "{} shows lowest activity levels",
            day_label(result.weekly_patterns.least_active())
        ),
        correlation_finding(result.steps_calories_correlation),
    ];
    let comparison = &result.weekend_comparison;
    if let (Some(weekday), Some(weekend)) = (&comparison.weekday, &comparison.weekend) {
        findings.push(format!(
            "Weekend days average {} steps vs {} on weekdays",
            format_thousands(weekend.mean_steps),
            format_thousands(weekday.mean_steps)
        ));
    }

    let mut page = ReportPage::default();
    page.push(Block::Title(config.title.clone()))
        .push(Block::Heading("EXECUTIVE SUMMARY".to_string()))
        .push(Block::Heading("Dataset Overview:".to_string()))
        .push(Block::Bullets(overview))
        .push(Block::Heading("Key Findings:".to_string()))
        .push(Block::Bullets(findings))
        .push(Block::Heading("Marketing Opportunities:".to_string()))
        .push(Block::Bullets(
            MARKETING_OPPORTUNITIES.iter().map(|s| s.to_string()).collect(),
        ));
    Ok(page)
}

/// Page 2: the four dashboard charts
pub fn dashboard_page(
    result: &AnalysisResult,
    config: &ReportConfig,
) -> Result<ReportPage, RenderError> {
    let mut page = ReportPage::default();
    page.push(Block::Title(config.dashboard_title.clone()))
        .push(Block::Charts(dashboard_charts(result)?));
    Ok(page)
}

/// Page 3: distributions, weekly patterns, weekend split, recommendations
pub fn detail_page(result: &AnalysisResult) -> Result<ReportPage, RenderError> {
    let record_levels = ActivityLevel::ALL
        .iter()
        .map(|&level| -> Result<String, RenderError> {
            let share = require_share(&result.activity_distribution, "activity distribution", level)?;
            Ok(format!("{} ({}): {:.1}%", level, level.step_range(), share))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let user_levels = ActivityLevel::ALL
        .iter()
        .map(|&level| -> Result<String, RenderError> {
            let share = require_share(&result.user_activity_levels, "user activity levels", level)?;
            Ok(format!("{} users: {:.1}%", level, share))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let weekly = result
        .weekly_patterns
        .days()
        .iter()
        .map(|d| match d.mean_steps {
            Some(steps) => format!("{}: {} average steps", day_name(d.day), format_thousands(steps)),
            None => format!("{}: no data", day_name(d.day)),
        })
        .collect();

    let comparison = &result.weekend_comparison;
    let weekend_split = vec![
        group_line("Weekdays", comparison.weekday.as_ref()),
        group_line("Weekends", comparison.weekend.as_ref()),
    ];

    let sedentary_hours = result.basic_stats.avg_sedentary_hours;
    let least_active = day_label(result.weekly_patterns.least_active());

    let mut page = ReportPage::default();
    page.push(Block::Title("Detailed Analysis Results".to_string()))
        .push(Block::Heading("ACTIVITY LEVEL BREAKDOWN:".to_string()))
        .push(Block::Heading("Record-Level Distribution:".to_string()))
        .push(Block::Bullets(record_levels))
        .push(Block::Heading("User-Level Classification:".to_string()))
        .push(Block::Bullets(user_levels))
        .push(Block::Heading("WEEKLY PATTERNS:".to_string()))
        .push(Block::Bullets(weekly))
        .push(Block::Heading("WEEKEND VS WEEKDAY:".to_string()))
        .push(Block::Bullets(weekend_split))
        .push(Block::Heading("RECOMMENDATIONS FOR BELLABEAT:".to_string()))
        .push(Block::Paragraph("1. Sedentary Behavior Focus:".to_string()))
        .push(Block::Bullets(vec![
            "Develop smart notifications for movement breaks".to_string(),
            format!(
                "Market {:.1}-hour sedentary problem as key differentiator",
                sedentary_hours
            ),
        ]))
        .push(Block::Paragraph("2. Women-Specific Features:".to_string()))
        .push(Block::Bullets(vec![
            "Integrate menstrual cycle tracking with activity patterns".to_string(),
            "Emphasize stress management and wellness beyond fitness".to_string(),
        ]))
        .push(Block::Paragraph("3. Weekday Engagement:".to_string()))
        .push(Block::Bullets(vec![
            format!("Target {} activity improvement campaigns", least_active),
            "Develop workday wellness challenges".to_string(),
        ]))
        .push(Block::Paragraph("4. User Segmentation:".to_string()))
        .push(Block::Bullets(vec![
            "Create different messaging for sedentary vs active users".to_string(),
            "Focus on gradual improvement rather than dramatic changes".to_string(),
        ]));
    Ok(page)
}

fn correlation_finding(correlation: Option<f64>) -> String {
    match correlation {
        Some(r) => {
            let strength = match r.abs() {
                a if a >= 0.5 => "Strong",
                a if a >= 0.3 => "Moderate",
                _ => "Weak",
            };
            format!(
                "{} correlation ({:.2}) between steps and calories burned",
                strength, r
            )
        }
        None => "Correlation between steps and calories could not be computed".to_string(),
    }
}

fn group_line(name: &str, group: Option<&GroupMeans>) -> String {
    match group {
        Some(g) => format!(
            "{} ({} records): {} steps, {:.1} very active min, {:.1} sedentary min",
            name,
            g.records,
            format_thousands(g.mean_steps),
            g.mean_very_active_minutes,
            g.mean_sedentary_minutes
        ),
        None => format!("{}: no records", name),
    }
}

/// Round to a whole number and group thousands ("7,638"); "n/a" if not finite
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.4), "999");
        assert_eq!(format_thousands(7637.91), "7,638");
        assert_eq!(format_thousands(1234567.0), "1,234,567");
        assert_eq!(format_thousands(-2500.0), "-2,500");
        assert_eq!(format_thousands(f64::NAN), "n/a");
    }

    #[test]
    fn test_correlation_finding() {
        assert_eq!(
            correlation_finding(Some(0.58)),
            "Strong correlation (0.58) between steps and calories burned"
        );
        assert!(correlation_finding(Some(0.1)).starts_with("Weak"));
        assert!(correlation_finding(None).contains("could not be computed"));
    }

    #[test]
    fn test_group_line_missing_group() {
        assert_eq!(group_line("Weekends", None), "Weekends: no records");
    }

    #[test]
    fn test_config_builder() {
        let config = ReportConfig::new().with_title("Custom");
        assert_eq!(config.title, "Custom");
        assert_eq!(config.dashboard_title, DEFAULT_DASHBOARD_TITLE);
    }
}
