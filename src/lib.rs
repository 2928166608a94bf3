//! Activity Insights
//!
//! Descriptive analysis of daily fitness tracker exports: loads a
//! per-user, per-day activity CSV, derives activity levels and weekday
//! fields, aggregates summary statistics, and renders a three-page PDF
//! report alongside cleaned-data and summary CSV exports.
//!
//! This crate provides the core implementation for the
//! `activity-insights` CLI tool.
//!
//! ## Pipeline
//!
//! ```ignore
//! let table = parser::load_activity_csv("dailyActivity_merged.csv")?;
//! let result = aggregator::analyze(&table)?;
//! let pages = report::render_pages(&result, &report::ReportConfig::default())?;
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod report;
pub mod utils;
