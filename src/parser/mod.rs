//! Activity table loading and record schema.
//!
//! This module handles:
//! - Reading daily activity CSV exports
//! - Resolving column names and parsing dates
//! - Deriving per-record fields (activity level, weekday, active minutes)

pub mod activity_csv;
pub mod schema;

// Re-export main types
pub use activity_csv::{load_activity_csv, load_activity_reader, parse_activity_date};
pub use schema::{
    classify_activity_level, day_name, ActivityLevel, ActivityRecord, DerivedTable, RawActivity,
    WEEK_ORDER,
};
