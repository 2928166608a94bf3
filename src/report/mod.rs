//! Report rendering.
//!
//! Content (`pages`, `charts`) is separated from geometry (`layout`) and
//! from the two drawing backends (`pdf`, `svg`).

pub mod charts;
pub mod layout;
pub mod pages;
pub mod pdf;
pub mod svg;

// Re-export main types
pub use charts::{dashboard_charts, Chart, ChartKind, ChartPoint};
pub use pages::{render_pages, Block, ReportConfig, ReportPage};
pub use pdf::build_pdf;
pub use svg::render_chart_svg;
