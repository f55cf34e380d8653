//! Chart generation from aggregated views.
//!
//! This module produces:
//! - Static SVG charts (trend, bars, pie, top sellers)
//! - An HTML dashboard page embedding them

pub mod dashboard;
pub mod svg;

// Re-export main types and functions
pub use dashboard::render_dashboard;
pub use svg::{
    render_bar_chart, render_hbar_chart, render_pie_chart, render_trend_chart, ChartConfig,
    PALETTE,
};
