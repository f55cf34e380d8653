//! Output writers for report data and charts.
//!
//! This module handles writing data to disk in various formats:
//! - JSON report documents
//! - Per-view CSV tables with a cross-view summary
//! - SVG charts and the HTML dashboard

pub mod csv;
pub mod json;
pub mod web;

// Re-export main functions
pub use csv::export_views;
pub use json::{read_report, write_report};
pub use web::{write_html, write_svg};
