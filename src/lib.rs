//! Sales Report Studio
//!
//! Sales transaction analysis, chart rendering and report export.
//!
//! This crate provides the core implementation for the
//! `sales-report` CLI tool: it loads a transaction CSV, cleans it,
//! computes grouped aggregation views (by month, category, region,
//! sales rep, customer type and top products) and writes charts and
//! report files.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install sales-report-studio
//! sales-report --help
//! ```

pub mod analyzer;
pub mod charts;
pub mod commands;
pub mod loader;
pub mod output;
pub mod utils;
