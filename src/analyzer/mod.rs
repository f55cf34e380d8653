//! Aggregation of cleaned records into grouped summary views.
//!
//! This module transforms the record set into:
//! - Six grouped views (month, category, region, rep, customer type, product)
//! - The comprehensive report consumed by charts and exporters

pub mod engine;
pub mod report;

// Re-export main types and functions
pub use engine::{
    by_category, by_customer_type, by_region, sales_over_time, sales_reps, top_products,
    SummaryRow,
};
pub use report::{comprehensive_report, ComprehensiveReport, ReportDocument, VIEW_NAMES};
