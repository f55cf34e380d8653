//! Report assembly: all six views plus the exported document wrapper.

use super::engine::{
    by_category, by_customer_type, by_region, sales_over_time, sales_reps, top_products,
    SummaryRow,
};
use crate::loader::schema::{DataSummary, RecordSet};
use crate::utils::config::SCHEMA_VERSION;
use log::debug;
use serde::{Deserialize, Serialize};

/// Fixed view names, in presentation order
pub const VIEW_NAMES: [&str; 6] = [
    "time_series",
    "category",
    "region",
    "sales_rep",
    "customer_type",
    "top_products",
];

/// All six aggregation views of one record set.
///
/// Every view is always present; an inapplicable view is an empty vector,
/// so consumers check emptiness per view rather than key presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    pub time_series: Vec<SummaryRow>,
    pub category: Vec<SummaryRow>,
    pub region: Vec<SummaryRow>,
    pub sales_rep: Vec<SummaryRow>,
    pub customer_type: Vec<SummaryRow>,
    pub top_products: Vec<SummaryRow>,
}

impl ComprehensiveReport {
    /// Views as (name, rows) pairs in `VIEW_NAMES` order
    pub fn views(&self) -> [(&'static str, &Vec<SummaryRow>); 6] {
        [
            ("time_series", &self.time_series),
            ("category", &self.category),
            ("region", &self.region),
            ("sales_rep", &self.sales_rep),
            ("customer_type", &self.customer_type),
            ("top_products", &self.top_products),
        ]
    }

    /// Highest-revenue row of a descending-revenue view (first row)
    pub fn best_of<'a>(rows: &'a [SummaryRow]) -> Option<&'a SummaryRow> {
        rows.first()
    }
}

/// Run every view over the record set
///
/// **Public** - the assembler; pure composition, no additional computation
///
/// # Arguments
/// * `record_set` - Cleaned records
/// * `top_n` - Row cap for the top-products view
pub fn comprehensive_report(record_set: &RecordSet, top_n: usize) -> ComprehensiveReport {
    debug!(
        "Assembling report over {} records (top_n = {})",
        record_set.len(),
        top_n
    );

    ComprehensiveReport {
        time_series: sales_over_time(record_set),
        category: by_category(record_set),
        region: by_region(record_set),
        sales_rep: sales_reps(record_set),
        customer_type: by_customer_type(record_set),
        top_products: top_products(record_set, top_n),
    }
}

/// Top-level report document written to JSON.
///
/// Versioned so the validate command can check compatibility later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Input file the report was generated from
    pub source_file: String,

    /// Timestamp when the report was generated (RFC 3339)
    pub generated_at: String,

    /// Dataset overview
    pub summary: DataSummary,

    /// The six aggregation views
    pub report: ComprehensiveReport,
}

impl ReportDocument {
    pub fn new(
        source_file: impl Into<String>,
        summary: DataSummary,
        report: ComprehensiveReport,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            source_file: source_file.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary,
            report,
        }
    }
}
