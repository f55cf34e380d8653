//! Record set schema definitions.
//!
//! This module defines the cleaned, typed transaction table the analyzer
//! consumes. Column presence is resolved once at load time into a
//! `ColumnSet`, so the views check a flag instead of probing each record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cleaned sale event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Product identifier (required)
    pub product_id: String,

    /// Calendar date of the sale
    pub sale_date: Option<NaiveDate>,

    /// Sales representative name ("Unknown" when the cell was blank)
    pub sales_rep: Option<String>,

    /// Sales region
    pub region: Option<String>,

    /// Product category
    pub product_category: Option<String>,

    /// Customer type (e.g. new vs. returning)
    pub customer_type: Option<String>,

    /// Sale amount in currency units (required)
    pub sales_amount: f64,

    /// Units sold in this transaction
    pub quantity_sold: Option<f64>,

    /// Cost per unit
    pub unit_cost: Option<f64>,

    /// Listed price per unit
    pub unit_price: Option<f64>,

    /// Discount applied
    pub discount: Option<f64>,

    /// Derived: sales_amount - unit_cost * quantity_sold
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,

    /// Derived: profit / sales_amount * 100, undefined for zero-amount sales
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit_margin: Option<f64>,
}

/// Which optional columns the source table carried.
///
/// Resolved once when the record set is built; every view consults these
/// flags instead of duck-typing against individual records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSet {
    pub sale_date: bool,
    pub sales_rep: bool,
    pub region: bool,
    pub product_category: bool,
    pub customer_type: bool,
    pub quantity_sold: bool,
    pub unit_cost: bool,
    pub unit_price: bool,
    pub discount: bool,

    /// True when profit could be derived (sales_amount, unit_cost and
    /// quantity_sold all present)
    pub profit: bool,
}

impl ColumnSet {
    /// Number of columns the record set carries, counting the two
    /// always-present ones (product_id, sales_amount) and the derived pair.
    pub fn count(&self) -> usize {
        let flags = [
            self.sale_date,
            self.sales_rep,
            self.region,
            self.product_category,
            self.customer_type,
            self.quantity_sold,
            self.unit_cost,
            self.unit_price,
            self.discount,
        ];
        let derived = if self.profit { 2 } else { 0 };
        2 + flags.iter().filter(|f| **f).count() + derived
    }
}

/// The cleaned transaction table analyzed in one run
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub records: Vec<TransactionRecord>,
    pub columns: ColumnSet,
}

impl RecordSet {
    pub fn new(records: Vec<TransactionRecord>, columns: ColumnSet) -> Self {
        Self { records, columns }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Dataset overview shown after cleaning and embedded in the report document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSummary {
    /// Rows that survived cleaning
    pub rows: usize,

    /// Columns carried by the record set
    pub columns: usize,

    /// Sum of sales_amount over all rows
    pub total_revenue: f64,

    /// Sum of profit, when the profit column exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_profit: Option<f64>,

    /// Mean sales_amount
    pub average_ticket: f64,

    /// First and last sale date, when dates exist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<(NaiveDate, NaiveDate)>,

    /// Distinct regions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_count: Option<usize>,

    /// Distinct product categories
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_count: Option<usize>,
}

impl TransactionRecord {
    /// A record with only the required fields set. Tests and the sample
    /// generator fill in the rest.
    pub fn bare(product_id: impl Into<String>, sales_amount: f64) -> Self {
        Self {
            product_id: product_id.into(),
            sale_date: None,
            sales_rep: None,
            region: None,
            product_category: None,
            customer_type: None,
            sales_amount,
            quantity_sold: None,
            unit_cost: None,
            unit_price: None,
            discount: None,
            profit: None,
            profit_margin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_minimal() {
        let columns = ColumnSet::default();
        assert_eq!(columns.count(), 2);
    }

    #[test]
    fn test_column_count_with_profit() {
        let columns = ColumnSet {
            quantity_sold: true,
            unit_cost: true,
            profit: true,
            ..Default::default()
        };
        // product_id + sales_amount + 2 flags + profit + profit_margin
        assert_eq!(columns.count(), 6);
    }

    #[test]
    fn test_bare_record() {
        let record = TransactionRecord::bare("P0001", 99.5);
        assert_eq!(record.product_id, "P0001");
        assert_eq!(record.sales_amount, 99.5);
        assert!(record.profit.is_none());
    }
}
