//! Grouped aggregation views over the record set.
//!
//! Every view shares the same shape: partition the records by a group key,
//! reduce each partition into sums and counts, finalize into summary rows,
//! sort. The group-by is explicit (key -> accumulator map), there is no
//! dataframe machinery underneath.
//!
//! A view whose grouping column is absent from the record set returns an
//! empty vector, never an error.

use crate::loader::schema::{RecordSet, TransactionRecord};
use crate::utils::config::MONTH_KEY_FORMAT;
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of an aggregation view, keyed by a categorical or temporal value.
///
/// Optional columns are view-specific; an absent column is absent from the
/// serialized row too, callers check presence rather than reading zeros.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Group key (category name, region, rep, month, product id)
    pub key: String,

    /// Sum of sales_amount in the group
    pub total_revenue: f64,

    /// Number of records in the group
    pub transaction_count: u64,

    /// Mean sales_amount (absent on the time-series view)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_ticket: Option<f64>,

    /// Sum of profit, when the record set carries profit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_profit: Option<f64>,

    /// Sum of quantity_sold (category view)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub units_sold: Option<f64>,

    /// Group revenue as a percentage of the view's total revenue
    /// (category view)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_share_pct: Option<f64>,

    /// Revenue per transaction (sales-rep view)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub efficiency: Option<f64>,
}

/// Running sums for one group partition
#[derive(Debug, Clone, Copy, Default)]
struct GroupAccumulator {
    revenue: f64,
    count: u64,
    profit: f64,
    units: f64,
}

impl GroupAccumulator {
    fn add(&mut self, record: &TransactionRecord) {
        self.revenue += record.sales_amount;
        self.count += 1;
        if let Some(profit) = record.profit {
            self.profit += profit;
        }
        if let Some(quantity) = record.quantity_sold {
            self.units += quantity;
        }
    }
}

/// Which optional columns a finalized row should carry
#[derive(Debug, Clone, Copy, Default)]
struct RowShape {
    average_ticket: bool,
    profit: bool,
    units: bool,
}

/// Sales dynamics by calendar month
///
/// **Public** - time-series view
///
/// Keys are `YYYY-MM` strings, sorted ascending (lexicographic order is
/// chronological for this format). No average ticket on this view.
pub fn sales_over_time(record_set: &RecordSet) -> Vec<SummaryRow> {
    if !record_set.columns.sale_date {
        return Vec::new();
    }

    let groups = partition(&record_set.records, |r| {
        r.sale_date.map(|d| d.format(MONTH_KEY_FORMAT).to_string())
    });

    let shape = RowShape {
        average_ticket: false,
        profit: record_set.columns.profit,
        units: false,
    };

    let mut rows = finalize(groups, shape);
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    debug!("Time-series view: {} months", rows.len());
    rows
}

/// Sales by product category, with units sold and market share
///
/// **Public** - category view
///
/// Market share is a second pass over the partition totals: each group's
/// revenue divided by the view-wide revenue. Shares sum to 100 within
/// rounding error.
pub fn by_category(record_set: &RecordSet) -> Vec<SummaryRow> {
    if !record_set.columns.product_category {
        return Vec::new();
    }

    let groups = partition(&record_set.records, |r| r.product_category.clone());

    let shape = RowShape {
        average_ticket: true,
        profit: record_set.columns.profit,
        units: record_set.columns.quantity_sold,
    };

    let mut rows = finalize(groups, shape);

    let total_revenue: f64 = rows.iter().map(|r| r.total_revenue).sum();
    if total_revenue > 0.0 {
        for row in &mut rows {
            row.market_share_pct = Some(round2(row.total_revenue / total_revenue * 100.0));
        }
    }

    sort_by_revenue_desc(&mut rows);
    debug!("Category view: {} groups", rows.len());
    rows
}

/// Sales by region
///
/// **Public** - region view
pub fn by_region(record_set: &RecordSet) -> Vec<SummaryRow> {
    if !record_set.columns.region {
        return Vec::new();
    }

    let groups = partition(&record_set.records, |r| r.region.clone());

    let shape = RowShape {
        average_ticket: true,
        profit: record_set.columns.profit,
        units: false,
    };

    let mut rows = finalize(groups, shape);
    sort_by_revenue_desc(&mut rows);
    debug!("Region view: {} groups", rows.len());
    rows
}

/// Sales-rep performance, with the efficiency ratio
///
/// **Public** - sales-rep view
///
/// Efficiency is revenue per transaction. The zero-count guard keeps it a
/// real number or absent, never a division-by-zero artifact.
pub fn sales_reps(record_set: &RecordSet) -> Vec<SummaryRow> {
    if !record_set.columns.sales_rep {
        return Vec::new();
    }

    let groups = partition(&record_set.records, |r| r.sales_rep.clone());

    let shape = RowShape {
        average_ticket: true,
        profit: record_set.columns.profit,
        units: false,
    };

    let mut rows = finalize(groups, shape);
    for row in &mut rows {
        if row.transaction_count > 0 {
            row.efficiency = Some(round2(row.total_revenue / row.transaction_count as f64));
        }
    }

    sort_by_revenue_desc(&mut rows);
    debug!("Sales-rep view: {} groups", rows.len());
    rows
}

/// Sales by customer type
///
/// **Public** - customer-type view
///
/// Sorted ascending by key so repeated runs over the same data produce
/// identical output.
pub fn by_customer_type(record_set: &RecordSet) -> Vec<SummaryRow> {
    if !record_set.columns.customer_type {
        return Vec::new();
    }

    let groups = partition(&record_set.records, |r| r.customer_type.clone());

    let shape = RowShape {
        average_ticket: true,
        profit: record_set.columns.profit,
        units: false,
    };

    let mut rows = finalize(groups, shape);
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    debug!("Customer-type view: {} groups", rows.len());
    rows
}

/// Top products by revenue, truncated after sorting
///
/// **Public** - top-products view
///
/// # Arguments
/// * `record_set` - Cleaned records
/// * `top_n` - Maximum rows to return (0 yields an empty view)
pub fn top_products(record_set: &RecordSet, top_n: usize) -> Vec<SummaryRow> {
    if top_n == 0 {
        return Vec::new();
    }

    let groups = partition(&record_set.records, |r| Some(r.product_id.clone()));

    let shape = RowShape {
        average_ticket: false,
        profit: record_set.columns.profit,
        units: false,
    };

    let mut rows = finalize(groups, shape);
    sort_by_revenue_desc(&mut rows);
    rows.truncate(top_n);
    debug!("Top-products view: {} rows", rows.len());
    rows
}

/// Partition records into key -> accumulator
///
/// **Private** - records whose key function yields None are skipped
fn partition<F>(records: &[TransactionRecord], key_fn: F) -> HashMap<String, GroupAccumulator>
where
    F: Fn(&TransactionRecord) -> Option<String>,
{
    let mut groups: HashMap<String, GroupAccumulator> = HashMap::new();
    for record in records {
        if let Some(key) = key_fn(record) {
            groups.entry(key).or_default().add(record);
        }
    }
    groups
}

/// Finalize accumulators into unsorted summary rows
///
/// **Private** - rounding to 2 decimals happens here, once, not in the
/// accumulators, so intermediate sums never compound rounding error
fn finalize(groups: HashMap<String, GroupAccumulator>, shape: RowShape) -> Vec<SummaryRow> {
    groups
        .into_iter()
        .map(|(key, acc)| SummaryRow {
            key,
            total_revenue: round2(acc.revenue),
            transaction_count: acc.count,
            average_ticket: (shape.average_ticket && acc.count > 0)
                .then(|| round2(acc.revenue / acc.count as f64)),
            total_profit: shape.profit.then(|| round2(acc.profit)),
            units_sold: shape.units.then(|| round2(acc.units)),
            market_share_pct: None,
            efficiency: None,
        })
        .collect()
}

/// Descending by revenue, ties broken ascending by key so the order is total
fn sort_by_revenue_desc(rows: &mut [SummaryRow]) {
    rows.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
