//! Data cleaning: type coercion, missing-value handling, derived fields.
//!
//! Turns the untyped `RawTable` into the typed `RecordSet` the analyzer
//! consumes:
//! 1. Parse sale dates against the accepted format list
//! 2. Drop rows missing a key field (product id, date, amount)
//! 3. Fill blank categorical cells with the "Unknown" sentinel
//! 4. Impute blank numeric cells with the column median
//! 5. Derive profit and profit margin where the inputs exist

use super::csv_reader::RawTable;
use super::schema::{ColumnSet, DataSummary, RecordSet, TransactionRecord};
use crate::utils::config::{DATE_FORMATS, UNKNOWN_LABEL};
use crate::utils::error::LoadError;
use chrono::NaiveDate;
use log::{debug, info};
use std::collections::HashSet;

/// Clean a raw table into a typed record set
///
/// **Public** - main entry point for cleaning
///
/// # Arguments
/// * `table` - Raw table from the CSV reader
///
/// # Returns
/// Typed record set with the column capability flags resolved
///
/// # Errors
/// * `LoadError::NoCleanRows` - every row was dropped
pub fn clean(table: &RawTable) -> Result<RecordSet, LoadError> {
    let product_id = table.column_index("Product_ID");
    let sale_date = table.column_index("Sale_Date");
    let sales_rep = table.column_index("Sales_Rep");
    let region = table.column_index("Region");
    let category = table.column_index("Product_Category");
    let customer_type = table.column_index("Customer_Type");
    let sales_amount = table.column_index("Sales_Amount");
    let quantity_sold = table.column_index("Quantity_Sold");
    let unit_cost = table.column_index("Unit_Cost");
    let unit_price = table.column_index("Unit_Price");
    let discount = table.column_index("Discount");

    let columns = ColumnSet {
        sale_date: sale_date.is_some(),
        sales_rep: sales_rep.is_some(),
        region: region.is_some(),
        product_category: category.is_some(),
        customer_type: customer_type.is_some(),
        quantity_sold: quantity_sold.is_some(),
        unit_cost: unit_cost.is_some(),
        unit_price: unit_price.is_some(),
        discount: discount.is_some(),
        profit: sales_amount.is_some() && unit_cost.is_some() && quantity_sold.is_some(),
    };

    // First pass: keep only rows with the key fields intact. An unparseable
    // date or amount drops the whole row.
    let mut survivors: Vec<(&Vec<String>, String, Option<NaiveDate>, f64)> = Vec::new();
    let mut dropped = 0usize;

    for row in &table.rows {
        let id = match product_id.map(|i| row[i].trim()) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                dropped += 1;
                continue;
            }
        };

        let date = match sale_date {
            Some(i) => match parse_date(row[i].trim()) {
                Some(d) => Some(d),
                None => {
                    dropped += 1;
                    continue;
                }
            },
            None => None,
        };

        let amount = match sales_amount.and_then(|i| parse_number(row[i].trim())) {
            Some(a) => a,
            None => {
                dropped += 1;
                continue;
            }
        };

        survivors.push((row, id, date, amount));
    }

    // Imputation medians come from the surviving rows only, so a dropped
    // row's garbage never shifts them
    let quantity_median = column_median(&survivors, quantity_sold);
    let cost_median = column_median(&survivors, unit_cost);
    let price_median = column_median(&survivors, unit_price);
    let discount_median = column_median(&survivors, discount);

    let mut records = Vec::with_capacity(survivors.len());

    for (row, id, date, amount) in survivors {
        let mut record = TransactionRecord::bare(id, amount);
        record.sale_date = date;
        record.sales_rep = sales_rep.map(|i| fill_text(row[i].trim()));
        record.region = region.map(|i| fill_text(row[i].trim()));
        record.product_category = category.map(|i| fill_text(row[i].trim()));
        record.customer_type = customer_type.map(|i| fill_text(row[i].trim()));
        record.quantity_sold =
            quantity_sold.map(|i| parse_number(row[i].trim()).unwrap_or(quantity_median));
        record.unit_cost = unit_cost.map(|i| parse_number(row[i].trim()).unwrap_or(cost_median));
        record.unit_price = unit_price.map(|i| parse_number(row[i].trim()).unwrap_or(price_median));
        record.discount = discount.map(|i| parse_number(row[i].trim()).unwrap_or(discount_median));

        if let (Some(cost), Some(quantity)) = (record.unit_cost, record.quantity_sold) {
            let profit = record.sales_amount - cost * quantity;
            record.profit = Some(profit);
            if record.sales_amount > 0.0 {
                record.profit_margin =
                    Some((profit / record.sales_amount * 100.0 * 100.0).round() / 100.0);
            }
        }

        records.push(record);
    }

    if dropped > 0 {
        debug!("Dropped {} rows missing key fields", dropped);
    }

    if records.is_empty() {
        return Err(LoadError::NoCleanRows);
    }

    info!("Data cleaned, {} rows kept", records.len());

    Ok(RecordSet::new(records, columns))
}

/// Build the dataset overview shown after cleaning
///
/// **Public** - consumed by the analyze command and the report document
pub fn summarize(record_set: &RecordSet) -> DataSummary {
    let records = &record_set.records;
    let total_revenue: f64 = records.iter().map(|r| r.sales_amount).sum();
    let average_ticket = if records.is_empty() {
        0.0
    } else {
        total_revenue / records.len() as f64
    };

    let total_profit = if record_set.columns.profit {
        Some(records.iter().filter_map(|r| r.profit).sum())
    } else {
        None
    };

    let date_range = if record_set.columns.sale_date {
        let dates: Vec<NaiveDate> = records.iter().filter_map(|r| r.sale_date).collect();
        match (dates.iter().min(), dates.iter().max()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        }
    } else {
        None
    };

    let region_count = if record_set.columns.region {
        Some(distinct(records.iter().filter_map(|r| r.region.as_deref())))
    } else {
        None
    };
    let category_count = if record_set.columns.product_category {
        Some(distinct(
            records.iter().filter_map(|r| r.product_category.as_deref()),
        ))
    } else {
        None
    };

    DataSummary {
        rows: records.len(),
        columns: record_set.columns.count(),
        total_revenue: round2(total_revenue),
        total_profit: total_profit.map(round2),
        average_ticket: round2(average_ticket),
        date_range,
        region_count,
        category_count,
    }
}

/// Parse a date against the accepted format list
///
/// **Private** - first matching format wins
fn parse_date(cell: &str) -> Option<NaiveDate> {
    if cell.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(cell, fmt).ok())
}

/// Parse a numeric cell, tolerating thousands separators and currency signs
///
/// **Private**
fn parse_number(cell: &str) -> Option<f64> {
    if cell.is_empty() {
        return None;
    }
    let normalized: String = cell
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' '))
        .collect();
    normalized.parse().ok()
}

/// Blank categorical cells become the "Unknown" sentinel
fn fill_text(cell: &str) -> String {
    if cell.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        cell.to_string()
    }
}

/// Median over a column's parseable cells, 0 when nothing parses
///
/// **Private** - imputation value for blank numeric cells
fn column_median(
    survivors: &[(&Vec<String>, String, Option<NaiveDate>, f64)],
    column: Option<usize>,
) -> f64 {
    let Some(i) = column else { return 0.0 };
    let mut values: Vec<f64> = survivors
        .iter()
        .filter_map(|(row, _, _, _)| parse_number(row[i].trim()))
        .collect();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> usize {
    values.collect::<HashSet<_>>().len()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
