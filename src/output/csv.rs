//! CSV export of aggregation views.
//!
//! One file per non-empty view, each carrying only the columns that view
//! produces, plus a cross-view summary table highlighting the best
//! category, region and sales rep.

use crate::analyzer::engine::SummaryRow;
use crate::analyzer::report::ComprehensiveReport;
use crate::loader::schema::DataSummary;
use crate::utils::error::OutputError;
use log::{info, warn};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header name for each view's key column
fn key_header(view_name: &str) -> &'static str {
    match view_name {
        "time_series" => "month",
        "category" => "category",
        "region" => "region",
        "sales_rep" => "sales_rep",
        "customer_type" => "customer_type",
        "top_products" => "product_id",
        _ => "key",
    }
}

/// Export every non-empty view plus the summary table
///
/// **Public** - main entry point for CSV export
///
/// # Arguments
/// * `report` - Assembled report
/// * `summary` - Dataset overview for the summary table
/// * `dir` - Target directory, created if missing
///
/// # Returns
/// Paths of the files written
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error
/// * `OutputError::InvalidPath` - directory cannot be created
pub fn export_views(
    report: &ComprehensiveReport,
    summary: &DataSummary,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>, OutputError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| {
        OutputError::InvalidPath(format!("Cannot create directory {}: {}", dir.display(), e))
    })?;

    let mut written = Vec::new();

    for (name, rows) in report.views() {
        if rows.is_empty() {
            warn!("Skipping CSV export for empty view '{}'", name);
            continue;
        }
        let path = dir.join(format!("{}.csv", name));
        write_view(rows, key_header(name), &path)?;
        written.push(path);
    }

    let summary_path = dir.join("summary.csv");
    write_summary(report, summary, &summary_path)?;
    written.push(summary_path);

    info!("Exported {} CSV files to {}", written.len(), dir.display());
    Ok(written)
}

/// Write one view's rows
///
/// **Private** - the header carries only the columns this view produced;
/// optional-column presence is uniform across a view's rows by construction,
/// so the first row decides.
fn write_view(rows: &[SummaryRow], key_name: &str, path: &Path) -> Result<(), OutputError> {
    let first = &rows[0];
    let mut headers: Vec<&str> = vec![key_name, "total_revenue", "transaction_count"];
    if first.average_ticket.is_some() {
        headers.push("average_ticket");
    }
    if first.total_profit.is_some() {
        headers.push("total_profit");
    }
    if first.units_sold.is_some() {
        headers.push("units_sold");
    }
    if first.market_share_pct.is_some() {
        headers.push("market_share_pct");
    }
    if first.efficiency.is_some() {
        headers.push("efficiency");
    }

    let mut out = String::new();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in rows {
        let mut fields: Vec<String> = vec![
            csv_field(&row.key),
            format_num(row.total_revenue),
            row.transaction_count.to_string(),
        ];
        for value in [
            row.average_ticket,
            row.total_profit,
            row.units_sold,
            row.market_share_pct,
            row.efficiency,
        ]
        .into_iter()
        .flatten()
        {
            fields.push(format_num(value));
        }
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    write_file(path, &out)
}

/// Write the cross-view summary table
///
/// **Private** - best category/region/rep plus dataset totals
fn write_summary(
    report: &ComprehensiveReport,
    summary: &DataSummary,
    path: &Path,
) -> Result<(), OutputError> {
    let mut out = String::from("metric,value,amount\n");

    let best = [
        ("Best category", report.category.first()),
        ("Best region", report.region.first()),
        ("Best sales rep", report.sales_rep.first()),
    ];
    for (label, row) in best {
        if let Some(row) = row {
            out.push_str(&format!(
                "{},{},{}\n",
                label,
                csv_field(&row.key),
                format_num(row.total_revenue)
            ));
        }
    }

    out.push_str(&format!(
        "Total revenue,,{}\n",
        format_num(summary.total_revenue)
    ));
    if let Some(profit) = summary.total_profit {
        out.push_str(&format!("Total profit,,{}\n", format_num(profit)));
    }
    out.push_str(&format!("Total transactions,{},\n", summary.rows));
    out.push_str(&format!(
        "Average ticket,,{}\n",
        format_num(summary.average_ticket)
    ));

    write_file(path, &out)
}

/// Quote a field when it contains the separator, a quote or a line break
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Plain decimal, trailing ".0" trimmed for whole numbers
fn format_num(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), OutputError> {
    let mut file = fs::File::create(path).map_err(OutputError::WriteFailed)?;
    file.write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    Ok(())
}
