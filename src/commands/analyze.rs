//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the CSV file
//! 2. Cleans it into the typed record set
//! 3. Assembles the comprehensive report
//! 4. Renders charts (optional)
//! 5. Writes the JSON report document
//! 6. Exports per-view CSV tables (optional)

use crate::analyzer::report::{comprehensive_report, ComprehensiveReport, ReportDocument};
use crate::charts::dashboard::render_dashboard;
use crate::charts::svg::{
    format_money, render_bar_chart, render_hbar_chart, render_pie_chart, render_trend_chart,
    ChartConfig,
};
use crate::loader::schema::DataSummary;
use crate::loader::{clean, load_csv, summarize};
use crate::output::{export_views, write_html, write_report, write_svg};
use crate::utils::config::DEFAULT_TOP_PRODUCTS;
use crate::utils::error::ChartError;
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Input CSV file
    pub input: PathBuf,

    /// Output path for the JSON report document
    pub output_json: PathBuf,

    /// Directory for per-view CSV exports (optional)
    pub export_dir: Option<PathBuf>,

    /// Directory for static SVG charts (optional)
    pub charts_dir: Option<PathBuf>,

    /// Also write the HTML dashboard into the charts directory
    pub html: bool,

    /// Number of rows in the top-products ranking
    pub top_products: usize,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output_json: PathBuf::from("report.json"),
            export_dir: None,
            charts_dir: None,
            html: false,
            top_products: DEFAULT_TOP_PRODUCTS,
            print_summary: false,
        }
    }
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * File loading/cleaning errors
/// * File write errors
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Starting analysis of: {}", args.input.display());

    // Step 1: Load the CSV
    info!("Step 1/6: Loading CSV file...");
    let table = load_csv(&args.input).context("Failed to load CSV file")?;

    // Step 2: Clean into the typed record set
    info!("Step 2/6: Cleaning data...");
    let record_set = clean(&table).context("Failed to clean data")?;
    let summary = summarize(&record_set);

    info!(
        "Dataset: {} rows, {} columns, total revenue {}",
        summary.rows,
        summary.columns,
        format_money(summary.total_revenue)
    );

    // Step 3: Aggregate all six views
    info!("Step 3/6: Computing aggregation views...");
    let report = comprehensive_report(&record_set, args.top_products);

    for (name, rows) in report.views() {
        info!("  {} view: {} rows", name, rows.len());
    }

    // Step 4: Charts (if requested)
    if let Some(charts_dir) = &args.charts_dir {
        info!("Step 4/6: Rendering charts...");
        render_charts(&report, charts_dir, args.html)?;
    } else {
        info!("Step 4/6: Skipping charts (not requested)");
    }

    // Step 5: Write the JSON report document
    info!("Step 5/6: Writing report document...");
    let document = ReportDocument::new(
        args.input.display().to_string(),
        summary.clone(),
        report.clone(),
    );
    write_report(&document, &args.output_json).context("Failed to write report JSON")?;
    info!("✓ Report written to: {}", args.output_json.display());

    // Step 6: CSV export (if requested)
    if let Some(export_dir) = &args.export_dir {
        info!("Step 6/6: Exporting CSV tables...");
        let written =
            export_views(&report, &summary, export_dir).context("Failed to export CSV tables")?;
        info!("✓ {} CSV files written to: {}", written.len(), export_dir.display());
    } else {
        info!("Step 6/6: Skipping CSV export (not requested)");
    }

    if args.print_summary {
        print_summary(&summary, &report);
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Render the four standard charts plus the optional dashboard
///
/// **Private** - an empty view skips its chart; it never aborts the run
fn render_charts(
    report: &ComprehensiveReport,
    charts_dir: &std::path::Path,
    html: bool,
) -> Result<()> {
    let config = ChartConfig::new().with_size(800, 450);

    let charts: [(&str, Result<String, ChartError>); 4] = [
        (
            "sales_trend.svg",
            render_trend_chart(
                &report.time_series,
                &config.clone().with_title("Sales by month"),
            ),
        ),
        (
            "category_sales.svg",
            render_bar_chart(
                &report.category,
                &config.clone().with_title("Revenue by category"),
            ),
        ),
        (
            "regions_pie.svg",
            render_pie_chart(
                &report.region,
                &config.clone().with_title("Revenue share by region"),
            ),
        ),
        (
            "top_sellers.svg",
            render_hbar_chart(
                &report.sales_rep,
                &config.clone().with_title("Top 5 sales reps"),
            ),
        ),
    ];

    for (file_name, rendered) in charts {
        match rendered {
            Ok(svg) => {
                let path = charts_dir.join(file_name);
                write_svg(&svg, &path).context("Failed to write chart SVG")?;
                info!("✓ Chart written to: {}", path.display());
            }
            Err(ChartError::EmptyView) => {
                warn!("Skipping {}: empty view", file_name);
            }
            Err(e) => {
                warn!("Skipping {}: {}", file_name, e);
            }
        }
    }

    if html {
        match render_dashboard(report) {
            Ok(page) => {
                let path = charts_dir.join("dashboard.html");
                write_html(&page, &path).context("Failed to write dashboard HTML")?;
                info!("✓ Dashboard written to: {}", path.display());
            }
            Err(ChartError::EmptyView) => {
                warn!("Skipping dashboard: every view is empty");
            }
            Err(e) => {
                warn!("Skipping dashboard: {}", e);
            }
        }
    }

    Ok(())
}

/// Print the stdout summary block
///
/// **Private**
fn print_summary(summary: &DataSummary, report: &ComprehensiveReport) {
    println!("\n{}", "=".repeat(80));
    println!("SALES REPORT SUMMARY");
    println!("{}", "=".repeat(80));
    println!("Transactions:   {}", summary.rows);
    println!("Total revenue:  {}", format_money(summary.total_revenue));
    if let Some(profit) = summary.total_profit {
        println!("Total profit:   {}", format_money(profit));
    }
    println!("Average ticket: {}", format_money(summary.average_ticket));
    if let Some((first, last)) = summary.date_range {
        println!(
            "Period:         {} - {}",
            first.format("%d.%m.%Y"),
            last.format("%d.%m.%Y")
        );
    }

    let best = [
        ("Best category", report.category.first()),
        ("Best region", report.region.first()),
        ("Best sales rep", report.sales_rep.first()),
    ];
    for (label, row) in best {
        if let Some(row) = row {
            println!(
                "{}: {} ({})",
                label,
                row.key,
                format_money(row.total_revenue)
            );
        }
    }

    if !report.top_products.is_empty() {
        println!("\nTop products by revenue:");
        for (i, row) in report.top_products.iter().enumerate() {
            println!(
                "  {:>2}. {:<16} {:>12}  ({} transactions)",
                i + 1,
                row.key,
                format_money(row.total_revenue),
                row.transaction_count
            );
        }
    }
    println!("{}", "=".repeat(80));
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    if args.top_products == 0 {
        anyhow::bail!("top_products must be greater than 0");
    }

    if args.top_products > 1000 {
        anyhow::bail!("top_products is too large (max 1000)");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample_csv(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("sales.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "Product_ID,Sale_Date,Sales_Rep,Region,Sales_Amount,Quantity_Sold,Product_Category"
        )
        .unwrap();
        writeln!(file, "P1,2023-01-05,Anna,North,100,2,Electronics").unwrap();
        writeln!(file, "P2,2023-01-20,Boris,South,300,1,Clothing").unwrap();
        path
    }

    #[test]
    fn test_validate_args_valid() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            input: sample_csv(dir.path()),
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = AnalyzeArgs::default();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_file() {
        let args = AnalyzeArgs {
            input: PathBuf::from("does/not/exist.csv"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_products_zero() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            input: sample_csv(dir.path()),
            top_products: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_products_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            input: sample_csv(dir.path()),
            top_products: 2000,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_execute_analyze_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            input: sample_csv(dir.path()),
            output_json: dir.path().join("report.json"),
            export_dir: Some(dir.path().join("exports")),
            charts_dir: Some(dir.path().join("charts")),
            html: true,
            ..Default::default()
        };

        execute_analyze(args).unwrap();

        assert!(dir.path().join("report.json").exists());
        assert!(dir.path().join("exports/category.csv").exists());
        assert!(dir.path().join("exports/summary.csv").exists());
        assert!(dir.path().join("charts/sales_trend.svg").exists());
        assert!(dir.path().join("charts/dashboard.html").exists());
        // No Customer_Type column: that view is empty and exports nothing
        assert!(!dir.path().join("exports/customer_type.csv").exists());
    }
}
