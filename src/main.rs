//! Sales Report Studio CLI
//!
//! An analysis tool for sales transaction data.
//! Generates aggregated reports, charts and export files from a CSV.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use sales_report_studio::commands::{
    execute_analyze, execute_sample, validate_args, AnalyzeArgs, SampleArgs,
};
use sales_report_studio::utils::config::{DEFAULT_TOP_PRODUCTS, SCHEMA_VERSION};

/// Sales Report Studio - Sales data analysis and reporting
#[derive(Parser, Debug)]
#[command(name = "sales-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a sales CSV and generate reports
    Analyze {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the JSON report document
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Directory for per-view CSV exports (optional)
        #[arg(short, long)]
        export_dir: Option<PathBuf>,

        /// Directory for static SVG charts (optional)
        #[arg(short, long)]
        charts_dir: Option<PathBuf>,

        /// Also write an HTML dashboard into the charts directory
        #[arg(long)]
        html: bool,

        /// Number of rows in the top-products ranking
        #[arg(long, default_value_t = DEFAULT_TOP_PRODUCTS)]
        top_products: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Generate a deterministic sample sales CSV
    Sample {
        /// Output CSV path
        #[arg(short, long, default_value = "sample_data.csv")]
        output: PathBuf,

        /// Number of data rows
        #[arg(long, default_value = "100")]
        rows: usize,

        /// Generator seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            input,
            output,
            export_dir,
            charts_dir,
            html,
            top_products,
            summary,
        } => {
            let args = AnalyzeArgs {
                input,
                output_json: output,
                export_dir,
                charts_dir,
                html,
                top_products,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Sample { output, rows, seed } => {
            execute_sample(SampleArgs { output, rows, seed })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a report JSON file
///
/// **Private** - internal command implementation
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    use sales_report_studio::output::read_report;

    println!("Validating report: {}", file_path.display());

    let document = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Version: {}", document.version);
    println!("  Source: {}", document.source_file);
    println!("  Rows analyzed: {}", document.summary.rows);
    println!("  Total revenue: {:.2}", document.summary.total_revenue);
    for (name, rows) in document.report.views() {
        println!("  {} view: {} rows", name, rows.len());
    }

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Sales Report Studio Document Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string          - Schema version (e.g., '1.0.0')");
        println!("  source_file: string      - Input CSV the report came from");
        println!("  generated_at: string     - ISO 8601 timestamp");
        println!("  summary: object          - Dataset overview");
        println!("    rows: number           - Rows after cleaning");
        println!("    total_revenue: number  - Sum of sales amounts");
        println!("    average_ticket: number - Mean sales amount");
        println!("  report: object           - The six aggregation views");
        println!("    time_series: array     - Monthly revenue/count/profit");
        println!("    category: array        - Per-category stats + market share");
        println!("    region: array          - Per-region stats");
        println!("    sales_rep: array       - Per-rep stats + efficiency");
        println!("    customer_type: array   - Per-customer-type stats");
        println!("    top_products: array    - Top-N products by revenue");
        println!("  Each view row:");
        println!("    key: string            - Group key (month, category, ...)");
        println!("    total_revenue: number  - Group revenue");
        println!("    transaction_count: number - Records in the group");
        println!("    average_ticket: number?   - Absent on time series");
        println!("    total_profit: number?  - Absent without cost data");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Sales Report Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("An analysis tool for sales transaction data.");
}
