//! Sample command implementation.
//!
//! Generates a deterministic sample sales CSV for demos and tests.
//! The same seed always produces the same file.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

const SALES_REPS: [&str; 4] = ["Anna", "Boris", "Clara", "Dmitry"];
const REGIONS: [&str; 4] = ["North", "South", "East", "West"];
const CATEGORIES: [&str; 4] = ["Electronics", "Clothing", "Groceries", "Furniture"];
const CUSTOMER_TYPES: [&str; 2] = ["New", "Returning"];

/// Pool of product ids so the top-products ranking has repeat buyers
const PRODUCT_POOL: usize = 25;

/// Arguments for the sample command
#[derive(Debug, Clone)]
pub struct SampleArgs {
    /// Output CSV path
    pub output: PathBuf,

    /// Number of data rows to generate
    pub rows: usize,

    /// Generator seed
    pub seed: u64,
}

impl Default for SampleArgs {
    fn default() -> Self {
        Self {
            output: PathBuf::from("sample_data.csv"),
            rows: 100,
            seed: 42,
        }
    }
}

/// Execute the sample command
///
/// **Public** - main entry point called from main.rs
pub fn execute_sample(args: SampleArgs) -> Result<()> {
    if args.rows == 0 {
        anyhow::bail!("rows must be greater than 0");
    }

    info!(
        "Generating {} sample rows (seed {}) into {}",
        args.rows,
        args.seed,
        args.output.display()
    );

    let content = generate_csv(args.rows, args.seed)?;

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(content.as_bytes())
        .context("Failed to write sample CSV")?;
    writer.flush().context("Failed to flush sample CSV")?;

    info!("✓ Sample data written to: {}", args.output.display());
    Ok(())
}

/// Build the sample CSV content
///
/// **Public** - exposed so tests can check determinism without touching disk
pub fn generate_csv(rows: usize, seed: u64) -> Result<String> {
    let start_date =
        NaiveDate::from_ymd_opt(2023, 1, 1).context("Invalid generator start date")?;

    let mut rng = Lcg::new(seed);
    let mut out = String::from(
        "Product_ID,Sale_Date,Sales_Rep,Region,Product_Category,Customer_Type,\
         Quantity_Sold,Unit_Price,Unit_Cost,Sales_Amount\n",
    );
    let mut total_revenue = 0.0;

    for i in 0..rows {
        let product = format!("P{:04}", 1 + rng.below(PRODUCT_POOL as u64));
        let date = start_date + Duration::days(i as i64 % 365);
        let rep = rng.pick(&SALES_REPS);
        let region = rng.pick(&REGIONS);
        let category = rng.pick(&CATEGORIES);
        let customer = rng.pick(&CUSTOMER_TYPES);
        let quantity = 1 + rng.below(49);
        let unit_price = round2(rng.uniform(50.0, 500.0));
        let unit_cost = round2(unit_price * rng.uniform(0.6, 0.9));
        let amount = round2(quantity as f64 * unit_price);
        total_revenue += amount;

        out.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            product, date, rep, region, category, customer, quantity, unit_price, unit_cost,
            amount
        ));
    }

    info!(
        "Sample dataset: {} rows, total revenue ${:.2}",
        rows, total_revenue
    );

    Ok(out)
}

/// Small linear congruential generator.
///
/// Good enough for demo data and keeps the sample command fully
/// reproducible from the seed alone.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        let mut rng = Self(seed);
        rng.step();
        rng
    }

    fn step(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    /// Uniform integer in 0..n
    fn below(&mut self, n: u64) -> u64 {
        (self.step() >> 11) % n
    }

    /// Uniform float in lo..hi
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.step() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
