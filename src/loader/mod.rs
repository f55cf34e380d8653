//! Loading and preparation of the transaction table.
//!
//! This module handles:
//! - Reading CSV files with encoding fallback
//! - Validating required columns
//! - Cleaning cells into the typed record set
//! - Summarizing the cleaned dataset

pub mod clean;
pub mod csv_reader;
pub mod schema;

// Re-export main types and functions
pub use clean::{clean, summarize};
pub use csv_reader::{load_csv, Encoding, RawTable};
pub use schema::{ColumnSet, DataSummary, RecordSet, TransactionRecord};
