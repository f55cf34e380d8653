//! JSON report document writer.
//!
//! Writes ReportDocument structs to JSON files with proper formatting.

use crate::analyzer::report::ReportDocument;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a report document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - Report data to write
/// * `output_path` - Path to output JSON file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    document: &ReportDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        file_size(output_path)
    );

    Ok(())
}

/// Read a report document from a JSON file
///
/// **Public** - used by the validate command and tests
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ReportDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let document: ReportDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, source {}",
        document.version, document.source_file
    );

    Ok(document)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::engine::SummaryRow;
    use crate::analyzer::report::ComprehensiveReport;
    use crate::loader::schema::DataSummary;
    use tempfile::NamedTempFile;

    fn create_test_document() -> ReportDocument {
        let report = ComprehensiveReport {
            time_series: Vec::new(),
            category: vec![SummaryRow {
                key: "Electronics".to_string(),
                total_revenue: 1000.0,
                transaction_count: 4,
                average_ticket: Some(250.0),
                total_profit: None,
                units_sold: Some(12.0),
                market_share_pct: Some(100.0),
                efficiency: None,
            }],
            region: Vec::new(),
            sales_rep: Vec::new(),
            customer_type: Vec::new(),
            top_products: Vec::new(),
        };
        let summary = DataSummary {
            rows: 4,
            columns: 3,
            total_revenue: 1000.0,
            total_profit: None,
            average_ticket: 250.0,
            date_range: None,
            region_count: None,
            category_count: Some(1),
        };
        ReportDocument::new("sales.csv", summary, report)
    }

    #[test]
    fn test_write_and_read_report() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&document, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, document.version);
        assert_eq!(loaded.source_file, "sales.csv");
        assert_eq!(loaded.report.category, document.report.category);
    }

    #[test]
    fn test_absent_columns_not_serialized() {
        let document = create_test_document();
        let json = serde_json::to_string(&document).unwrap();
        // No profit column in the source: the field must be absent, not null
        assert!(!json.contains("total_profit"));
        assert!(json.contains("market_share_pct"));
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        let document = create_test_document();
        write_report(&document, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
