//! SVG and HTML file writers.
//!
//! Writes rendered chart and dashboard strings to files with proper encoding.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - used by the analyze command for static charts
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_text(svg_content, output_path.as_ref(), "SVG")
}

/// Write an HTML page to a file
///
/// **Public** - used by the analyze command for the dashboard
pub fn write_html(html_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_text(html_content, output_path.as_ref(), "HTML")
}

/// Shared writer with path validation and parent-dir creation
///
/// **Private**
fn write_text(content: &str, output_path: &Path, kind: &str) -> Result<(), OutputError> {
    info!("Writing {} to: {}", kind, output_path.display());

    if output_path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }
    if output_path.exists() && output_path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            output_path.display()
        )));
    }

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent)
                .map_err(|e| OutputError::InvalidPath(format!("Cannot create directory: {}", e)))?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    info!(
        "{} written successfully ({} bytes, {:.2} KB)",
        kind,
        content.len(),
        content.len() as f64 / 1024.0
    );

    Ok(())
}
