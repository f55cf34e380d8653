//! CSV file reader with encoding fallback.
//!
//! Reads the raw bytes, tries strict UTF-8 first and falls back to Latin-1,
//! then splits the text into header and data rows with a small state machine
//! that understands quoted fields (including embedded commas, quotes and
//! newlines). No CSV dialect configuration: comma separator, `"` quote.

use crate::utils::config::REQUIRED_COLUMNS;
use crate::utils::error::LoadError;
use log::{debug, info, warn};
use std::path::Path;

/// Detected source encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Utf8,
    Latin1,
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Encoding::Utf8 => write!(f, "utf-8"),
            Encoding::Latin1 => write!(f, "latin-1"),
        }
    }
}

/// Untyped table as read from disk: a header row plus string cells
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub encoding: Encoding,
}

impl RawTable {
    /// Index of a column by exact header name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Load a CSV file into a raw table
///
/// **Public** - main entry point for file loading
///
/// # Arguments
/// * `path` - Path to the CSV file
///
/// # Returns
/// Raw table with headers validated against the required column list
///
/// # Errors
/// * `LoadError::Io` - file cannot be read
/// * `LoadError::EmptyFile` - no header row
/// * `LoadError::MissingColumns` - a required column is absent
/// * `LoadError::MalformedRow` - a data row has the wrong field count
pub fn load_csv(path: impl AsRef<Path>) -> Result<RawTable, LoadError> {
    let path = path.as_ref();
    info!("Loading file: {}", path.display());

    let bytes = std::fs::read(path)?;
    let (text, encoding) = decode(&bytes);
    debug!("Decoded {} bytes as {}", bytes.len(), encoding);

    let mut records = split_records(&text);
    if records.is_empty() {
        return Err(LoadError::EmptyFile);
    }

    let headers = records.remove(0);
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        warn!("Missing columns: {:?}", missing);
        return Err(LoadError::MissingColumns(missing));
    }

    for (i, row) in records.iter().enumerate() {
        if row.len() != headers.len() {
            return Err(LoadError::MalformedRow {
                // +2: one for the header row, one for 1-based numbering
                line: i + 2,
                reason: format!("expected {} fields, found {}", headers.len(), row.len()),
            });
        }
    }

    info!("File loaded (encoding: {}, {} rows)", encoding, records.len());

    Ok(RawTable {
        headers,
        rows: records,
        encoding,
    })
}

/// Decode file bytes, preferring strict UTF-8
///
/// **Private** - Latin-1 is the identity byte-to-char mapping, so the
/// fallback never fails; it stands in for the legacy-encoding retry list
/// single-byte exports tend to need.
fn decode(bytes: &[u8]) -> (String, Encoding) {
    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), Encoding::Utf8),
        Err(_) => {
            let text: String = bytes.iter().map(|&b| b as char).collect();
            (text, Encoding::Latin1)
        }
    }
}

/// Split CSV text into records of fields
///
/// **Private** - state machine over the whole text so quoted fields may
/// contain separators and line breaks. A doubled quote inside a quoted
/// field is an escaped quote.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                '\r' => {
                    if chars.peek() == Some(&'\n') {
                        chars.next();
                    }
                    fields.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut fields));
                }
                '\n' => {
                    fields.push(std::mem::take(&mut field));
                    records.push(std::mem::take(&mut fields));
                }
                _ => field.push(c),
            }
        }
    }

    // Trailing record without a final newline
    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    // A lone newline at EOF produces an empty single-field record; drop those
    records.retain(|r| !(r.len() == 1 && r[0].trim().is_empty()));

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let records = split_records("a,b,c\n1,2,3\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], vec!["a", "b", "c"]);
        assert_eq!(records[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        let records = split_records("name,amount\n\"Smith, John\",100\n");
        assert_eq!(records[1], vec!["Smith, John", "100"]);
    }

    #[test]
    fn test_split_escaped_quote() {
        let records = split_records("a\n\"say \"\"hi\"\"\"\n");
        assert_eq!(records[1], vec!["say \"hi\""]);
    }

    #[test]
    fn test_split_quoted_newline() {
        let records = split_records("a,b\n\"line1\nline2\",x\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1][0], "line1\nline2");
    }

    #[test]
    fn test_split_crlf() {
        let records = split_records("a,b\r\n1,2\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], vec!["1", "2"]);
    }

    #[test]
    fn test_split_no_trailing_newline() {
        let records = split_records("a,b\n1,2");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1], vec!["1", "2"]);
    }

    #[test]
    fn test_decode_utf8() {
        let (text, encoding) = decode("héllo".as_bytes());
        assert_eq!(text, "héllo");
        assert_eq!(encoding, Encoding::Utf8);
    }

    #[test]
    fn test_decode_latin1_fallback() {
        // 0xE9 is 'é' in Latin-1 and invalid as a UTF-8 start byte here
        let (text, encoding) = decode(&[b'h', 0xE9, b'l']);
        assert_eq!(text, "hél");
        assert_eq!(encoding, Encoding::Latin1);
    }
}
