use sales_report_studio::loader::{clean, load_csv, summarize, Encoding};
use sales_report_studio::utils::error::LoadError;

use std::io::Write;
use std::path::PathBuf;

const HEADER: &str =
    "Product_ID,Sale_Date,Sales_Rep,Region,Sales_Amount,Quantity_Sold,Product_Category";

fn write_csv(dir: &std::path::Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content).unwrap();
    path
}

#[test]
fn test_load_utf8_file() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!("{}\nP1,2023-01-05,Anna,North,100,2,Electronics\n", HEADER);
    let path = write_csv(dir.path(), "sales.csv", content.as_bytes());

    let table = load_csv(&path).unwrap();

    assert_eq!(table.encoding, Encoding::Utf8);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.headers.len(), 7);
}

#[test]
fn test_load_latin1_fallback() {
    let dir = tempfile::tempdir().unwrap();
    // "Ren\xE9" is Latin-1 for "René" and invalid UTF-8
    let mut content = format!("{}\n", HEADER).into_bytes();
    content.extend_from_slice(b"P1,2023-01-05,Ren\xE9,North,100,2,Electronics\n");
    let path = write_csv(dir.path(), "legacy.csv", &content);

    let table = load_csv(&path).unwrap();

    assert_eq!(table.encoding, Encoding::Latin1);
    let rs = clean(&table).unwrap();
    assert_eq!(rs.records[0].sales_rep.as_deref(), Some("René"));
}

#[test]
fn test_load_rejects_missing_required_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "partial.csv",
        b"Product_ID,Sales_Amount\nP1,100\n",
    );

    match load_csv(&path) {
        Err(LoadError::MissingColumns(missing)) => {
            assert!(missing.contains(&"Sale_Date".to_string()));
            assert!(missing.contains(&"Region".to_string()));
        }
        other => panic!("expected MissingColumns, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_load_rejects_ragged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!("{}\nP1,2023-01-05,Anna\n", HEADER);
    let path = write_csv(dir.path(), "ragged.csv", content.as_bytes());

    assert!(matches!(
        load_csv(&path),
        Err(LoadError::MalformedRow { line: 2, .. })
    ));
}

#[test]
fn test_load_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), "empty.csv", b"");

    assert!(matches!(load_csv(&path), Err(LoadError::EmptyFile)));
}

#[test]
fn test_clean_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!(
        "{},Unit_Cost\n\
         P1,2023-01-05,Anna,North,100,2,Electronics,20\n\
         P2,bad-date,Boris,South,300,1,Clothing,50\n\
         P3,2023-02-01,,East,50,,Groceries,5\n",
        HEADER
    );
    let path = write_csv(dir.path(), "sales.csv", content.as_bytes());

    let table = load_csv(&path).unwrap();
    let rs = clean(&table).unwrap();

    // Bad date drops the row
    assert_eq!(rs.len(), 2);

    // Blank rep filled with the sentinel
    assert_eq!(rs.records[1].sales_rep.as_deref(), Some("Unknown"));

    // Blank quantity imputed with the median of [2] = 2
    assert_eq!(rs.records[1].quantity_sold, Some(2.0));

    // Profit derived: 100 - 20*2 = 60
    assert!(rs.columns.profit);
    assert_eq!(rs.records[0].profit, Some(60.0));
}

#[test]
fn test_summary_of_cleaned_data() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!(
        "{}\n\
         P1,2023-01-05,Anna,North,100,2,Electronics\n\
         P2,2023-03-20,Boris,South,300,1,Clothing\n",
        HEADER
    );
    let path = write_csv(dir.path(), "sales.csv", content.as_bytes());

    let rs = clean(&load_csv(&path).unwrap()).unwrap();
    let summary = summarize(&rs);

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.total_revenue, 400.0);
    assert_eq!(summary.average_ticket, 200.0);
    assert_eq!(summary.region_count, Some(2));
    assert_eq!(summary.category_count, Some(2));
    assert!(summary.total_profit.is_none());
    assert!(summary.date_range.is_some());
}

#[test]
fn test_quoted_fields_survive() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!(
        "{}\n\"P1\",2023-01-05,\"Smith, Anna\",North,100,2,Electronics\n",
        HEADER
    );
    let path = write_csv(dir.path(), "quoted.csv", content.as_bytes());

    let rs = clean(&load_csv(&path).unwrap()).unwrap();
    assert_eq!(rs.records[0].sales_rep.as_deref(), Some("Smith, Anna"));
}
