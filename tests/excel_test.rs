#![cfg(feature = "excel")]

use std::fs::File;
use std::path::PathBuf;

use sondage::dataset::ColumnType;
use sondage::error::Error;
use sondage::io::{read_excel, read_excel_reader};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

#[test]
fn test_multi_sheet_workbook_concatenates_rows() {
    // regions.xlsx: sheet "north" holds two rows, sheet "south" one row,
    // both under the header (region, income)
    let df = read_excel(fixture("regions.xlsx")).unwrap();

    assert_eq!(df.row_count(), 3);
    assert_eq!(df.column_names(), vec!["region", "income"]);
    assert_eq!(df.column_type("income").unwrap(), ColumnType::Numeric);

    let freqs = df.frequencies("region").unwrap();
    assert_eq!(freqs[0].value, "north");
    assert_eq!(freqs[0].count, 2);
    assert_eq!(freqs[1].value, "south");
    assert_eq!(freqs[1].count, 1);

    let incomes = df.numeric_values("income").unwrap();
    assert_eq!(incomes, &[100.0, 150.0, 200.0]);
}

#[test]
fn test_sheet_schema_mismatch_is_a_format_error() {
    // mismatch.xlsx: second sheet renames "region" to "zone"
    let result = read_excel(fixture("mismatch.xlsx"));
    assert!(matches!(
        result,
        Err(Error::Format(msg)) if msg.contains("second") && msg.contains("schema")
    ));
}

#[test]
fn test_read_excel_reader_from_open_file() {
    let file = File::open(fixture("regions.xlsx")).unwrap();
    let df = read_excel_reader(file).unwrap();
    assert_eq!(df.row_count(), 3);
}

#[test]
fn test_missing_workbook_is_an_error() {
    assert!(read_excel(fixture("absent.xlsx")).is_err());
}
