use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::dataset::{Column, Dataset};
use crate::error::{Error, Result};

/// Read a Dataset from a CSV file
///
/// The first row is the header. Column types are inferred from the
/// values: all-numeric columns become numeric, everything else is
/// categorical.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    read_csv_reader(file)
}

/// Read a Dataset from any CSV reader (e.g. an uploaded buffer)
pub fn read_csv_reader<R: Read>(reader: R) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| Error::Format(format!("Could not read CSV header: {}", e)))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        return Err(Error::Format("CSV source has no header row".to_string()));
    }

    // Collect data for each column
    let mut columns: HashMap<String, Vec<String>> = HashMap::new();
    for header in &headers {
        columns.insert(header.clone(), Vec::new());
    }

    for result in rdr.records() {
        let record = result.map_err(|e| Error::Format(format!("Malformed CSV row: {}", e)))?;
        for (i, header) in headers.iter().enumerate() {
            let cell = if i < record.len() {
                record[i].to_string()
            } else {
                // Short rows are padded with empty cells
                String::new()
            };
            if let Some(values) = columns.get_mut(header) {
                values.push(cell);
            }
        }
    }

    build_dataset(&headers, columns)
}

/// Assemble a Dataset from per-column string cells, in header order
pub(crate) fn build_dataset(
    headers: &[String],
    mut columns: HashMap<String, Vec<String>>,
) -> Result<Dataset> {
    let row_count = headers
        .first()
        .and_then(|h| columns.get(h))
        .map(|v| v.len())
        .unwrap_or(0);
    if row_count == 0 {
        return Err(Error::EmptyDataset(
            "Source yielded zero records".to_string(),
        ));
    }

    let mut typed = Vec::with_capacity(headers.len());
    for header in headers {
        let values = columns.remove(header).unwrap_or_default();
        typed.push((header.clone(), Column::from_strings(values)));
    }

    Dataset::from_columns(typed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ColumnType;

    #[test]
    fn test_read_csv_reader_infers_types() {
        let data = "region,income\nnorth,100\nsouth,200\nnorth,150\n";
        let df = read_csv_reader(data.as_bytes()).unwrap();

        assert_eq!(df.row_count(), 3);
        assert_eq!(df.column_names(), vec!["region", "income"]);
        assert_eq!(df.column_type("region").unwrap(), ColumnType::Categorical);
        assert_eq!(df.column_type("income").unwrap(), ColumnType::Numeric);
    }

    #[test]
    fn test_read_csv_reader_empty_is_error() {
        let data = "region,income\n";
        assert!(matches!(
            read_csv_reader(data.as_bytes()),
            Err(Error::EmptyDataset(_))
        ));
    }

    #[test]
    fn test_short_rows_padded() {
        let data = "a,b\n1,2\n3\n";
        let df = read_csv_reader(data.as_bytes()).unwrap();
        // Column b has an empty cell, so it is read as categorical
        assert_eq!(df.column_type("b").unwrap(), ColumnType::Categorical);
        assert_eq!(df.column_type("a").unwrap(), ColumnType::Numeric);
    }
}
