use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use calamine::{open_workbook, Reader, Xlsx};

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::io::csv::build_dataset;

/// Read a Dataset from an Excel (.xlsx) file
///
/// All sheets of the workbook are concatenated row-wise. The first
/// non-empty sheet's first row is the header; every other sheet must
/// carry the same header, otherwise the load fails with a format error.
pub fn read_excel<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let mut workbook: Xlsx<BufReader<File>> = open_workbook(path.as_ref())
        .map_err(|e| Error::Format(format!("Could not open Excel file: {}", e)))?;
    read_workbook(&mut workbook)
}

/// Read a Dataset from any seekable xlsx reader (e.g. an uploaded buffer)
pub fn read_excel_reader<RS: Read + Seek>(reader: RS) -> Result<Dataset> {
    let mut workbook = Xlsx::new(reader)
        .map_err(|e| Error::Format(format!("Could not open Excel source: {}", e)))?;
    read_workbook(&mut workbook)
}

fn read_workbook<RS: Read + Seek>(workbook: &mut Xlsx<RS>) -> Result<Dataset> {
    let sheet_names = workbook.sheet_names().to_owned();
    if sheet_names.is_empty() {
        return Err(Error::Format("Excel file has no sheets".to_string()));
    }

    let mut headers: Option<Vec<String>> = None;
    let mut columns: HashMap<String, Vec<String>> = HashMap::new();

    for sheet_name in &sheet_names {
        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| Error::Format(format!("Could not read sheet '{}': {}", sheet_name, e)))?;

        let mut rows = range.rows();
        // Empty sheets contribute nothing
        let header_row = match rows.next() {
            Some(row) => row,
            None => continue,
        };
        let sheet_headers: Vec<String> =
            header_row.iter().map(|cell| cell.to_string()).collect();

        if let Some(expected) = &headers {
            if *expected != sheet_headers {
                return Err(Error::Format(format!(
                    "Sheet '{}' does not share the first sheet's column schema",
                    sheet_name
                )));
            }
        } else {
            for header in &sheet_headers {
                columns.insert(header.clone(), Vec::new());
            }
            headers = Some(sheet_headers.clone());
        }

        // The sheet's own header row equals the workbook schema here
        for row in rows {
            for (i, header) in sheet_headers.iter().enumerate() {
                let cell = row
                    .get(i)
                    .map(|c| c.to_string().trim().to_string())
                    .unwrap_or_default();
                if let Some(values) = columns.get_mut(header) {
                    values.push(cell);
                }
            }
        }
    }

    let headers = headers.ok_or_else(|| {
        Error::EmptyDataset("Excel workbook contains no data rows".to_string())
    })?;
    build_dataset(&headers, columns)
}
