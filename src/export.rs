//! Result exporter: portable CSV serialization of produced tables

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::error::{Error, Result};
use crate::table::Table;

/// Artifacts the engine offers for download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    SrsSample,
    StratifiedSample,
    Allocation,
    Comparison,
    Describe,
}

impl Artifact {
    /// Descriptive download file name for the artifact
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::SrsSample => "srs_sample.csv",
            Artifact::StratifiedSample => "stratified_sample.csv",
            Artifact::Allocation => "allocation.csv",
            Artifact::Comparison => "comparison.csv",
            Artifact::Describe => "describe.csv",
        }
    }
}

/// Serialize a table to UTF-8, comma-delimited bytes
///
/// Header row first, then data rows; column and row order are exactly as
/// produced.
pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut wtr = Writer::from_writer(Vec::new());

    wtr.write_record(table.columns()).map_err(Error::Csv)?;
    for row in table.rows() {
        wtr.write_record(row).map_err(Error::Csv)?;
    }

    wtr.into_inner()
        .map_err(|e| Error::Format(format!("Could not finalize CSV buffer: {}", e)))
}

/// Write a table to a CSV file
pub fn write_csv_file<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref()).map_err(Error::Io)?;
    let mut wtr = Writer::from_writer(file);

    wtr.write_record(table.columns()).map_err(Error::Csv)?;
    for row in table.rows() {
        wtr.write_record(row).map_err(Error::Csv)?;
    }

    wtr.flush().map_err(Error::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_csv_bytes_round_trips_order() {
        let table = Table::with_rows(
            vec!["b".to_string(), "a".to_string()],
            vec![
                vec!["2".to_string(), "1".to_string()],
                vec!["4".to_string(), "3".to_string()],
            ],
        )
        .unwrap();

        let bytes = to_csv_bytes(&table).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "b,a\n2,1\n4,3\n");
    }

    #[test]
    fn test_artifact_file_names() {
        assert_eq!(Artifact::SrsSample.file_name(), "srs_sample.csv");
        assert_eq!(
            Artifact::StratifiedSample.file_name(),
            "stratified_sample.csv"
        );
        assert_eq!(Artifact::Allocation.file_name(), "allocation.csv");
    }
}
