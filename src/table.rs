//! Portable row/column tables
//!
//! Every artifact the engine produces (describe output, allocation tables,
//! proportion comparisons, sample previews) is ultimately rendered as a
//! `Table`: an ordered header plus rows of display strings. Column and row
//! order are preserved exactly as produced.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Ordered header + rows of display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, in output order
    columns: Vec<String>,
    /// Data rows; every row has one cell per column
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given header and no rows
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a table from a header and pre-built rows
    ///
    /// Fails if any row's cell count differs from the header width.
    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for row in &rows {
            if row.len() != columns.len() {
                return Err(Error::InconsistentRowCount {
                    expected: columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Table { columns, rows })
    }

    /// Append a row
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::InconsistentRowCount {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Append a row whose width the caller has already matched to the header
    pub(crate) fn append_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Column names in output order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in output order
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Check if the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        assert!(table
            .push_row(vec!["1".to_string(), "2".to_string()])
            .is_ok());
        assert!(table.push_row(vec!["1".to_string()]).is_err());
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_append_row_keeps_header_width() {
        let mut table = Table::new(vec!["a".to_string(), "b".to_string()]);
        table.append_row(vec!["1".to_string(), "2".to_string()]);
        assert_eq!(table.row_count(), 1);
        assert!(table.rows().iter().all(|r| r.len() == table.column_count()));
    }

    #[test]
    fn test_with_rows_preserves_order() {
        let table = Table::with_rows(
            vec!["x".to_string()],
            vec![vec!["3".to_string()], vec!["1".to_string()], vec!["2".to_string()]],
        )
        .unwrap();
        let cells: Vec<&str> = table.rows().iter().map(|r| r[0].as_str()).collect();
        assert_eq!(cells, vec!["3", "1", "2"]);
    }
}
