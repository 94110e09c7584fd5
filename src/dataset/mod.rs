//! Dataset module - in-memory population table
//!
//! A `Dataset` wraps a loaded tabular source as an ordered set of named,
//! typed columns. Columns are classified once at load time as numeric or
//! categorical; the dataset is immutable afterwards. Samples are
//! materialized as new `Dataset` values via [`Dataset::take`], so every
//! statistic available for the population is available for a sample.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::stats::descriptive;
use crate::table::Table;

/// Semantic column classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Supports mean/aggregate statistics
    Numeric,
    /// Supports frequency/proportion statistics
    Categorical,
}

/// A single typed column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Column {
    Numeric(Vec<f64>),
    Categorical(Vec<String>),
}

impl Column {
    /// Infer a column from raw string cells
    ///
    /// The column is numeric only when every trimmed cell parses as `f64`;
    /// a single empty or non-numeric cell makes the whole column
    /// categorical.
    pub fn from_strings(values: Vec<String>) -> Self {
        let all_numeric = !values.is_empty()
            && values
                .iter()
                .all(|s| !s.trim().is_empty() && s.trim().parse::<f64>().is_ok());

        if all_numeric {
            let parsed: Vec<f64> = values
                .iter()
                .map(|s| s.trim().parse::<f64>().unwrap_or(0.0))
                .collect();
            Column::Numeric(parsed)
        } else {
            Column::Categorical(values)
        }
    }

    /// Number of values in the column
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Categorical(v) => v.len(),
        }
    }

    /// Check if the column is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column's classification
    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Numeric(_) => ColumnType::Numeric,
            Column::Categorical(_) => ColumnType::Categorical,
        }
    }

    /// Display form of the value at `pos`
    pub fn value_to_string(&self, pos: usize) -> Option<String> {
        match self {
            Column::Numeric(v) => v.get(pos).map(|x| x.to_string()),
            Column::Categorical(v) => v.get(pos).cloned(),
        }
    }

    /// Display form of every value, in order
    pub fn display_values(&self) -> Vec<String> {
        match self {
            Column::Numeric(v) => v.iter().map(|x| x.to_string()).collect(),
            Column::Categorical(v) => v.clone(),
        }
    }

    /// New column containing the values at `indices`, in that order
    fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Numeric(v) => {
                Column::Numeric(indices.iter().map(|&i| v[i]).collect())
            }
            Column::Categorical(v) => {
                Column::Categorical(indices.iter().map(|&i| v[i].clone()).collect())
            }
        }
    }
}

/// One row of a frequency distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency {
    /// Display form of the value
    pub value: String,
    /// Number of records holding the value
    pub count: usize,
    /// Share of the dataset, in percent, rounded to 1 decimal
    pub percent: f64,
}

/// Dataset struct: column-oriented, immutable after load
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    columns: Vec<(String, Column)>,
    row_count: usize,
}

impl Dataset {
    /// Build a dataset from named columns
    ///
    /// Column order is preserved. Fails on duplicate names or inconsistent
    /// column lengths.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Result<Self> {
        let row_count = columns.first().map(|(_, c)| c.len()).unwrap_or(0);

        let mut seen: Vec<&str> = Vec::with_capacity(columns.len());
        for (name, column) in &columns {
            if seen.contains(&name.as_str()) {
                return Err(Error::DuplicateColumnName(name.clone()));
            }
            seen.push(name);

            if column.len() != row_count {
                return Err(Error::InconsistentRowCount {
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        Ok(Dataset { columns, row_count })
    }

    /// Total number of records (fixed for the dataset's lifetime)
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in load order
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Check if the dataset contains a column with the given name
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Classification of the named column
    pub fn column_type(&self, name: &str) -> Result<ColumnType> {
        Ok(self.column(name)?.column_type())
    }

    /// Numeric values of the named column
    ///
    /// Fails with `InvalidValue` when the column is categorical.
    pub fn numeric_values(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(v) => Ok(v),
            Column::Categorical(_) => Err(Error::InvalidValue(format!(
                "Column '{}' is not numeric",
                name
            ))),
        }
    }

    /// Frequency distribution of the named column
    ///
    /// Ordered by descending count, ties by first appearance. Percentages
    /// are shares of the dataset's fixed record count, rounded to 1
    /// decimal.
    pub fn frequencies(&self, name: &str) -> Result<Vec<Frequency>> {
        let values = self.column(name)?.display_values();

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for value in values {
            if !counts.contains_key(&value) {
                order.push(value.clone());
            }
            *counts.entry(value).or_insert(0) += 1;
        }

        // Descending count; stable sort keeps first-appearance order on ties
        let mut result: Vec<Frequency> = order
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                let percent = round_to(count as f64 / self.row_count as f64 * 100.0, 1);
                Frequency {
                    value,
                    count,
                    percent,
                }
            })
            .collect();
        result.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(result)
    }

    /// Descriptive summary: one row per column
    ///
    /// Mirrors the classic describe output. Every column reports count and
    /// unique count; categorical columns add the mode (`top`) and its
    /// frequency (`freq`); numeric columns add mean/std/min/quartiles/max.
    /// Cells that do not apply are empty strings. Pure function of the
    /// dataset's state.
    pub fn describe(&self) -> Result<Table> {
        let header = vec![
            "variable", "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%",
            "75%", "max",
        ];
        let mut table = Table::new(header.into_iter().map(String::from).collect());

        for (name, column) in &self.columns {
            let unique = {
                let mut distinct: Vec<String> = column.display_values();
                distinct.sort();
                distinct.dedup();
                distinct.len()
            };

            let row = match column {
                Column::Numeric(values) => {
                    let stats = descriptive::describe_impl(values)?;
                    vec![
                        name.clone(),
                        stats.count.to_string(),
                        unique.to_string(),
                        String::new(),
                        String::new(),
                        stats.mean.to_string(),
                        stats.std.to_string(),
                        stats.min.to_string(),
                        stats.q1.to_string(),
                        stats.median.to_string(),
                        stats.q3.to_string(),
                        stats.max.to_string(),
                    ]
                }
                Column::Categorical(values) => {
                    let freqs = self.frequencies(name)?;
                    let (top, freq) = match freqs.first() {
                        Some(mode) => (mode.value.clone(), mode.count.to_string()),
                        None => (String::new(), String::new()),
                    };
                    vec![
                        name.clone(),
                        values.len().to_string(),
                        unique.to_string(),
                        top,
                        freq,
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                        String::new(),
                    ]
                }
            };
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// First `n` records as a table
    pub fn head(&self, n: usize) -> Table {
        let limit = n.min(self.row_count);
        let indices: Vec<usize> = (0..limit).collect();
        self.rows_table(&indices)
    }

    /// Full materialization as a table (used when exporting samples)
    pub fn to_table(&self) -> Table {
        let indices: Vec<usize> = (0..self.row_count).collect();
        self.rows_table(&indices)
    }

    /// New dataset containing the records at `indices`, in that order
    ///
    /// This is the sample materialization primitive: column order and
    /// types are preserved, so the result supports the same statistics as
    /// the source.
    pub fn take(&self, indices: &[usize]) -> Result<Dataset> {
        for &idx in indices {
            if idx >= self.row_count {
                return Err(Error::InvalidValue(format!(
                    "Row index {} out of bounds for dataset of {} records",
                    idx, self.row_count
                )));
            }
        }

        let columns = self
            .columns
            .iter()
            .map(|(name, column)| (name.clone(), column.take(indices)))
            .collect();

        Ok(Dataset {
            columns,
            row_count: indices.len(),
        })
    }

    fn rows_table(&self, indices: &[usize]) -> Table {
        let mut table = Table::new(self.column_names());
        for &idx in indices {
            let row: Vec<String> = self
                .columns
                .iter()
                .map(|(_, column)| column.value_to_string(idx).unwrap_or_default())
                .collect();
            table.append_row(row);
        }
        table
    }
}

/// Round to the given number of decimal places
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}
