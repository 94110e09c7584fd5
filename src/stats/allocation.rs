//! Proportional allocation module
//!
//! Computes per-stratum target sample sizes proportional to stratum
//! population shares, with an integer reconciliation step so targets sum
//! exactly to the requested total.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{round_to, Column, Dataset};
use crate::error::{Error, Result};
use crate::table::Table;

/// Per-stratum allocation row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StratumAllocation {
    /// Stratum value
    pub stratum: String,
    /// Stratum population size (N_h)
    pub population: usize,
    /// Target sample size (n_h)
    pub target: usize,
}

/// Proportional allocation over the strata of one categorical column
///
/// Invariants: targets sum to the requested grand total and every target
/// lies in `[0, N_h]`. Strata appear in descending population order, ties
/// by first appearance in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    strata_column: String,
    strata: Vec<StratumAllocation>,
}

impl Allocation {
    /// Name of the strata variable
    pub fn strata_column(&self) -> &str {
        &self.strata_column
    }

    /// Per-stratum rows in iteration order
    pub fn strata(&self) -> &[StratumAllocation] {
        &self.strata
    }

    /// Sum of per-stratum targets
    pub fn total_target(&self) -> usize {
        self.strata.iter().map(|s| s.target).sum()
    }
}

/// Internal implementation for proportional allocation
///
/// Raw targets use banker's rounding (`round_ties_even`) of
/// `N_h / total * n_total`. Independent rounding can leave the targets
/// off by a few units, so the whole difference is absorbed by the stratum
/// with the largest raw target (first such stratum on ties). Targets
/// pushed outside `[0, N_h]` by that adjustment surface as
/// `DegenerateAllocation`.
pub(crate) fn allocate_impl(
    df: &Dataset,
    strata_column: &str,
    n_total: usize,
) -> Result<Allocation> {
    let total = df.row_count();
    if n_total < 1 || n_total > total {
        return Err(Error::InvalidSampleSize {
            requested: n_total,
            population: total,
        });
    }

    let freqs = df.frequencies(strata_column)?;

    let mut targets: Vec<i64> = freqs
        .iter()
        .map(|f| {
            let raw = f.count as f64 / total as f64 * n_total as f64;
            raw.round_ties_even() as i64
        })
        .collect();

    let diff = n_total as i64 - targets.iter().sum::<i64>();
    if diff != 0 {
        // Strictly-greater comparison keeps the first maximum on ties
        let mut max_idx = 0;
        for (idx, &t) in targets.iter().enumerate() {
            if t > targets[max_idx] {
                max_idx = idx;
            }
        }
        targets[max_idx] += diff;
    }

    let mut strata = Vec::with_capacity(freqs.len());
    for (f, &target) in freqs.iter().zip(targets.iter()) {
        if target < 0 || target as usize > f.count {
            return Err(Error::DegenerateAllocation {
                stratum: f.value.clone(),
                target,
                population: f.count,
            });
        }
        strata.push(StratumAllocation {
            stratum: f.value.clone(),
            population: f.count,
            target: target as usize,
        });
    }

    Ok(Allocation {
        strata_column: strata_column.to_string(),
        strata,
    })
}

/// Render an allocation as its base table: strata column, N_h, n_h
pub(crate) fn allocation_table_impl(allocation: &Allocation) -> Table {
    let mut table = Table::new(vec![
        allocation.strata_column().to_string(),
        "N_h".to_string(),
        "n_h".to_string(),
    ]);
    for stratum in allocation.strata() {
        table.append_row(vec![
            stratum.stratum.clone(),
            stratum.population.to_string(),
            stratum.target.to_string(),
        ]);
    }
    table
}

/// Internal implementation for the auxiliary-augmented allocation table
///
/// A numeric auxiliary appends one `{aux}_mean` column (per-stratum mean,
/// 2 decimals). A categorical auxiliary appends one column per distinct
/// value holding the within-stratum percentage (1 decimal); unobserved
/// stratum/value combinations are 0, never missing.
pub(crate) fn with_auxiliary_impl(
    df: &Dataset,
    allocation: &Allocation,
    aux_column: &str,
) -> Result<Table> {
    let strata_values = df.column(allocation.strata_column())?.display_values();

    let mut pools: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, value) in strata_values.iter().enumerate() {
        pools.entry(value.as_str()).or_default().push(idx);
    }

    let base = allocation_table_impl(allocation);
    let mut header: Vec<String> = base.columns().to_vec();
    let mut rows: Vec<Vec<String>> = base.rows().to_vec();

    match df.column(aux_column)? {
        Column::Numeric(values) => {
            header.push(format!("{}_mean", aux_column));
            for (row, stratum) in rows.iter_mut().zip(allocation.strata()) {
                let indices = pools.get(stratum.stratum.as_str());
                let mean = match indices {
                    Some(indices) if !indices.is_empty() => {
                        let sum: f64 = indices.iter().map(|&i| values[i]).sum();
                        round_to(sum / indices.len() as f64, 2)
                    }
                    _ => 0.0,
                };
                row.push(mean.to_string());
            }
        }
        Column::Categorical(_) => {
            let aux_values = df.column(aux_column)?.display_values();
            // One appended column per distinct auxiliary value, in
            // frequency order
            let distinct: Vec<String> = df
                .frequencies(aux_column)?
                .into_iter()
                .map(|f| f.value)
                .collect();

            for value in &distinct {
                header.push(value.clone());
            }

            for (row, stratum) in rows.iter_mut().zip(allocation.strata()) {
                let indices: &[usize] = pools
                    .get(stratum.stratum.as_str())
                    .map(|v| v.as_slice())
                    .unwrap_or(&[]);
                for value in &distinct {
                    let hits = indices
                        .iter()
                        .filter(|&&i| &aux_values[i] == value)
                        .count();
                    let percent = if indices.is_empty() {
                        0.0
                    } else {
                        round_to(hits as f64 / indices.len() as f64 * 100.0, 1)
                    };
                    row.push(percent.to_string());
                }
            }
        }
    }

    Table::with_rows(header, rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strata_dataset(counts: &[(&str, usize)]) -> Dataset {
        let mut values = Vec::new();
        for (name, count) in counts {
            values.extend(std::iter::repeat(name.to_string()).take(*count));
        }
        Dataset::from_columns(vec![("group".to_string(), Column::Categorical(values))])
            .unwrap()
    }

    #[test]
    fn test_proportional_allocation_exact() {
        let df = strata_dataset(&[("a", 600), ("b", 300), ("c", 100)]);
        let allocation = allocate_impl(&df, "group", 100).unwrap();

        let targets: Vec<usize> = allocation.strata().iter().map(|s| s.target).collect();
        assert_eq!(targets, vec![60, 30, 10]);
        assert_eq!(allocation.total_target(), 100);
    }

    #[test]
    fn test_reconciliation_hits_largest_stratum() {
        // 3/7, 2/7, 2/7 of 5: raw targets 2, 1, 1 (sum 4), diff 1 goes to
        // the first (largest) stratum
        let df = strata_dataset(&[("a", 3), ("b", 2), ("c", 2)]);
        let allocation = allocate_impl(&df, "group", 5).unwrap();

        let targets: Vec<usize> = allocation.strata().iter().map(|s| s.target).collect();
        assert_eq!(targets.iter().sum::<usize>(), 5);
        assert_eq!(targets, vec![3, 1, 1]);
    }

    #[test]
    fn test_single_stratum_allocation() {
        let df = strata_dataset(&[("only", 7)]);
        let allocation = allocate_impl(&df, "group", 5).unwrap();
        assert_eq!(allocation.strata().len(), 1);
        assert_eq!(allocation.strata()[0].target, 5);
        assert_eq!(allocation.strata()[0].population, 7);
    }

    #[test]
    fn test_allocation_bounds() {
        let df = strata_dataset(&[("a", 4)]);
        assert!(matches!(
            allocate_impl(&df, "group", 0),
            Err(Error::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            allocate_impl(&df, "group", 5),
            Err(Error::InvalidSampleSize { .. })
        ));
        assert!(matches!(
            allocate_impl(&df, "missing", 2),
            Err(Error::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_targets_within_strata() {
        let df = strata_dataset(&[("a", 50), ("b", 30), ("c", 20)]);
        for n_total in 1..=100 {
            let allocation = allocate_impl(&df, "group", n_total).unwrap();
            assert_eq!(allocation.total_target(), n_total);
            for stratum in allocation.strata() {
                assert!(stratum.target <= stratum.population);
            }
        }
    }

    #[test]
    fn test_auxiliary_numeric_mean() {
        let df = Dataset::from_columns(vec![
            (
                "group".to_string(),
                Column::Categorical(vec![
                    "a".to_string(),
                    "a".to_string(),
                    "b".to_string(),
                    "b".to_string(),
                ]),
            ),
            (
                "income".to_string(),
                Column::Numeric(vec![10.0, 20.0, 30.0, 50.0]),
            ),
        ])
        .unwrap();

        let allocation = allocate_impl(&df, "group", 2).unwrap();
        let table = with_auxiliary_impl(&df, &allocation, "income").unwrap();

        assert_eq!(table.columns().last().unwrap(), "income_mean");
        // Both strata have population 2; iteration order is first
        // appearance: a then b
        assert_eq!(table.rows()[0][3], "15");
        assert_eq!(table.rows()[1][3], "40");
    }

    #[test]
    fn test_auxiliary_categorical_percentages() {
        let df = Dataset::from_columns(vec![
            (
                "group".to_string(),
                Column::Categorical(vec![
                    "a".to_string(),
                    "a".to_string(),
                    "a".to_string(),
                    "b".to_string(),
                ]),
            ),
            (
                "sector".to_string(),
                Column::Categorical(vec![
                    "x".to_string(),
                    "x".to_string(),
                    "y".to_string(),
                    "x".to_string(),
                ]),
            ),
        ])
        .unwrap();

        let allocation = allocate_impl(&df, "group", 2).unwrap();
        let table = with_auxiliary_impl(&df, &allocation, "sector").unwrap();

        // Appended columns: one per distinct sector value (x, y)
        assert_eq!(&table.columns()[3..], &["x".to_string(), "y".to_string()]);
        // Stratum a: 2/3 x, 1/3 y
        assert_eq!(table.rows()[0][3], "66.7");
        assert_eq!(table.rows()[0][4], "33.3");
        // Stratum b: all x, zero y (absent combination is 0, not missing)
        assert_eq!(table.rows()[1][3], "100");
        assert_eq!(table.rows()[1][4], "0");
    }
}
