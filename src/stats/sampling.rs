//! Random draw module: SRS and stratified sampling
//!
//! Every draw is a fresh, stateless action given the dataset, the
//! parameters and an rng. The seedless entry points in `stats` delegate
//! here with a thread-local rng; callers needing reproducible draws pass
//! their own rng to the `_with_rng` variants.

use std::collections::HashMap;

use rand::prelude::*;

use crate::dataset::Dataset;
use crate::error::{Error, Result};
use crate::stats::allocation::Allocation;
use crate::stats::ProportionComparison;
use crate::table::Table;

/// Draw `n` indices uniformly without replacement from `pool`
fn draw_without_replacement<R: Rng + ?Sized>(
    pool: &[usize],
    n: usize,
    rng: &mut R,
) -> Vec<usize> {
    let mut shuffled = pool.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(n);
    shuffled
}

/// Internal implementation for simple random sampling without replacement
pub(crate) fn srs_impl<R: Rng + ?Sized>(
    df: &Dataset,
    n: usize,
    rng: &mut R,
) -> Result<Dataset> {
    let total = df.row_count();
    if n < 1 || n > total {
        return Err(Error::InvalidSampleSize {
            requested: n,
            population: total,
        });
    }

    let pool: Vec<usize> = (0..total).collect();
    let indices = draw_without_replacement(&pool, n, rng);
    df.take(&indices)
}

/// Internal implementation for stratified sampling
///
/// Draws `min(n_h, N_h)` records from each stratum's own index pool and
/// concatenates the per-stratum draws in allocation order. Strata are
/// disjoint, so no record can be drawn twice across strata.
pub(crate) fn stratified_impl<R: Rng + ?Sized>(
    df: &Dataset,
    allocation: &Allocation,
    rng: &mut R,
) -> Result<Dataset> {
    let strata_values = df.column(allocation.strata_column())?.display_values();

    let mut pools: HashMap<String, Vec<usize>> = HashMap::new();
    for (idx, value) in strata_values.into_iter().enumerate() {
        pools.entry(value).or_default().push(idx);
    }

    let mut sample_indices = Vec::with_capacity(allocation.total_target());
    for stratum in allocation.strata() {
        let pool = match pools.get(&stratum.stratum) {
            Some(indices) => indices,
            None => continue,
        };
        let size = stratum.target.min(pool.len());
        sample_indices.extend(draw_without_replacement(pool, size, rng));
    }

    df.take(&sample_indices)
}

/// Internal implementation for population-vs-sample proportion comparison
///
/// Rows cover the union of values seen in either side: population values
/// first in frequency order, then sample-only values. Absent combinations
/// are 0.0, never missing.
pub(crate) fn compare_proportions_impl(
    df: &Dataset,
    sample: &Dataset,
    column: &str,
) -> Result<Vec<ProportionComparison>> {
    let pop_freqs = df.frequencies(column)?;
    let sample_freqs = sample.frequencies(column)?;

    let pop_total = df.row_count() as f64;
    let sample_total = sample.row_count() as f64;

    let sample_counts: HashMap<&str, usize> = sample_freqs
        .iter()
        .map(|f| (f.value.as_str(), f.count))
        .collect();

    let mut rows: Vec<ProportionComparison> = pop_freqs
        .iter()
        .map(|f| ProportionComparison {
            value: f.value.clone(),
            population: f.count as f64 / pop_total,
            sample: sample_counts
                .get(f.value.as_str())
                .map(|&c| c as f64 / sample_total)
                .unwrap_or(0.0),
        })
        .collect();

    for f in &sample_freqs {
        if !pop_freqs.iter().any(|p| p.value == f.value) {
            rows.push(ProportionComparison {
                value: f.value.clone(),
                population: 0.0,
                sample: f.count as f64 / sample_total,
            });
        }
    }

    Ok(rows)
}

/// Render a proportion comparison as a portable table
pub(crate) fn comparison_table_impl(column: &str, rows: &[ProportionComparison]) -> Table {
    let mut table = Table::new(vec![
        column.to_string(),
        "pop_share".to_string(),
        "sample_share".to_string(),
    ]);
    for row in rows {
        table.append_row(vec![
            row.value.clone(),
            row.population.to_string(),
            row.sample.to_string(),
        ]);
    }
    table
}
