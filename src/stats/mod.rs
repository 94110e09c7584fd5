//! Statistics module
//!
//! Public API for the sampling engine's statistical operations: descriptive
//! summaries, simple random sampling (SRS), proportional allocation and
//! stratified sampling, and population-vs-sample proportion comparison.
//!
//! Every function here is pure given its inputs: draws take the dataset
//! and parameters, produce a fresh result, and share no state across
//! calls. The seedless draw functions use a thread-local rng; the
//! `_with_rng` variants accept a caller-provided rng for reproducible
//! draws.

pub mod allocation;
pub mod descriptive;
pub mod sampling;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::table::Table;

pub use allocation::{Allocation, StratumAllocation};

/// Structure holding descriptive statistics results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveStats {
    /// Number of data points
    pub count: usize,
    /// Mean value
    pub mean: f64,
    /// Standard deviation (unbiased estimator)
    pub std: f64,
    /// Minimum value
    pub min: f64,
    /// 25% quantile
    pub q1: f64,
    /// Median (50% quantile)
    pub median: f64,
    /// 75% quantile
    pub q3: f64,
    /// Maximum value
    pub max: f64,
}

/// One row of a population-vs-sample proportion comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProportionComparison {
    /// Display form of the compared value
    pub value: String,
    /// Share of the population holding the value (fraction, 0 if absent)
    pub population: f64,
    /// Share of the sample holding the value (fraction, 0 if absent)
    pub sample: f64,
}

/// Calculate basic descriptive statistics for numeric data
///
/// # Example
/// ```
/// use sondage::stats;
///
/// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let stats = stats::describe(&data).unwrap();
/// assert_eq!(stats.count, 5);
/// assert!((stats.mean - 3.0).abs() < 1e-12);
/// ```
pub fn describe<T: AsRef<[f64]>>(data: T) -> Result<DescriptiveStats> {
    descriptive::describe_impl(data.as_ref())
}

/// Draw a simple random sample without replacement
///
/// Every subset of size `n` is equally likely. Requires
/// `1 <= n <= row_count`, otherwise `InvalidSampleSize`. Each invocation
/// is an independent draw; use [`srs_sample_with_rng`] for reproducible
/// results.
pub fn srs_sample(df: &Dataset, n: usize) -> Result<Dataset> {
    sampling::srs_impl(df, n, &mut rand::rng())
}

/// Draw a simple random sample using a caller-provided rng
pub fn srs_sample_with_rng<R: Rng + ?Sized>(
    df: &Dataset,
    n: usize,
    rng: &mut R,
) -> Result<Dataset> {
    sampling::srs_impl(df, n, rng)
}

/// Compare value proportions between a population and a sample
///
/// Rows cover the union of values seen in either side; a value absent
/// from one side gets proportion 0.0.
pub fn compare_proportions(
    df: &Dataset,
    sample: &Dataset,
    column: &str,
) -> Result<Vec<ProportionComparison>> {
    sampling::compare_proportions_impl(df, sample, column)
}

/// Render a proportion comparison as a portable table
pub fn comparison_table(column: &str, rows: &[ProportionComparison]) -> Table {
    sampling::comparison_table_impl(column, rows)
}

/// Compute a proportional allocation over the strata of one column
///
/// Per-stratum targets are `round_ties_even(N_h / total * n_total)`, with
/// the rounding residual absorbed by the stratum holding the largest raw
/// target so that targets sum exactly to `n_total`.
pub fn allocate(df: &Dataset, strata_column: &str, n_total: usize) -> Result<Allocation> {
    allocation::allocate_impl(df, strata_column, n_total)
}

/// Render an allocation as its base table: strata column, N_h, n_h
pub fn allocation_table(allocation: &Allocation) -> Table {
    allocation::allocation_table_impl(allocation)
}

/// Render an allocation table augmented with an auxiliary variable
///
/// A numeric auxiliary appends the per-stratum mean; a categorical one
/// appends the within-stratum percentage of each of its values.
pub fn allocation_table_with_auxiliary(
    df: &Dataset,
    allocation: &Allocation,
    aux_column: &str,
) -> Result<Table> {
    allocation::with_auxiliary_impl(df, allocation, aux_column)
}

/// Draw a stratified sample following a proportional allocation
///
/// Each stratum contributes `min(n_h, N_h)` records drawn without
/// replacement from its own pool; per-stratum draws are concatenated in
/// allocation order.
pub fn stratified_sample(df: &Dataset, allocation: &Allocation) -> Result<Dataset> {
    sampling::stratified_impl(df, allocation, &mut rand::rng())
}

/// Draw a stratified sample using a caller-provided rng
pub fn stratified_sample_with_rng<R: Rng + ?Sized>(
    df: &Dataset,
    allocation: &Allocation,
    rng: &mut R,
) -> Result<Dataset> {
    sampling::stratified_impl(df, allocation, rng)
}
