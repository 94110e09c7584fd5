//! Descriptive statistics module

use crate::error::{Error, Result};
use crate::stats::DescriptiveStats;

/// Internal implementation for calculating descriptive statistics
///
/// The quartiles and the median all come from the same interpolated
/// percentile over the sorted values.
pub(crate) fn describe_impl(data: &[f64]) -> Result<DescriptiveStats> {
    if data.is_empty() {
        return Err(Error::EmptyDataset(
            "At least one data point is required for descriptive statistics".into(),
        ));
    }

    let count = data.len();
    let mean = data.iter().sum::<f64>() / count as f64;

    // Sample standard deviation (n - 1 denominator)
    let std = if count > 1 {
        let sum_squared_diff: f64 = data.iter().map(|&x| (x - mean).powi(2)).sum();
        (sum_squared_diff / (count - 1) as f64).sqrt()
    } else {
        0.0
    };

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Ok(DescriptiveStats {
        count,
        mean,
        std,
        min: sorted[0],
        q1: percentile(&sorted, 0.25),
        median: percentile(&sorted, 0.5),
        q3: percentile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Linear interpolation between the two nearest order statistics.
/// Callers guarantee `sorted` is non-empty.
fn percentile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = describe_impl(&data).unwrap();

        assert_eq!(stats.count, 5);
        assert!((stats.mean - 3.0).abs() < 1e-10);
        assert!((stats.std - 1.5811388300841898).abs() < 1e-10);
        assert!((stats.min - 1.0).abs() < 1e-10);
        assert!((stats.max - 5.0).abs() < 1e-10);
        assert!((stats.median - 3.0).abs() < 1e-10);
        assert!((stats.q1 - 2.0).abs() < 1e-10);
        assert!((stats.q3 - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_describe_even_count_interpolates() {
        let stats = describe_impl(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((stats.median - 2.5).abs() < 1e-10);
        assert!((stats.q1 - 1.75).abs() < 1e-10);
        assert!((stats.q3 - 3.25).abs() < 1e-10);
    }

    #[test]
    fn test_describe_single_point() {
        let stats = describe_impl(&[7.0]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.min, 7.0);
        assert_eq!(stats.median, 7.0);
        assert_eq!(stats.max, 7.0);
    }

    #[test]
    fn test_describe_empty() {
        let data: Vec<f64> = vec![];
        let result = describe_impl(&data);
        assert!(result.is_err());
    }
}
