//! Descriptive statistics of the mean width

use serde::{Deserialize, Serialize};

use crate::core::stats;
use crate::entities::{mean_widths, MeasurementRow};

/// The 5th, 50th and 95th percentiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentiles {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

/// Summary statistics over the non-missing mean widths
///
/// Every field is `NaN` when there is nothing to summarise. The standard
/// deviation is the sample (N-1) estimator and needs at least two values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of non-missing values
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// Third standardized moment
    pub skewness: f64,
    /// Fourth standardized moment minus 3
    pub kurtosis: f64,
    pub percentiles: Percentiles,
}

impl SummaryStats {
    /// True when at least one value was summarised
    pub fn has_data(&self) -> bool {
        self.count > 0
    }
}

/// Summarise the mean widths of the given rows
pub fn summarize(rows: &[MeasurementRow]) -> SummaryStats {
    summarize_values(&mean_widths(rows))
}

/// Summarise an arbitrary slice of finite values
pub fn summarize_values(values: &[f64]) -> SummaryStats {
    let sorted = stats::sorted(values);
    let summary = SummaryStats {
        count: values.len(),
        mean: stats::mean(values),
        std_dev: stats::sample_std_dev(values),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        max: sorted.last().copied().unwrap_or(f64::NAN),
        skewness: stats::skewness(values),
        kurtosis: stats::excess_kurtosis(values),
        percentiles: Percentiles {
            p5: stats::percentile_sorted(&sorted, 5.0),
            p50: stats::percentile_sorted(&sorted, 50.0),
            p95: stats::percentile_sorted(&sorted, 95.0),
        },
    };
    tracing::debug!(
        count = summary.count,
        mean = summary.mean,
        std_dev = summary.std_dev,
        "summarised mean widths"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{compute_derived, Measurement};

    fn rows_from_means(means: &[Option<f64>]) -> Vec<MeasurementRow> {
        let measurements: Vec<Measurement> = means
            .iter()
            .enumerate()
            .map(|(i, m)| Measurement::new(i + 3, *m, *m))
            .collect();
        compute_derived(&measurements)
    }

    #[test]
    fn test_summarize_basic() {
        let rows = rows_from_means(&[Some(5.0), Some(6.0), Some(7.0), Some(8.0), Some(9.0)]);
        let s = summarize(&rows);
        assert_eq!(s.count, 5);
        assert!((s.mean - 7.0).abs() < 1e-12);
        assert!((s.std_dev - 2.5f64.sqrt()).abs() < 1e-12);
        assert_eq!(s.min, 5.0);
        assert_eq!(s.max, 9.0);
        assert!(s.skewness.abs() < 1e-12);
        assert!((s.kurtosis + 1.3).abs() < 1e-12);
        assert!((s.percentiles.p5 - 5.2).abs() < 1e-12);
        assert!((s.percentiles.p50 - 7.0).abs() < 1e-12);
        assert!((s.percentiles.p95 - 8.8).abs() < 1e-12);
    }

    #[test]
    fn test_summarize_skips_missing() {
        let rows = rows_from_means(&[Some(4.0), None, Some(6.0), None]);
        let s = summarize(&rows);
        assert_eq!(s.count, 2);
        assert_eq!(s.mean, 5.0);
        assert_eq!(s.min, 4.0);
        assert_eq!(s.max, 6.0);
    }

    #[test]
    fn test_summarize_identical_values() {
        let rows = rows_from_means(&[Some(6.4); 9]);
        let s = summarize(&rows);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.skewness, 0.0);
        assert_eq!(s.kurtosis, 0.0);
        assert_eq!(s.percentiles.p5, 6.4);
        assert_eq!(s.percentiles.p50, 6.4);
        assert_eq!(s.percentiles.p95, 6.4);
    }

    #[test]
    fn test_summarize_empty_is_undefined() {
        let s = summarize(&rows_from_means(&[None, None]));
        assert_eq!(s.count, 0);
        assert!(!s.has_data());
        assert!(s.mean.is_nan());
        assert!(s.std_dev.is_nan());
        assert!(s.min.is_nan());
        assert!(s.max.is_nan());
        assert!(s.skewness.is_nan());
        assert!(s.kurtosis.is_nan());
        assert!(s.percentiles.p5.is_nan());
        assert!(s.percentiles.p50.is_nan());
        assert!(s.percentiles.p95.is_nan());
    }

    #[test]
    fn test_summarize_single_value() {
        let s = summarize_values(&[7.5]);
        assert_eq!(s.count, 1);
        assert_eq!(s.mean, 7.5);
        assert!(s.std_dev.is_nan());
        assert_eq!(s.percentiles.p50, 7.5);
    }
}
