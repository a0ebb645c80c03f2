//! Chart data series - histogram, fitted normal curve and box summary
//!
//! These only produce numbers; rendering lives in the CLI.

use serde::{Deserialize, Serialize};

use crate::core::stats;

/// Equal-width histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` long
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub bin_width: f64,
}

impl Histogram {
    /// Midpoint of each bin
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Total number of values counted
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Build an equal-width histogram over [min, max]
///
/// The last bin is closed on the right. A zero-width range collapses to one
/// bin holding every value. `None` for empty input or zero bins.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let lo = stats::min(values);
    let hi = stats::max(values);
    let range = hi - lo;

    if range <= 0.0 {
        return Some(Histogram {
            edges: vec![lo, hi],
            counts: vec![values.len()],
            bin_width: 0.0,
        });
    }

    let bin_width = range / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * bin_width).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let bin = (((v - lo) / bin_width) as usize).min(bins - 1);
        counts[bin] += 1;
    }

    Some(Histogram {
        edges,
        counts,
        bin_width,
    })
}

/// One point of the fitted normal curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

/// Number of points on the fitted normal curve
pub const CURVE_POINTS: usize = 100;

/// Normal density over mean ± 3·sd, scaled to histogram counts
///
/// `y = pdf(x) · n · bin_width`, so the curve overlays a count histogram of
/// `n` values with the given bin width. Empty when sd is undefined or zero.
pub fn normal_curve(mean: f64, sd: f64, n: usize, bin_width: f64, points: usize) -> Vec<CurvePoint> {
    if !(mean.is_finite() && sd.is_finite()) || sd <= 0.0 || points < 2 {
        return Vec::new();
    }
    let start = mean - 3.0 * sd;
    let step = 6.0 * sd / (points - 1) as f64;
    let scale = n as f64 * bin_width;
    (0..points)
        .map(|i| {
            let x = start + i as f64 * step;
            let y = stats::normal_pdf((x - mean) / sd) / sd * scale;
            CurvePoint { x, y }
        })
        .collect()
}

/// Five-number summary with Tukey whiskers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within q1 - 1.5·IQR
    pub lower_whisker: f64,
    /// Largest value within q3 + 1.5·IQR
    pub upper_whisker: f64,
    /// Values beyond the whiskers
    pub outliers: Vec<f64>,
}

/// Box-plot summary of the values, `None` when empty
pub fn box_summary(values: &[f64]) -> Option<BoxSummary> {
    if values.is_empty() {
        return None;
    }
    let sorted = stats::sorted(values);
    let q1 = stats::percentile_sorted(&sorted, 25.0);
    let median = stats::percentile_sorted(&sorted, 50.0);
    let q3 = stats::percentile_sorted(&sorted, 75.0);
    let iqr = q3 - q1;
    let low_fence = q1 - 1.5 * iqr;
    let high_fence = q3 + 1.5 * iqr;

    let inside: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v >= low_fence && *v <= high_fence)
        .collect();
    let outliers: Vec<f64> = sorted
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxSummary {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker: inside.first().copied().unwrap_or(q1),
        upper_whisker: inside.last().copied().unwrap_or(q3),
        outliers,
    })
}
