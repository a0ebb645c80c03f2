//! Aggregated analysis report - everything one recomputation pass produces

use serde::{Deserialize, Serialize};

use crate::analysis::anomaly::AnomalyReport;
use crate::analysis::charts::{BoxSummary, CurvePoint, Histogram};
use crate::analysis::normality::NormalityResult;
use crate::analysis::summary::SummaryStats;
use crate::analysis::variability::VariabilityAssessment;

/// Both normality test outcomes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalityReport {
    pub alpha: f64,

    /// Seed of the synthetic sample, `None` when drawn from OS entropy
    pub seed: Option<u64>,

    pub shapiro_wilk: NormalityResult,
    pub kolmogorov_smirnov: NormalityResult,
}

impl NormalityReport {
    /// True when the Kolmogorov-Smirnov result can be reproduced
    pub fn is_reproducible(&self) -> bool {
        self.seed.is_some()
    }
}

/// The mean-width subset selected by the range filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredView {
    /// Applied bounds, `None` when the dataset has no mean widths
    pub range: Option<(f64, f64)>,

    /// Full-dataset bounds used when no range is given
    pub default_range: Option<(f64, f64)>,

    pub rows: usize,
    pub summary: SummaryStats,
    pub histogram: Option<Histogram>,
}

/// Data behind the distribution charts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Histogram of all mean widths
    pub histogram: Option<Histogram>,

    /// Fitted normal curve scaled to the histogram
    pub normal_curve: Vec<CurvePoint>,

    /// Box summary of the width ranges
    pub range_box: Option<BoxSummary>,
}

/// Complete result of one analysis pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Data rows in the table
    pub rows: usize,

    /// Rows with a defined mean width
    pub valid_rows: usize,

    /// Width cells that were not numbers
    pub coerced_cells: usize,

    pub summary: SummaryStats,
    pub variability: VariabilityAssessment,
    pub normality: NormalityReport,
    pub anomalies: AnomalyReport,
    pub filtered: FilteredView,
    pub charts: ChartSeries,
}
