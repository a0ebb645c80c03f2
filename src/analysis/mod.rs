//! Analysis module - statistics, normality tests, variability and anomalies
//!
//! All functions here are pure apart from the random source that the
//! Kolmogorov-Smirnov comparison draws its synthetic sample from.

pub mod anomaly;
pub mod charts;
pub mod normality;
pub mod report;
pub mod summary;
pub mod variability;

pub use anomaly::{
    detect_anomalies, detect_anomalies_with, AnomalyKind, AnomalyReport, AnomalySet,
    AnomalyThresholds,
};
pub use charts::{
    box_summary, histogram, normal_curve, BoxSummary, CurvePoint, Histogram, CURVE_POINTS,
};
pub use normality::{
    ks_two_sample, shapiro_wilk, test_normality, NormalityResult, NormalityTest, NormalityVerdict,
};
pub use report::{AnalysisReport, ChartSeries, FilteredView, NormalityReport};
pub use summary::{summarize, summarize_values, Percentiles, SummaryStats};
pub use variability::{
    interpret_std_dev, interpret_std_dev_with, Band, VariabilityAssessment, VariabilityVerdict,
};
