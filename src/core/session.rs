//! Session context - one loaded dataset plus the settings to analyse it
//!
//! A session is what a single user interaction works on. Each call to
//! `analyze` recomputes the whole pipeline from the raw measurements, so
//! changing the filter range never leaves stale derived data behind.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::analysis::{
    self, AnalysisReport, AnomalyThresholds, ChartSeries, FilteredView, NormalityReport,
};
use crate::core::config::AnalysisConfig;
use crate::entities::{
    compute_derived, default_range, filter_by_range, mean_widths, range_widths, Dataset,
    MeasurementRow,
};

/// A dataset, its analysis settings and the random source for Test B
pub struct Session<R: Rng = StdRng> {
    dataset: Dataset,
    config: AnalysisConfig,
    rng: R,
    seed: Option<u64>,
}

impl Session<StdRng> {
    /// Create a session, seeding the RNG from `config.seed` or the OS
    pub fn new(dataset: Dataset, config: AnalysisConfig) -> Self {
        let seed = config.seed;
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            dataset,
            config,
            rng,
            seed,
        }
    }
}

impl<R: Rng> Session<R> {
    /// Create a session with an explicit random source
    ///
    /// `seed` is only recorded in reports; it does not reseed `rng`.
    pub fn with_rng(dataset: Dataset, config: AnalysisConfig, rng: R, seed: Option<u64>) -> Self {
        Self {
            dataset,
            config,
            rng,
            seed,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Measurements with derived columns
    pub fn rows(&self) -> Vec<MeasurementRow> {
        compute_derived(&self.dataset.measurements)
    }

    /// Anomaly thresholds from the configuration
    pub fn thresholds(&self) -> AnomalyThresholds {
        AnomalyThresholds {
            large_range_mm: self.config.large_range_mm,
            too_narrow_mm: self.config.too_narrow_mm,
        }
    }

    /// Run the full pipeline
    ///
    /// `range` selects the mean-width subset for the filtered view; `None`
    /// uses the full-dataset range. Statistics, normality tests and anomaly
    /// checks always cover the whole dataset.
    pub fn analyze(&mut self, range: Option<(f64, f64)>) -> AnalysisReport {
        let rows = self.rows();
        let values = mean_widths(&rows);
        tracing::debug!(rows = rows.len(), valid = values.len(), "derived columns computed");

        let summary = analysis::summarize_values(&values);
        let variability = analysis::interpret_std_dev_with(
            summary.mean,
            summary.std_dev,
            self.config.low_variability_mm,
            self.config.high_variability_mm,
        );

        let normality = self.normality_of(&values);
        let anomalies = analysis::detect_anomalies_with(&rows, &self.thresholds());
        let filtered = self.filtered_view(&rows, range);
        let charts = self.chart_series(&rows, &values, summary.mean, summary.std_dev);

        AnalysisReport {
            rows: rows.len(),
            valid_rows: values.len(),
            coerced_cells: self.dataset.coerced_cells,
            summary,
            variability,
            normality,
            anomalies,
            filtered,
            charts,
        }
    }

    /// Only the two normality tests on the whole dataset
    pub fn normality(&mut self) -> NormalityReport {
        let values = mean_widths(&self.rows());
        self.normality_of(&values)
    }

    fn normality_of(&mut self, values: &[f64]) -> NormalityReport {
        let (shapiro_wilk, kolmogorov_smirnov) =
            analysis::test_normality(values, &mut self.rng, self.config.alpha);
        NormalityReport {
            alpha: self.config.alpha,
            seed: self.seed,
            shapiro_wilk,
            kolmogorov_smirnov,
        }
    }

    /// Only the filtered subset, without running the other stages
    pub fn filter(&self, range: Option<(f64, f64)>) -> (FilteredView, Vec<MeasurementRow>) {
        let rows = self.rows();
        let view = self.filtered_view(&rows, range);
        let subset = match view.range {
            Some((lo, hi)) => filter_by_range(&rows, lo, hi),
            None => Vec::new(),
        };
        (view, subset)
    }

    fn filtered_view(&self, rows: &[MeasurementRow], range: Option<(f64, f64)>) -> FilteredView {
        let default = default_range(rows);
        let applied = range.or(default);
        let subset = match applied {
            Some((lo, hi)) => filter_by_range(rows, lo, hi),
            None => Vec::new(),
        };
        let subset_values = mean_widths(&subset);
        tracing::debug!(range = ?applied, rows = subset.len(), "filtered mean widths");

        FilteredView {
            range: applied,
            default_range: default,
            rows: subset.len(),
            summary: analysis::summarize_values(&subset_values),
            histogram: analysis::histogram(&subset_values, self.config.histogram_bins),
        }
    }

    fn chart_series(
        &self,
        rows: &[MeasurementRow],
        values: &[f64],
        mean: f64,
        std_dev: f64,
    ) -> ChartSeries {
        let histogram = analysis::histogram(values, self.config.histogram_bins);
        let bin_width = histogram.as_ref().map_or(0.0, |h| h.bin_width);
        ChartSeries {
            normal_curve: analysis::normal_curve(
                mean,
                std_dev,
                values.len(),
                bin_width,
                analysis::charts::CURVE_POINTS,
            ),
            histogram,
            range_box: analysis::box_summary(&range_widths(rows)),
        }
    }
}
