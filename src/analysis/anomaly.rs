//! Data-entry anomaly detection
//!
//! Three independent checks. A row may appear in more than one set. Rows with
//! missing values in the compared columns never match.

use serde::{Deserialize, Serialize};

use crate::entities::MeasurementRow;

/// Default range threshold (mm): `range_width >= 8` is flagged
pub const LARGE_RANGE_MM: f64 = 8.0;

/// Default narrowness threshold (mm): `mean_width <= 4` is flagged
pub const TOO_NARROW_MM: f64 = 4.0;

/// Kind of anomaly check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnomalyKind {
    /// Minimum width above maximum width
    Inverted,
    /// Width range at or above the large-range threshold
    LargeRange,
    /// Mean width at or below the too-narrow threshold
    TooNarrow,
}

impl AnomalyKind {
    pub const ALL: [AnomalyKind; 3] = [
        AnomalyKind::Inverted,
        AnomalyKind::LargeRange,
        AnomalyKind::TooNarrow,
    ];

    /// Human description including the threshold in use
    pub fn describe(&self, thresholds: &AnomalyThresholds) -> String {
        match self {
            AnomalyKind::Inverted => "minimum width greater than maximum width".to_string(),
            AnomalyKind::LargeRange => format!(
                "width range of {} mm or more",
                thresholds.large_range_mm
            ),
            AnomalyKind::TooNarrow => format!(
                "mean width of {} mm or less",
                thresholds.too_narrow_mm
            ),
        }
    }
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnomalyKind::Inverted => write!(f, "inverted"),
            AnomalyKind::LargeRange => write!(f, "large-range"),
            AnomalyKind::TooNarrow => write!(f, "too-narrow"),
        }
    }
}

/// Thresholds for the range and narrowness checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyThresholds {
    pub large_range_mm: f64,
    pub too_narrow_mm: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            large_range_mm: LARGE_RANGE_MM,
            too_narrow_mm: TOO_NARROW_MM,
        }
    }
}

/// Rows matched by one check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalySet {
    pub kind: AnomalyKind,
    pub description: String,
    pub count: usize,
    pub rows: Vec<MeasurementRow>,
}

impl AnomalySet {
    fn new(kind: AnomalyKind, thresholds: &AnomalyThresholds, rows: Vec<MeasurementRow>) -> Self {
        Self {
            kind,
            description: kind.describe(thresholds),
            count: rows.len(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three anomaly sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub thresholds: AnomalyThresholds,
    pub inverted: AnomalySet,
    pub large_range: AnomalySet,
    pub too_narrow: AnomalySet,
}

impl AnomalyReport {
    /// Set for a given kind
    pub fn get(&self, kind: AnomalyKind) -> &AnomalySet {
        match kind {
            AnomalyKind::Inverted => &self.inverted,
            AnomalyKind::LargeRange => &self.large_range,
            AnomalyKind::TooNarrow => &self.too_narrow,
        }
    }

    /// All sets in a fixed order
    pub fn sets(&self) -> [&AnomalySet; 3] {
        [&self.inverted, &self.large_range, &self.too_narrow]
    }

    /// Total flags raised (a row in two sets counts twice)
    pub fn total_flags(&self) -> usize {
        self.sets().iter().map(|s| s.count).sum()
    }
}

/// Does this row fail the given check?
pub fn is_anomalous(row: &MeasurementRow, kind: AnomalyKind, thresholds: &AnomalyThresholds) -> bool {
    match kind {
        AnomalyKind::Inverted => matches!(
            (row.min_width, row.max_width),
            (Some(min), Some(max)) if min > max
        ),
        AnomalyKind::LargeRange => row
            .range_width
            .is_some_and(|r| r >= thresholds.large_range_mm),
        AnomalyKind::TooNarrow => row
            .mean_width
            .is_some_and(|m| m <= thresholds.too_narrow_mm),
    }
}

/// Run all three checks with the default thresholds
pub fn detect_anomalies(rows: &[MeasurementRow]) -> AnomalyReport {
    detect_anomalies_with(rows, &AnomalyThresholds::default())
}

/// Run all three checks with explicit thresholds
pub fn detect_anomalies_with(
    rows: &[MeasurementRow],
    thresholds: &AnomalyThresholds,
) -> AnomalyReport {
    let matching = |kind: AnomalyKind| -> Vec<MeasurementRow> {
        rows.iter()
            .filter(|r| is_anomalous(r, kind, thresholds))
            .cloned()
            .collect()
    };

    let report = AnomalyReport {
        thresholds: *thresholds,
        inverted: AnomalySet::new(AnomalyKind::Inverted, thresholds, matching(AnomalyKind::Inverted)),
        large_range: AnomalySet::new(
            AnomalyKind::LargeRange,
            thresholds,
            matching(AnomalyKind::LargeRange),
        ),
        too_narrow: AnomalySet::new(
            AnomalyKind::TooNarrow,
            thresholds,
            matching(AnomalyKind::TooNarrow),
        ),
    };

    for set in report.sets() {
        if !set.is_empty() {
            tracing::info!(kind = %set.kind, count = set.count, "anomalous rows found");
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{compute_derived, Measurement};

    fn derived(pairs: &[(f64, f64)]) -> Vec<MeasurementRow> {
        let measurements: Vec<Measurement> = pairs
            .iter()
            .enumerate()
            .map(|(i, (min, max))| Measurement::new(i + 3, Some(*min), Some(*max)))
            .collect();
        compute_derived(&measurements)
    }

    fn row_with(mean: Option<f64>, range: Option<f64>) -> MeasurementRow {
        MeasurementRow {
            line: 1,
            label: None,
            min_width: None,
            max_width: None,
            mean_width: mean,
            range_width: range,
            fields: Vec::new(),
        }
    }

    #[test]
    fn test_inverted_rows() {
        let rows = derived(&[(5.0, 3.0), (2.0, 6.0)]);
        let report = detect_anomalies(&rows);
        assert_eq!(report.inverted.count, 1);
        assert_eq!(report.inverted.rows[0], rows[0]);
    }

    #[test]
    fn test_large_range_threshold_inclusive() {
        let rows: Vec<MeasurementRow> = [1.0, 9.0, 3.0]
            .iter()
            .map(|r| row_with(Some(10.0), Some(*r)))
            .collect();
        let report = detect_anomalies(&rows);
        assert_eq!(report.large_range.count, 1);
        assert_eq!(report.large_range.rows[0].range_width, Some(9.0));

        let edge = [row_with(Some(10.0), Some(8.0))];
        assert_eq!(detect_anomalies(&edge).large_range.count, 1);
    }

    #[test]
    fn test_too_narrow_threshold_inclusive() {
        let rows: Vec<MeasurementRow> = [3.9, 4.0, 4.1]
            .iter()
            .map(|m| row_with(Some(*m), Some(0.0)))
            .collect();
        let report = detect_anomalies(&rows);
        assert_eq!(report.too_narrow.count, 2);
        assert_eq!(report.too_narrow.rows[0], rows[0]);
        assert_eq!(report.too_narrow.rows[1], rows[1]);
    }

    #[test]
    fn test_checks_overlap() {
        // inverted, range -2 and mean 4 -> inverted and too narrow
        let rows = derived(&[(5.0, 3.0)]);
        let report = detect_anomalies(&rows);
        assert_eq!(report.inverted.count, 1);
        assert_eq!(report.too_narrow.count, 1);
        assert_eq!(report.large_range.count, 0);
        assert_eq!(report.total_flags(), 2);
    }

    #[test]
    fn test_missing_values_never_flagged() {
        let rows = vec![row_with(None, None)];
        let report = detect_anomalies(&rows);
        assert_eq!(report.total_flags(), 0);

        let half = compute_derived(&[Measurement::new(3, Some(9.0), None)]);
        assert_eq!(detect_anomalies(&half).total_flags(), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        let rows = derived(&[(4.0, 10.0), (5.0, 6.0)]);
        let thresholds = AnomalyThresholds {
            large_range_mm: 6.0,
            too_narrow_mm: 5.5,
        };
        let report = detect_anomalies_with(&rows, &thresholds);
        assert_eq!(report.large_range.count, 1);
        assert_eq!(report.too_narrow.count, 1);
        assert_eq!(report.too_narrow.rows[0].line, 4);
        assert!(report.large_range.description.contains("6 mm"));
    }

    #[test]
    fn test_empty_input() {
        let report = detect_anomalies(&[]);
        for kind in AnomalyKind::ALL {
            assert!(report.get(kind).is_empty());
        }
    }
}
