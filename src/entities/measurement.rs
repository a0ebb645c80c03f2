//! Measurement entity - one subject's minimum/maximum sternum width
//!
//! A `Measurement` is what the loader produces from one table row. Deriving it
//! yields a `MeasurementRow` carrying the mean width and the width range.
//! Missing widths stay `None` through every derivation.

use serde::{Deserialize, Serialize};

use crate::core::error::AnalyzerError;

/// A single raw measurement as read from the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// 1-based physical line number in the source table
    pub line: usize,

    /// Optional subject label from the configured id column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Minimum width reading (mm), `None` when missing or unparseable
    pub min_width: Option<f64>,

    /// Maximum width reading (mm), `None` when missing or unparseable
    pub max_width: Option<f64>,

    /// Raw pass-through cells of the row, in header order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl Measurement {
    /// Create a measurement with no label or pass-through fields
    pub fn new(line: usize, min_width: Option<f64>, max_width: Option<f64>) -> Self {
        Self {
            line,
            label: None,
            min_width,
            max_width,
            fields: Vec::new(),
        }
    }
}

/// A measurement with its derived columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    pub line: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    pub min_width: Option<f64>,
    pub max_width: Option<f64>,

    /// (min + max) / 2
    pub mean_width: Option<f64>,

    /// max - min
    pub range_width: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

impl MeasurementRow {
    /// Display label: the subject label if present, otherwise the line number
    pub fn display_label(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => format!("row {}", self.line),
        }
    }
}

impl From<&Measurement> for MeasurementRow {
    fn from(m: &Measurement) -> Self {
        let (mean_width, range_width) = match (m.min_width, m.max_width) {
            (Some(min), Some(max)) => (Some((min + max) / 2.0), Some(max - min)),
            _ => (None, None),
        };
        Self {
            line: m.line,
            label: m.label.clone(),
            min_width: m.min_width,
            max_width: m.max_width,
            mean_width,
            range_width,
            fields: m.fields.clone(),
        }
    }
}

/// A loaded measurement table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Header names from the header row
    pub headers: Vec<String>,

    /// Data rows below the header
    pub measurements: Vec<Measurement>,

    /// Non-empty width cells that could not be parsed as numbers
    pub coerced_cells: usize,
}

impl Dataset {
    /// Create a dataset directly from measurements
    pub fn from_measurements(measurements: Vec<Measurement>) -> Self {
        Self {
            headers: Vec::new(),
            measurements,
            coerced_cells: 0,
        }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    /// True when the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

/// Add `mean_width` and `range_width` to every measurement
///
/// Missing inputs propagate: if either width is missing, both derived
/// columns are missing for that row.
pub fn compute_derived(measurements: &[Measurement]) -> Vec<MeasurementRow> {
    measurements.iter().map(MeasurementRow::from).collect()
}

/// Non-missing mean widths, in row order
pub fn mean_widths(rows: &[MeasurementRow]) -> Vec<f64> {
    rows.iter().filter_map(|r| r.mean_width).collect()
}

/// Non-missing width ranges, in row order
pub fn range_widths(rows: &[MeasurementRow]) -> Vec<f64> {
    rows.iter().filter_map(|r| r.range_width).collect()
}

/// Default filter bounds: [min(mean_width), max(mean_width)] over all rows
///
/// `None` when no row has a mean width.
pub fn default_range(rows: &[MeasurementRow]) -> Option<(f64, f64)> {
    let mut values = rows.iter().filter_map(|r| r.mean_width);
    let first = values.next()?;
    Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Keep rows whose mean width lies in `[lo, hi]` (inclusive)
///
/// Rows with a missing mean width never match. An inverted range (lo > hi)
/// matches nothing.
pub fn filter_by_range(rows: &[MeasurementRow], lo: f64, hi: f64) -> Vec<MeasurementRow> {
    rows.iter()
        .filter(|r| r.mean_width.is_some_and(|m| m >= lo && m <= hi))
        .cloned()
        .collect()
}

/// Validate a user-supplied range for `filter_by_range`
pub fn check_range(lo: f64, hi: f64) -> Result<(), AnalyzerError> {
    if lo > hi || lo.is_nan() || hi.is_nan() {
        return Err(AnalyzerError::InvalidRange { lo, hi });
    }
    Ok(())
}
