//! Entity types - the measurement data model

pub mod measurement;

pub use measurement::{
    check_range, compute_derived, default_range, filter_by_range, mean_widths, range_widths, Dataset,
    Measurement, MeasurementRow,
};
