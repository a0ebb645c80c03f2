//! Error types for loading and analysing measurement tables

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or analysing a measurement table
///
/// Only structural problems are errors. Bad cells and empty datasets degrade
/// to missing values and undefined statistics instead.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzerError {
    #[error("Required width columns missing: {}", .missing.join(", "))]
    #[diagnostic(
        code(sternum::missing_columns),
        help("Columns found in the header row: {found:?}. Use --min-column/--max-column or the config file to point at the right headers.")
    )]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("Header row {row} not found: the table only has {available} row(s)")]
    #[diagnostic(
        code(sternum::header_row),
        help("Set header_row in the config file or pass --header-row")
    )]
    HeaderRowMissing { row: usize, available: usize },

    #[error("Invalid mean-width range: lower bound {lo} is above upper bound {hi}")]
    #[diagnostic(code(sternum::invalid_range))]
    InvalidRange { lo: f64, hi: f64 },

    #[error("Invalid configuration in {path}: {message}")]
    #[diagnostic(code(sternum::config))]
    Config { path: PathBuf, message: String },

    #[error("Failed to parse table: {0}")]
    #[diagnostic(code(sternum::csv))]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    #[diagnostic(code(sternum::io))]
    Io(#[from] std::io::Error),
}
