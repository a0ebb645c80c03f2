//! Shared helper functions for CLI commands
//!
//! Configuration resolution, session setup and number formatting used by
//! more than one command module.

use miette::Result;

use crate::cli::args::TableArgs;
use crate::cli::GlobalOpts;
use crate::core::{load_path, Config, Session};
use crate::entities::check_range;

/// Load configuration and apply table overrides from the command line
pub fn resolve_config(global: &GlobalOpts, table: &TableArgs) -> Result<Config> {
    let (mut config, source) = Config::load(global.config.as_deref())?;
    if let Some(path) = &source {
        tracing::info!(path = %path.display(), "using configuration file");
    }

    if let Some(row) = table.header_row {
        config.table.header_row = row;
    }
    if let Some(delimiter) = table.delimiter {
        config.table.delimiter = delimiter;
    }
    if let Some(column) = &table.min_column {
        config.table.min_column = column.clone();
    }
    if let Some(column) = &table.max_column {
        config.table.max_column = column.clone();
    }
    if let Some(column) = &table.id_column {
        config.table.id_column = Some(column.clone());
    }

    config
        .validate()
        .map_err(|message| miette::miette!("Invalid option: {}", message))?;
    Ok(config)
}

/// Read the table and open an analysis session
///
/// `seed` and `bins` override the configured values when given.
pub fn open_session(
    global: &GlobalOpts,
    table: &TableArgs,
    seed: Option<u64>,
    bins: Option<usize>,
) -> Result<Session> {
    let mut config = resolve_config(global, table)?;
    if seed.is_some() {
        config.analysis.seed = seed;
    }
    if let Some(bins) = bins {
        if bins == 0 {
            return Err(miette::miette!("--bins must be at least 1"));
        }
        config.analysis.histogram_bins = bins;
    }

    let dataset = load_path(&table.file, &config.table)?;
    Ok(Session::new(dataset, config.analysis))
}

/// Validate an optional user range
pub fn checked_range(lo: f64, hi: f64) -> Result<(f64, f64)> {
    check_range(lo, hi)?;
    Ok((lo, hi))
}

/// Format a length in millimetres, `n/a` when undefined
pub fn format_mm(value: f64) -> String {
    format_num(value, 2)
}

/// Format a number with fixed decimals, `n/a` when undefined
pub fn format_num(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Format an optional value
pub fn format_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), format_mm)
}

/// Format a p-value, switching to a bound for very small values
pub fn format_p(p: f64) -> String {
    if p.is_nan() {
        "n/a".to_string()
    } else if p < 1e-4 {
        "< 0.0001".to_string()
    } else {
        format!("{:.4}", p)
    }
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
