//! Table loader - reads delimited measurement exports into a `Dataset`
//!
//! The header sits on a configurable row (the second row by default, since
//! the source spreadsheets carry a title line above it). Width cells are
//! coerced to numbers; anything unparseable becomes a missing value.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};

use crate::core::config::TableConfig;
use crate::core::error::AnalyzerError;
use crate::entities::{Dataset, Measurement};

/// Result of coercing a single cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    /// Empty cell
    Empty,
    /// Parsed finite number
    Number(f64),
    /// Non-empty text that is not a finite number
    Invalid,
}

impl Cell {
    /// The numeric value, if any
    pub fn value(self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(v),
            Cell::Empty | Cell::Invalid => None,
        }
    }
}

/// Coerce a raw cell to a number
///
/// Surrounding whitespace is ignored. `NaN` and infinities are treated as
/// invalid since they cannot be physical widths.
pub fn coerce_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Cell::Number(v),
        _ => Cell::Invalid,
    }
}

/// Coerce a raw cell that may not be valid UTF-8
///
/// Bytes that do not decode are an invalid cell, never a load failure.
pub fn coerce_bytes(raw: &[u8]) -> Cell {
    match std::str::from_utf8(raw) {
        Ok(text) => coerce_cell(text),
        Err(_) if raw.iter().all(|b| b.is_ascii_whitespace()) => Cell::Empty,
        Err(_) => Cell::Invalid,
    }
}

fn lossy(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Load a measurement table from a file
pub fn load_path(path: &Path, table: &TableConfig) -> Result<Dataset, AnalyzerError> {
    let file = File::open(path)?;
    let dataset = load_reader(file, table)?;
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        coerced = dataset.coerced_cells,
        "loaded measurement table"
    );
    Ok(dataset)
}

/// Load a measurement table from any reader
///
/// Rows above the header row are ignored. Rows where every cell is blank are
/// skipped. Fails with `MissingColumns` before reading any data if either
/// width column is absent from the header. Text that is not UTF-8 (legacy
/// spreadsheet exports) is decoded lossily; such a width cell is invalid.
pub fn load_reader<R: Read>(reader: R, table: &TableConfig) -> Result<Dataset, AnalyzerError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(table.delimiter as u8)
        .from_reader(reader);

    let mut records = rdr
        .byte_records()
        .filter(|r| r.as_ref().map_or(true, |rec| !is_blank(rec)));

    let mut header = None;
    let mut seen = 0;
    for record in records.by_ref() {
        seen += 1;
        let record = record?;
        if seen == table.header_row {
            header = Some(record);
            break;
        }
    }
    let header = header.ok_or(AnalyzerError::HeaderRowMissing {
        row: table.header_row,
        available: seen,
    })?;

    let headers: Vec<String> = header
        .iter()
        .map(|h| lossy(h).trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let (min_idx, max_idx) = locate_columns(&headers, table)?;
    let id_idx = table
        .id_column
        .as_deref()
        .and_then(|name| headers.iter().position(|h| h == name.trim()));
    if table.id_column.is_some() && id_idx.is_none() {
        tracing::warn!(
            column = table.id_column.as_deref().unwrap_or_default(),
            "id column not found, rows will be labelled by line number"
        );
    }

    let mut dataset = Dataset {
        headers,
        measurements: Vec::new(),
        coerced_cells: 0,
    };

    for record in records {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(dataset.measurements.len() + table.header_row + 1);

        let min_cell = coerce_bytes(record.get(min_idx).unwrap_or_default());
        let max_cell = coerce_bytes(record.get(max_idx).unwrap_or_default());
        for (cell, column) in [(min_cell, &table.min_column), (max_cell, &table.max_column)] {
            if cell == Cell::Invalid {
                dataset.coerced_cells += 1;
                tracing::debug!(line, column = %column, "non-numeric width treated as missing");
            }
        }

        let label = id_idx
            .and_then(|i| record.get(i))
            .map(|s| lossy(s).trim().to_string())
            .filter(|s| !s.is_empty());

        dataset.measurements.push(Measurement {
            line,
            label,
            min_width: min_cell.value(),
            max_width: max_cell.value(),
            fields: record.iter().map(lossy).collect(),
        });
    }

    if dataset.coerced_cells > 0 {
        tracing::warn!(
            cells = dataset.coerced_cells,
            "non-numeric width cells were treated as missing"
        );
    }

    Ok(dataset)
}

/// Find the minimum and maximum width columns in the header
fn locate_columns(headers: &[String], table: &TableConfig) -> Result<(usize, usize), AnalyzerError> {
    let find = |name: &str| headers.iter().position(|h| h == name.trim());
    let min_idx = find(&table.min_column);
    let max_idx = find(&table.max_column);

    match (min_idx, max_idx) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => {
            let mut missing = Vec::new();
            if min_idx.is_none() {
                missing.push(table.min_column.clone());
            }
            if max_idx.is_none() {
                missing.push(table.max_column.clone());
            }
            Err(AnalyzerError::MissingColumns {
                missing,
                found: headers.iter().filter(|h| !h.is_empty()).cloned().collect(),
            })
        }
    }
}

fn is_blank(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|f| coerce_bytes(f) == Cell::Empty)
}
