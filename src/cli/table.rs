//! Table rendering for measurement rows

use std::io::Write;

use miette::{IntoDiagnostic, Result};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::helpers::{format_opt, truncate_str};
use crate::entities::MeasurementRow;

/// Widest subject label shown in tables
const LABEL_WIDTH: usize = 24;

#[derive(Tabled)]
struct RowDisplay {
    #[tabled(rename = "LINE")]
    line: usize,
    #[tabled(rename = "SUBJECT")]
    subject: String,
    #[tabled(rename = "MIN")]
    min: String,
    #[tabled(rename = "MAX")]
    max: String,
    #[tabled(rename = "MEAN")]
    mean: String,
    #[tabled(rename = "RANGE")]
    range: String,
}

impl From<&MeasurementRow> for RowDisplay {
    fn from(row: &MeasurementRow) -> Self {
        Self {
            line: row.line,
            subject: truncate_str(&row.display_label(), LABEL_WIDTH),
            min: format_opt(row.min_width),
            max: format_opt(row.max_width),
            mean: format_opt(row.mean_width),
            range: format_opt(row.range_width),
        }
    }
}

/// Render rows as a rounded table
pub fn rows_table(rows: &[MeasurementRow]) -> String {
    let display: Vec<RowDisplay> = rows.iter().map(RowDisplay::from).collect();
    Table::new(display).with(Style::rounded()).to_string()
}

/// Column names written by `write_rows_csv`
pub const CSV_HEADER: [&str; 6] = [
    "line",
    "subject",
    "min_width",
    "max_width",
    "mean_width",
    "range_width",
];

/// Write rows as CSV, optionally prefixed by a leading column
///
/// Missing values are written as empty cells.
pub fn write_rows_csv<W: Write>(
    out: W,
    rows: &[(Option<String>, &MeasurementRow)],
    lead: Option<&str>,
) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    let mut header: Vec<&str> = Vec::with_capacity(CSV_HEADER.len() + 1);
    if let Some(lead) = lead {
        header.push(lead);
    }
    header.extend(CSV_HEADER);
    wtr.write_record(&header).into_diagnostic()?;

    let cell = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    for (prefix, row) in rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if lead.is_some() {
            record.push(prefix.clone().unwrap_or_default());
        }
        record.push(row.line.to_string());
        record.push(row.label.clone().unwrap_or_default());
        record.push(cell(row.min_width));
        record.push(cell(row.max_width));
        record.push(cell(row.mean_width));
        record.push(cell(row.range_width));
        wtr.write_record(&record).into_diagnostic()?;
    }
    wtr.flush().into_diagnostic()?;
    Ok(())
}
