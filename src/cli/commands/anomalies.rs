//! `sternum anomalies` command - rows that look like data-entry errors

use clap::ValueEnum;
use console::style;
use miette::Result;
use serde::Serialize;

use crate::analysis::{detect_anomalies_with, AnomalyKind, AnomalyReport, AnomalySet};
use crate::cli::args::TableArgs;
use crate::cli::helpers::open_session;
use crate::cli::output::{effective_format, print_structured, unsupported};
use crate::cli::table::{rows_table, write_rows_csv};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::entities::MeasurementRow;

/// Which anomaly checks to report
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum KindFilter {
    Inverted,
    LargeRange,
    TooNarrow,
    All,
}

impl KindFilter {
    fn matches(self, kind: AnomalyKind) -> bool {
        match self {
            KindFilter::Inverted => kind == AnomalyKind::Inverted,
            KindFilter::LargeRange => kind == AnomalyKind::LargeRange,
            KindFilter::TooNarrow => kind == AnomalyKind::TooNarrow,
            KindFilter::All => true,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct AnomaliesArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Anomaly check to report
    #[arg(long, short = 'k', default_value = "all")]
    pub kind: KindFilter,

    /// Show only the number of matching rows per check
    #[arg(long)]
    pub count: bool,
}

#[derive(Serialize)]
struct KindCount {
    kind: AnomalyKind,
    count: usize,
}

pub fn run(args: AnomaliesArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global, &args.table, None, None)?;
    let report = detect_anomalies_with(&session.rows(), &session.thresholds());
    let sets = selected(&report, args.kind);

    let format = effective_format(global.output);
    if args.count {
        let counts: Vec<KindCount> = sets
            .iter()
            .map(|s| KindCount {
                kind: s.kind,
                count: s.count,
            })
            .collect();
        if print_structured(&counts, format)? {
            return Ok(());
        }
        return match format {
            OutputFormat::Text => {
                for c in &counts {
                    println!("{:<12} {}", c.kind.to_string(), c.count);
                }
                Ok(())
            }
            OutputFormat::Csv => {
                println!("kind,count");
                for c in &counts {
                    println!("{},{}", c.kind, c.count);
                }
                Ok(())
            }
            other => Err(unsupported(other, "anomalies --count")),
        };
    }

    if print_structured(&sets, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            print_anomaly_sets(&sets, true);
            Ok(())
        }
        OutputFormat::Csv => {
            let rows: Vec<(Option<String>, &MeasurementRow)> = sets
                .iter()
                .flat_map(|s| s.rows.iter().map(|r| (Some(s.kind.to_string()), r)))
                .collect();
            write_rows_csv(std::io::stdout().lock(), &rows, Some("kind"))
        }
        other => Err(unsupported(other, "anomalies")),
    }
}

fn selected(report: &AnomalyReport, filter: KindFilter) -> Vec<&AnomalySet> {
    report
        .sets()
        .into_iter()
        .filter(|s| filter.matches(s.kind))
        .collect()
}

/// Print anomaly counts, with the matching rows when `tables` is set
pub(crate) fn print_anomaly_sets(sets: &[&AnomalySet], tables: bool) {
    println!("{}", style("Data-Entry Anomalies").bold());
    for set in sets {
        let count = if set.is_empty() {
            style(set.count.to_string()).green()
        } else {
            style(set.count.to_string()).red().bold()
        };
        println!(
            "  {:<12} {:>4}  {}",
            set.kind.to_string(),
            count,
            style(&set.description).dim()
        );
    }
    if !tables {
        return;
    }
    for set in sets.iter().filter(|s| !s.is_empty()) {
        println!();
        println!(
            "{} {} ({})",
            style("●").red(),
            style(set.kind.to_string()).bold(),
            set.count
        );
        println!("{}", rows_table(&set.rows));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::detect_anomalies;
    use crate::entities::{compute_derived, Measurement};

    #[test]
    fn test_kind_filter_selects_sets() {
        let rows = compute_derived(&[
            Measurement::new(3, Some(5.0), Some(3.0)),
            Measurement::new(4, Some(1.0), Some(12.0)),
        ]);
        let report = detect_anomalies(&rows);

        assert_eq!(selected(&report, KindFilter::All).len(), 3);
        let only = selected(&report, KindFilter::LargeRange);
        assert_eq!(only.len(), 1);
        assert_eq!(only[0].kind, AnomalyKind::LargeRange);
        assert_eq!(only[0].rows[0].line, 4);
    }
}
