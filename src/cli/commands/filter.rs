//! `sternum filter` command - mean-width range filter
//!
//! Without bounds the full-dataset range is used. `--interactive` keeps
//! prompting for new bounds and recomputes the subset after each entry.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::analysis::FilteredView;
use crate::cli::args::TableArgs;
use crate::cli::helpers::{checked_range, format_mm, open_session};
use crate::cli::output::{effective_format, print_structured, unsupported};
use crate::cli::table::{rows_table, write_rows_csv};
use crate::cli::viz;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Session;
use crate::entities::{default_range, MeasurementRow};

#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Lower mean-width bound in mm (default: dataset minimum)
    #[arg(long)]
    pub min: Option<f64>,

    /// Upper mean-width bound in mm (default: dataset maximum)
    #[arg(long)]
    pub max: Option<f64>,

    /// Prompt for bounds repeatedly until 'q' is entered
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Histogram bins
    #[arg(long)]
    pub bins: Option<usize>,

    /// List the rows inside the range
    #[arg(long)]
    pub show_rows: bool,
}

#[derive(Serialize)]
struct FilterOutput<'a> {
    view: &'a FilteredView,
    rows: &'a [MeasurementRow],
}

pub fn run(args: FilterArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global, &args.table, None, args.bins)?;
    let range = requested_range(&session, args.min, args.max)?;

    let format = effective_format(global.output);
    if args.interactive {
        if format != OutputFormat::Text {
            return Err(miette::miette!("--interactive only works with text output"));
        }
        return run_interactive(&session, range, args.show_rows);
    }

    let (view, subset) = session.filter(range);
    if print_structured(&FilterOutput { view: &view, rows: &subset }, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            print_view(&view);
            if args.show_rows && !subset.is_empty() {
                println!();
                println!("{}", rows_table(&subset));
            }
            Ok(())
        }
        OutputFormat::Csv => {
            let rows: Vec<(Option<String>, &MeasurementRow)> =
                subset.iter().map(|r| (None, r)).collect();
            write_rows_csv(std::io::stdout().lock(), &rows, None)
        }
        other => Err(unsupported(other, "filter")),
    }
}

/// Complete a single bound from the dataset range
///
/// Only a range the user typed in full is validated. A filled bound is
/// clamped to the given one, so `--min` above the data yields an empty view.
fn requested_range(
    session: &Session,
    min: Option<f64>,
    max: Option<f64>,
) -> Result<Option<(f64, f64)>> {
    let default = default_range(&session.rows());
    match (min, max) {
        (None, None) => Ok(None),
        (Some(lo), Some(hi)) => checked_range(lo, hi).map(Some),
        (Some(lo), None) => {
            let hi = default.map_or(f64::INFINITY, |d| d.1.max(lo));
            Ok(Some((lo, hi)))
        }
        (None, Some(hi)) => {
            let lo = default.map_or(f64::NEG_INFINITY, |d| d.0.min(hi));
            Ok(Some((lo, hi)))
        }
    }
}

fn run_interactive(session: &Session, start: Option<(f64, f64)>, show_rows: bool) -> Result<()> {
    let Some(mut range) = start.or_else(|| default_range(&session.rows())) else {
        println!("{}", style("No rows with a valid mean width to filter").yellow());
        return Ok(());
    };
    let theme = ColorfulTheme::default();

    loop {
        let (view, subset) = session.filter(Some(range));
        print_view(&view);
        if show_rows && !subset.is_empty() {
            println!("{}", rows_table(&subset));
        }
        println!();

        let Some(lo) = prompt_bound(&theme, "Lower bound (mm)", range.0)? else {
            break;
        };
        let Some(hi) = prompt_bound(&theme, "Upper bound (mm)", range.1)? else {
            break;
        };
        match checked_range(lo, hi) {
            Ok(r) => range = r,
            Err(e) => eprintln!("{} {}", style("✗").red(), e),
        }
    }
    Ok(())
}

/// Ask for one bound; `None` when the user quits
fn prompt_bound(theme: &ColorfulTheme, prompt: &str, current: f64) -> Result<Option<f64>> {
    loop {
        let answer: String = Input::with_theme(theme)
            .with_prompt(format!("{} ('q' to quit)", prompt))
            .default(current.to_string())
            .interact_text()
            .into_diagnostic()?;
        let answer = answer.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Ok(None);
        }
        match answer.parse::<f64>() {
            Ok(v) if v.is_finite() => return Ok(Some(v)),
            _ => eprintln!("{} '{}' is not a number", style("✗").red(), answer),
        }
    }
}

/// Print the filtered subset and its histogram, shared with `analyze`
pub(crate) fn print_view(view: &FilteredView) {
    println!("{}", style("Filtered Mean Widths").bold());
    let Some((lo, hi)) = view.range else {
        println!("  {}", style("No rows with a valid mean width").yellow());
        return;
    };
    let marker = if view.range == view.default_range {
        style(" (full range)").dim().to_string()
    } else {
        String::new()
    };
    println!(
        "  Range {} … {} mm{}: {} rows, mean {} mm, std dev {} mm",
        format_mm(lo),
        format_mm(hi),
        marker,
        style(view.rows).cyan(),
        format_mm(view.summary.mean),
        format_mm(view.summary.std_dev)
    );
    match &view.histogram {
        Some(hist) => {
            println!();
            println!("{}", viz::render_histogram(hist, None));
        }
        None => println!("  {}", style("No rows inside the range").yellow()),
    }
}
