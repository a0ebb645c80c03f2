//! `sternum analyze` command - the full analysis report

use console::style;
use miette::Result;

use crate::analysis::{AnalysisReport, VariabilityAssessment, VariabilityVerdict};
use crate::cli::args::TableArgs;
use crate::cli::commands::{anomalies, filter, normality, report, stats};
use crate::cli::helpers::{checked_range, format_mm, open_session};
use crate::cli::output::{effective_format, print_structured, unsupported};
use crate::cli::viz;
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Mean-width range for the filtered view (default: full range)
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub range: Option<Vec<f64>>,

    /// Seed for the synthetic normal sample (reproducible Kolmogorov-Smirnov result)
    #[arg(long, env = "STERNUM_SEED")]
    pub seed: Option<u64>,

    /// Histogram bins
    #[arg(long)]
    pub bins: Option<usize>,

    /// Also draw the whole-dataset histogram with the fitted normal curve
    #[arg(long)]
    pub histogram: bool,

    /// List every anomalous row instead of only the counts
    #[arg(long)]
    pub show_rows: bool,
}

pub fn run(args: AnalyzeArgs, global: &GlobalOpts) -> Result<()> {
    let range = match args.range.as_deref() {
        Some([lo, hi]) => Some(checked_range(*lo, *hi)?),
        _ => None,
    };

    let mut session = open_session(global, &args.table, args.seed, args.bins)?;
    let result = session.analyze(range);

    let format = effective_format(global.output);
    if print_structured(&result, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            print_report(&args, &result);
            Ok(())
        }
        OutputFormat::Md => {
            let source = args.table.file.display().to_string();
            report::print_markdown(&source, &result)
        }
        other => Err(unsupported(other, "analyze")),
    }
}

fn print_report(args: &AnalyzeArgs, result: &AnalysisReport) {
    println!(
        "{} {}",
        style("Sternum width analysis:").bold(),
        style(args.table.file.display()).cyan()
    );
    println!(
        "  {} rows, {} with a mean width",
        result.rows, result.valid_rows
    );
    if result.coerced_cells > 0 {
        println!(
            "  {} {} non-numeric width cells treated as missing",
            style("!").yellow(),
            result.coerced_cells
        );
    }
    println!();

    stats::print_summary(&result.summary);
    println!();
    print_variability(&result.variability);
    println!();
    normality::print_normality(&result.normality);
    println!();
    anomalies::print_anomaly_sets(&result.anomalies.sets(), args.show_rows);
    println!();
    filter::print_view(&result.filtered);

    if let Some(range_box) = &result.charts.range_box {
        println!();
        println!("{}", style("Width Range (max - min)").bold());
        println!("{}", viz::render_box(range_box));
    }

    if args.histogram {
        if let Some(hist) = &result.charts.histogram {
            println!();
            println!(
                "{} ({} values, {} bins)",
                style("Mean Width Distribution").bold(),
                hist.total(),
                hist.counts.len()
            );
            println!("{}", viz::render_histogram(hist, result.filtered.range));
            if let Some(overlay) = viz::render_curve_overlay(hist, &result.charts.normal_curve) {
                println!();
                println!("{}", style("Fitted normal curve over bar tops").dim());
                println!("{}", overlay);
            }
        }
    }
}

fn print_variability(v: &VariabilityAssessment) {
    println!("{}", style("Variability").bold());
    if v.verdict == VariabilityVerdict::Undefined {
        println!("  {}", style(&v.guidance).yellow());
        return;
    }
    for band in &v.bands {
        println!(
            "  {:>5}% band (±{}σ): {} … {} mm",
            band.coverage,
            band.sigmas,
            format_mm(band.lower),
            format_mm(band.upper)
        );
    }
    let verdict = match v.verdict {
        VariabilityVerdict::Low => style(&v.guidance).green(),
        VariabilityVerdict::Moderate => style(&v.guidance).yellow(),
        _ => style(&v.guidance).red(),
    };
    println!(
        "  Std dev {} mm: {}",
        format_mm(v.std_dev),
        verdict
    );
}
