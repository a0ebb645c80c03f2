//! `sternum stats` command - summary statistics of the mean width

use console::style;
use miette::Result;

use crate::analysis::{summarize, SummaryStats};
use crate::cli::args::TableArgs;
use crate::cli::helpers::{format_mm, format_num, open_session};
use crate::cli::output::{effective_format, print_structured, unsupported};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct StatsArgs {
    #[command(flatten)]
    pub table: TableArgs,
}

pub fn run(args: StatsArgs, global: &GlobalOpts) -> Result<()> {
    let session = open_session(global, &args.table, None, None)?;
    let summary = summarize(&session.rows());

    let format = effective_format(global.output);
    if print_structured(&summary, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            print_summary(&summary);
            Ok(())
        }
        other => Err(unsupported(other, "stats")),
    }
}

/// Print the statistics block shared with `analyze`
pub(crate) fn print_summary(summary: &SummaryStats) {
    println!("{}", style("Mean Width Statistics").bold());
    if !summary.has_data() {
        println!("  {}", style("No rows with a valid mean width").yellow());
        return;
    }
    println!("  {:<18} {}", "Count:", summary.count);
    println!("  {:<18} {} mm", "Mean:", style(format_mm(summary.mean)).cyan());
    println!("  {:<18} {} mm", "Std dev (n-1):", format_mm(summary.std_dev));
    println!("  {:<18} {} mm", "Min:", format_mm(summary.min));
    println!("  {:<18} {} mm", "Max:", format_mm(summary.max));
    println!("  {:<18} {}", "Skewness:", format_num(summary.skewness, 3));
    println!("  {:<18} {}", "Excess kurtosis:", format_num(summary.kurtosis, 3));
    println!();
    println!("{}", style("Percentiles").bold());
    let p = &summary.percentiles;
    println!("  {:<18} {} mm", "5th:", format_mm(p.p5));
    println!("  {:<18} {} mm", "50th (median):", format_mm(p.p50));
    println!("  {:<18} {} mm", "95th:", format_mm(p.p95));
}
