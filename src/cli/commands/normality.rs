//! `sternum normality` command - Shapiro-Wilk and Kolmogorov-Smirnov tests

use console::style;
use miette::Result;

use crate::analysis::{NormalityReport, NormalityResult, NormalityTest, NormalityVerdict};
use crate::cli::args::TableArgs;
use crate::cli::helpers::{format_num, format_p, open_session};
use crate::cli::output::{effective_format, print_structured, unsupported};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct NormalityArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Seed for the synthetic normal sample (reproducible Kolmogorov-Smirnov result)
    #[arg(long, env = "STERNUM_SEED")]
    pub seed: Option<u64>,
}

pub fn run(args: NormalityArgs, global: &GlobalOpts) -> Result<()> {
    let mut session = open_session(global, &args.table, args.seed, None)?;
    let report = session.normality();

    let format = effective_format(global.output);
    if print_structured(&report, format)? {
        return Ok(());
    }
    match format {
        OutputFormat::Text => {
            print_normality(&report);
            Ok(())
        }
        other => Err(unsupported(other, "normality")),
    }
}

/// Print both test results shared with `analyze`
pub(crate) fn print_normality(report: &NormalityReport) {
    println!(
        "{} (α = {})",
        style("Normality Tests").bold(),
        report.alpha
    );
    print_result(&report.shapiro_wilk);
    print_result(&report.kolmogorov_smirnov);

    match report.seed {
        Some(seed) => println!(
            "  {} synthetic sample drawn with seed {}",
            style("Note:").dim(),
            seed
        ),
        None => println!(
            "  {} Kolmogorov-Smirnov draws a fresh synthetic sample each run; pass --seed for a repeatable result",
            style("Note:").dim()
        ),
    }
}

fn print_result(result: &NormalityResult) {
    let symbol = match result.test {
        NormalityTest::ShapiroWilk => "W",
        NormalityTest::KolmogorovSmirnov => "D",
    };
    let verdict = match result.verdict {
        NormalityVerdict::AppearsNormal => style(result.verdict.to_string()).green(),
        NormalityVerdict::NotNormal => style(result.verdict.to_string()).red().bold(),
        NormalityVerdict::Inconclusive => style(result.verdict.to_string()).yellow(),
    };
    println!(
        "  {:<20} {} = {:<8} p = {:<10} {}",
        result.test.to_string(),
        symbol,
        format_num(result.statistic, 4),
        format_p(result.p_value),
        verdict
    );
}
