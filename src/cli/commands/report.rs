//! `sternum report` command - Markdown report from the embedded template

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::analysis::AnalysisReport;
use crate::cli::args::TableArgs;
use crate::cli::helpers::{checked_range, open_session};
use crate::cli::template::ReportRenderer;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub table: TableArgs,

    /// Mean-width range for the filtered section (default: full range)
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    pub range: Option<Vec<f64>>,

    /// Seed for the synthetic normal sample (reproducible Kolmogorov-Smirnov result)
    #[arg(long, env = "STERNUM_SEED")]
    pub seed: Option<u64>,

    /// Write the report to a file instead of stdout
    #[arg(long = "out", short = 'f')]
    pub out: Option<PathBuf>,
}

pub fn run(args: ReportArgs, global: &GlobalOpts) -> Result<()> {
    let range = match args.range.as_deref() {
        Some([lo, hi]) => Some(checked_range(*lo, *hi)?),
        _ => None,
    };
    let mut session = open_session(global, &args.table, args.seed, None)?;
    let result = session.analyze(range);

    let source = args.table.file.display().to_string();
    let markdown = ReportRenderer::new()?.render(&source, &result)?;

    match &args.out {
        Some(path) => {
            fs::write(path, markdown).into_diagnostic()?;
            eprintln!(
                "{} Wrote report to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
        None => print!("{}", markdown),
    }
    Ok(())
}

/// Render and print a report, used by `analyze -o md`
pub(crate) fn print_markdown(source: &str, result: &AnalysisReport) -> Result<()> {
    let markdown = ReportRenderer::new()?.render(source, result)?;
    print!("{}", markdown);
    Ok(())
}
