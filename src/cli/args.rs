//! Command-line argument definitions

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    analyze::AnalyzeArgs, anomalies::AnomaliesArgs, completions::CompletionsArgs,
    filter::FilterArgs, init::InitArgs, normality::NormalityArgs, report::ReportArgs,
    stats::StatsArgs,
};

#[derive(Parser, Debug)]
#[command(name = "sternum")]
#[command(author, version, about = "Sternum width measurement analysis")]
#[command(
    long_about = "Analyse sternum width measurements: derived mean and range widths, \
descriptive statistics, normality tests, empirical-rule variability bands and \
data-entry anomaly checks."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Configuration file (default: ./sternum.yaml, then the user config directory)
    #[arg(long, global = true, env = "STERNUM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "auto")]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Text for terminals, per-command default otherwise
    #[default]
    Auto,
    /// Styled human-readable text
    Text,
    /// JSON
    Json,
    /// YAML
    Yaml,
    /// Markdown report
    Md,
    /// CSV rows (anomalies and filter)
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Auto => write!(f, "auto"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Md => write!(f, "md"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Full analysis: statistics, variability, normality, anomalies and charts
    Analyze(AnalyzeArgs),

    /// Summary statistics and percentiles of the mean width
    Stats(StatsArgs),

    /// Shapiro-Wilk and Kolmogorov-Smirnov normality tests
    Normality(NormalityArgs),

    /// Rows that look like data-entry errors
    Anomalies(AnomaliesArgs),

    /// Restrict the mean width to a range and show the subset
    Filter(FilterArgs),

    /// Render a Markdown report
    Report(ReportArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Input table and how to read it, shared by every data command
#[derive(clap::Args, Debug, Clone)]
pub struct TableArgs {
    /// Measurement table (CSV)
    pub file: PathBuf,

    /// 1-based row holding the column headers
    #[arg(long)]
    pub header_row: Option<usize>,

    /// Field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Header of the minimum-width column
    #[arg(long)]
    pub min_column: Option<String>,

    /// Header of the maximum-width column
    #[arg(long)]
    pub max_column: Option<String>,

    /// Header of a subject id column used to label rows
    #[arg(long)]
    pub id_column: Option<String>,
}
