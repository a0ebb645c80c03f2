//! CLI module - argument parsing and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod output;
pub mod table;
pub mod template;
pub mod viz;

pub use args::{Cli, Commands, GlobalOpts, OutputFormat, TableArgs};

/// Run the parsed command
pub fn dispatch(cli: Cli) -> miette::Result<()> {
    let global = cli.global;
    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args, &global),
        Commands::Stats(args) => commands::stats::run(args, &global),
        Commands::Normality(args) => commands::normality::run(args, &global),
        Commands::Anomalies(args) => commands::anomalies::run(args, &global),
        Commands::Filter(args) => commands::filter::run(args, &global),
        Commands::Report(args) => commands::report::run(args, &global),
        Commands::Init(args) => commands::init::run(args),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
