//! `sternum init` command - write the default configuration file

use console::style;
use miette::{IntoDiagnostic, Result};
use std::fs;
use std::path::PathBuf;

use crate::cli::template::config_template;
use crate::core::config::LOCAL_CONFIG_FILE;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,

    /// Write to the user config directory instead of the working directory
    #[arg(long)]
    pub user: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.user {
        Config::user_config_path()
            .ok_or_else(|| miette::miette!("Could not determine the user config directory"))?
    } else {
        PathBuf::from(LOCAL_CONFIG_FILE)
    };

    if path.exists() && !args.force {
        return Err(miette::miette!(
            help = "pass --force to overwrite it",
            "{} already exists",
            path.display()
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).into_diagnostic()?;
    }
    fs::write(&path, config_template()?).into_diagnostic()?;
    tracing::info!(path = %path.display(), "wrote configuration");

    println!(
        "{} Wrote configuration to {}",
        style("✓").green(),
        style(path.display()).cyan()
    );
    Ok(())
}
