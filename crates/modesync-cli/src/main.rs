//! modesync CLI
//!
//! Copies the field groups and field widgets of one bundle's form or view
//! display onto other bundles in an exported configuration directory.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::ProjectContext;
use error::Result;

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not set up logging: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let Some(command) = cli.command else {
        println!("{} Display and field-group sync", "modesync".green().bold());
        println!();
        println!("Run {} for available commands.", "modesync --help".cyan());
        return Ok(true);
    };

    let cwd = std::env::current_dir()?;
    let context = ProjectContext::load(&cwd, cli.config_dir)?;

    match command {
        Commands::Sync {
            selection,
            dry_run,
            json,
        } => commands::run_sync(&context, &selection, dry_run, json),
        Commands::Check { selection, json } => commands::run_check(&context, &selection, json),
        Commands::List { entity_type, json } => {
            commands::run_list(&context, entity_type.as_deref(), json)
        }
    }
}
