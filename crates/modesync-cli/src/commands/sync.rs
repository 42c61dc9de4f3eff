//! Sync command implementation

use colored::Colorize;

use modesync_core::{SyncEngine, SyncEvent, SyncOptions, SyncReport, TargetStatus};

use crate::cli::Selection;
use crate::context::ProjectContext;
use crate::error::Result;

/// Run the sync command
///
/// Returns `false` unless every target synced.
pub fn run_sync(context: &ProjectContext, selection: &Selection, dry_run: bool, json: bool) -> Result<bool> {
    let mut store = context.open_store()?;
    let request = context.request(selection, &store)?;

    if !json {
        let verb = if dry_run { "Previewing" } else { "Synchronizing" };
        println!(
            "{} {} {} onto {} bundle(s)...",
            "=>".blue().bold(),
            verb,
            request.source_id().to_string().cyan(),
            request.targets.len()
        );
    }

    let report = SyncEngine::new(&mut store)
        .with_options(SyncOptions { dry_run })
        .sync(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report.success)
}

fn print_report(report: &SyncReport) {
    for target in &report.targets {
        match target.status {
            TargetStatus::Synced => println!("{} {}", "OK".green().bold(), target.display),
            TargetStatus::NotFound => println!("{} {}", "MISSING".yellow().bold(), target.display),
            TargetStatus::Failed => println!("{} {}", "FAILED".red().bold(), target.display),
        }
        for event in &target.events {
            println!("   {} {}", marker(event), event);
        }
        if let Some(error) = &target.error {
            println!("   {} {}", "!".red(), error);
        }
    }

    println!();
    if report.success {
        println!("{}", report.summary());
    } else {
        println!("{} {}", "error:".red().bold(), report.summary());
    }
}

fn marker(event: &SyncEvent) -> colored::ColoredString {
    match event {
        SyncEvent::FieldMissing { .. } => "?".yellow(),
        SyncEvent::FieldRemoved { .. } | SyncEvent::GroupDisabled { changed: true, .. } => "-".red(),
        event if event.is_change() => "+".green(),
        _ => "=".dimmed(),
    }
}
