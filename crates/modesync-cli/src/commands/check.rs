//! Check command implementation

use colored::Colorize;

use modesync_core::{CheckReport, CheckStatus, SyncEngine, SyncRequest};

use crate::cli::Selection;
use crate::context::ProjectContext;
use crate::error::Result;

/// Run the check command
///
/// Returns `true` only when every target matches the source.
pub fn run_check(context: &ProjectContext, selection: &Selection, json: bool) -> Result<bool> {
    let mut store = context.open_store()?;
    let request = context.request(selection, &store)?;

    let report = SyncEngine::new(&mut store).check(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&request, &report);
    }

    Ok(report.is_healthy())
}

fn print_report(request: &SyncRequest, report: &CheckReport) {
    println!(
        "{} Checking {} against {} bundle(s)...",
        "=>".blue().bold(),
        request.source_id().to_string().cyan(),
        request.targets.len()
    );

    if report.status == CheckStatus::Broken {
        println!("{} Cannot check:", "BROKEN".red().bold());
        for message in &report.messages {
            println!("   {} {}", "!".red(), message);
        }
        return;
    }

    for bundle in &request.targets {
        let drifted: Vec<_> = report.drifted.iter().filter(|item| &item.bundle == bundle).collect();
        let missing = report.missing.iter().find(|item| &item.bundle == bundle);

        if let Some(item) = missing {
            println!("{} {}: {}", "MISSING".yellow().bold(), bundle, item.description);
        } else if drifted.is_empty() {
            println!("{} {}: in sync", "OK".green().bold(), bundle);
        } else {
            println!("{} {}: drifted", "DRIFTED".red().bold(), bundle);
            for item in drifted {
                println!("   {} {}", "!".red(), item.description);
            }
        }
    }

    for message in &report.messages {
        println!("   {} {}", "?".yellow(), message);
    }

    if !report.is_healthy() {
        println!();
        println!("Run {} to apply.", "modesync sync".cyan());
    }
}
