//! List command implementation

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;

use modesync_core::DisplayId;

use crate::context::ProjectContext;
use crate::error::Result;

/// One display found in the configuration directory
#[derive(Debug, Serialize)]
struct ListedDisplay {
    entity_type: String,
    bundle: String,
    display: String,
}

impl From<DisplayId> for ListedDisplay {
    fn from(id: DisplayId) -> Self {
        Self {
            display: id.display_mode().to_string(),
            entity_type: id.entity_type,
            bundle: id.bundle,
        }
    }
}

/// Run the list command
pub fn run_list(context: &ProjectContext, entity_type: Option<&str>, json: bool) -> Result<bool> {
    let store = context.open_store()?;
    let displays: Vec<ListedDisplay> = store
        .list_displays()?
        .into_iter()
        .filter(|id| entity_type.is_none_or(|wanted| id.entity_type == wanted))
        .map(ListedDisplay::from)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&displays)?);
        return Ok(true);
    }

    if displays.is_empty() {
        println!("No displays found in {}", context.config_dir());
        return Ok(true);
    }

    let mut tree: BTreeMap<&str, BTreeMap<&str, Vec<&str>>> = BTreeMap::new();
    for listed in &displays {
        tree.entry(listed.entity_type.as_str())
            .or_default()
            .entry(listed.bundle.as_str())
            .or_default()
            .push(listed.display.as_str());
    }

    for (entity_type, bundles) in tree {
        println!("{}", entity_type.bold());
        for (bundle, modes) in bundles {
            println!("  {} {}", bundle.cyan(), modes.join(", ").dimmed());
        }
    }

    Ok(true)
}
