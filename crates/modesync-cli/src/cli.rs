//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use modesync_core::DisplayMode;

/// modesync - Copy field groups and field widgets between bundle displays
#[derive(Parser, Debug)]
#[command(name = "modesync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exported configuration directory (overrides modesync.toml)
    #[arg(long, global = true, env = "MODESYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Which source display to copy and onto which bundles
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Run a job defined in modesync.toml
    #[arg(long, conflicts_with_all = ["entity_type", "source", "display"])]
    pub job: Option<String>,

    /// Entity type, e.g. node or commerce_product
    #[arg(short, long)]
    pub entity_type: Option<String>,

    /// Source bundle
    #[arg(short, long)]
    pub source: Option<String>,

    /// Display to copy: form.<mode> or view.<mode>
    #[arg(short, long)]
    pub display: Option<DisplayMode>,

    /// Target bundle (repeatable)
    #[arg(short, long = "target")]
    pub targets: Vec<String>,

    /// Target every other bundle that has the display
    #[arg(long)]
    pub all_targets: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Synchronize target displays with the source display
    ///
    /// Examples:
    ///   modesync sync --job product-form
    ///   modesync sync -e node -s article -d form.default -t page -t blog
    ///   modesync sync -e node -s article -d view.teaser --all-targets --dry-run
    Sync {
        #[command(flatten)]
        selection: Selection,

        /// Preview changes without writing them
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Report which targets differ from the source display
    Check {
        #[command(flatten)]
        selection: Selection,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List entity types, bundles and displays in the configuration directory
    List {
        /// Only list this entity type
        #[arg(short, long)]
        entity_type: Option<String>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_with_targets() {
        let cli = Cli::try_parse_from([
            "modesync", "sync", "-e", "node", "-s", "article", "-d", "form.default", "-t", "page", "-t", "blog",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Sync {
                selection, dry_run, ..
            }) => {
                assert!(dry_run);
                assert_eq!(selection.display, Some(DisplayMode::form("default")));
                assert_eq!(selection.targets, vec!["page", "blog"]);
            }
            other => panic!("expected sync, got {:?}", other),
        }
    }

    #[test]
    fn invalid_display_is_rejected_at_parse_time() {
        let result = Cli::try_parse_from(["modesync", "check", "-d", "teaser"]);
        assert!(result.is_err());
    }

    #[test]
    fn job_conflicts_with_explicit_source() {
        let result = Cli::try_parse_from(["modesync", "sync", "--job", "forms", "--source", "article"]);
        assert!(result.is_err());
    }

    #[test]
    fn config_dir_is_global() {
        let cli = Cli::try_parse_from(["modesync", "list", "--config-dir", "export"]).unwrap();
        assert_eq!(cli.config_dir, Some(PathBuf::from("export")));
    }
}
