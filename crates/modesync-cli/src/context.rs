//! Project context
//!
//! Ties the working directory, the layered modesync.toml configuration and
//! command-line selections together into a store and a sync request.

use std::path::{Path, PathBuf};

use modesync_core::{ConfigDirStore, ConfigResolver, ResolvedConfig, SyncRequest};
use modesync_fs::NormalizedPath;

use crate::cli::Selection;
use crate::error::{CliError, Result};

pub struct ProjectContext {
    config: ResolvedConfig,
    config_dir_override: Option<PathBuf>,
}

impl ProjectContext {
    /// Resolve configuration for the project rooted at `root`.
    pub fn load(root: &Path, config_dir_override: Option<PathBuf>) -> Result<Self> {
        let config = ConfigResolver::new(NormalizedPath::new(root)).resolve()?;
        Ok(Self {
            config,
            config_dir_override,
        })
    }

    pub fn config_dir(&self) -> NormalizedPath {
        match &self.config_dir_override {
            Some(dir) if dir.is_absolute() => NormalizedPath::new(dir),
            Some(dir) => NormalizedPath::new(self.config.root.to_native().join(dir)),
            None => self.config.config_dir(),
        }
    }

    pub fn open_store(&self) -> Result<ConfigDirStore> {
        let dir = self.config_dir();
        tracing::debug!(config_dir = %dir, "opening configuration directory");
        Ok(ConfigDirStore::open(dir)?)
    }

    /// Build the request described by `selection`.
    pub fn request(&self, selection: &Selection, store: &ConfigDirStore) -> Result<SyncRequest> {
        let mut request = match &selection.job {
            Some(job) => self.config.job(job)?,
            None => self.adhoc_request(selection)?,
        };

        for target in &selection.targets {
            request.add_target(target.clone());
        }

        if selection.all_targets {
            for bundle in store.bundles_with_display(&request.entity_type, &request.display)? {
                if bundle != request.source_bundle {
                    request.add_target(bundle);
                }
            }
        }

        if request.targets.is_empty() {
            return Err(CliError::user(
                "No target bundles selected. Pass --target <bundle> or --all-targets.",
            ));
        }
        Ok(request)
    }

    fn adhoc_request(&self, selection: &Selection) -> Result<SyncRequest> {
        let entity_type = selection
            .entity_type
            .clone()
            .or_else(|| self.config.entity_type.clone())
            .ok_or_else(|| {
                CliError::user("No entity type given. Pass --entity-type or set [core] entity_type.")
            })?;
        let source = selection
            .source
            .clone()
            .ok_or_else(|| CliError::user("No source bundle given. Pass --source or --job."))?;
        let display = selection.display.clone().ok_or_else(|| {
            CliError::user("No display given. Pass --display form.<mode> or view.<mode>.")
        })?;

        Ok(SyncRequest::new(entity_type, source, display))
    }
}
