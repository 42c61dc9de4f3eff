//! Configuration resolution with layered merge

use std::path::PathBuf;

use modesync_fs::NormalizedPath;

use super::manifest::{JobConfig, Manifest};
use crate::sync::SyncRequest;
use crate::{Error, Result};

/// Default location of the exported configuration, relative to the project root
pub const DEFAULT_CONFIG_DIR: &str = "config/sync";

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "modesync.toml";

/// Git-ignored local overrides
pub const LOCAL_CONFIG_FILE: &str = "modesync.local.toml";

/// Effective configuration after merging every layer
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Project root the configuration was resolved for
    pub root: NormalizedPath,

    pub config_dir: Option<String>,

    pub entity_type: Option<String>,

    pub jobs: Vec<JobConfig>,
}

impl ResolvedConfig {
    fn from_manifest(root: NormalizedPath, manifest: Manifest) -> Self {
        Self {
            root,
            config_dir: manifest.core.config_dir,
            entity_type: manifest.core.entity_type,
            jobs: manifest.jobs,
        }
    }

    /// Absolute path of the exported configuration directory.
    pub fn config_dir(&self) -> NormalizedPath {
        let dir = self.config_dir.as_deref().unwrap_or(DEFAULT_CONFIG_DIR);
        if std::path::Path::new(dir).is_absolute() {
            NormalizedPath::new(dir)
        } else {
            self.root.join(dir)
        }
    }

    /// Build the sync request for a configured job.
    pub fn job(&self, name: &str) -> Result<SyncRequest> {
        let job = self
            .jobs
            .iter()
            .find(|job| job.name == name)
            .ok_or_else(|| Error::JobNotFound {
                name: name.to_string(),
            })?;

        let entity_type = job
            .entity_type
            .as_ref()
            .or(self.entity_type.as_ref())
            .ok_or_else(|| Error::Config {
                message: format!(
                    "job '{}' has no entity_type and no [core] entity_type is set",
                    job.name
                ),
            })?;

        Ok(SyncRequest::new(entity_type.clone(), job.source.clone(), job.display.clone())
            .with_targets(job.targets.iter().cloned()))
    }
}

/// Loads and merges configuration from:
/// 1. Global defaults (`<config_dir>/modesync/config.toml`)
/// 2. Project config (`modesync.toml`)
/// 3. Local overrides (`modesync.local.toml`)
///
/// Missing layers are skipped; a layer that fails to parse is an error.
pub struct ConfigResolver {
    root: NormalizedPath,

    /// Replaces the platform config directory, for tests.
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(root: NormalizedPath) -> Self {
        Self {
            root,
            global_config_dir_override: None,
        }
    }

    pub fn with_global_config_dir(root: NormalizedPath, global_config_dir: PathBuf) -> Self {
        Self {
            root,
            global_config_dir_override: Some(global_config_dir),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("modesync"))
    }

    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut manifest = Manifest::default();

        if let Some(global_dir) = self.global_config_dir() {
            let global_config_path = NormalizedPath::new(global_dir.join("config.toml"));
            self.merge_layer(&mut manifest, &global_config_path, "global")?;
        }

        let project_config_path = self.root.join(PROJECT_CONFIG_FILE);
        self.merge_layer(&mut manifest, &project_config_path, "project")?;

        let local_config_path = self.root.join(LOCAL_CONFIG_FILE);
        self.merge_layer(&mut manifest, &local_config_path, "local")?;

        Ok(ResolvedConfig::from_manifest(self.root.clone(), manifest))
    }

    fn merge_layer(&self, manifest: &mut Manifest, path: &NormalizedPath, layer: &str) -> Result<()> {
        if !path.is_file() {
            tracing::debug!(path = %path, layer, "No config found, skipping");
            return Ok(());
        }
        tracing::debug!(path = %path, layer, "Loading config");
        let content = modesync_fs::io::read_text(path)?;
        let layer_manifest = Manifest::parse(&content).map_err(|error| Error::Config {
            message: format!("{}: {}", path, error),
        })?;
        manifest.merge(&layer_manifest);
        Ok(())
    }
}
