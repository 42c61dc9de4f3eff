//! Store over a directory of exported configuration files
//!
//! File naming follows the configuration export layout:
//! - `core.entity_form_display.<entity>.<bundle>.<mode>.yml`
//! - `core.entity_view_display.<entity>.<bundle>.<mode>.yml`
//! - `field.field.<entity>.<bundle>.<field>.yml`

use std::fs;

use modesync_fs::{ConfigStore, NormalizedPath, WriteOutcome};

use super::{DisplayStore, FieldGroupStore, FieldSchemaStore};
use crate::model::{Display, DisplayContext, DisplayId, DisplayMode, FieldDefinition, FieldGroup};
use crate::{Error, Result};

const FIELD_PREFIX: &str = "field.field";
const EXTENSION: &str = "yml";

/// Reads and writes displays and field definitions as YAML files.
#[derive(Debug, Clone)]
pub struct ConfigDirStore {
    root: NormalizedPath,
    files: ConfigStore,
}

impl ConfigDirStore {
    /// Open an existing configuration directory.
    pub fn open(root: impl Into<NormalizedPath>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(Error::Config {
                message: format!("configuration directory {} does not exist", root),
            });
        }
        Ok(Self {
            root,
            files: ConfigStore::new(),
        })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn display_path(&self, id: &DisplayId) -> NormalizedPath {
        self.root.join(&format!(
            "{}.{}.{}",
            id.context.config_prefix(),
            id.key(),
            EXTENSION
        ))
    }

    pub fn field_path(&self, entity_type: &str, bundle: &str, field_name: &str) -> NormalizedPath {
        self.root.join(&format!(
            "{}.{}.{}.{}.{}",
            FIELD_PREFIX, entity_type, bundle, field_name, EXTENSION
        ))
    }

    /// Every form and view display found in the directory, sorted.
    pub fn list_displays(&self) -> Result<Vec<DisplayId>> {
        let native = self.root.to_native();
        let entries = fs::read_dir(&native).map_err(|e| modesync_fs::Error::io(&native, e))?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| modesync_fs::Error::io(&native, e))?;
            let name = entry.file_name();
            if let Some(id) = parse_display_file_name(&name.to_string_lossy()) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Bundles of `entity_type` that have a display for `mode`, sorted.
    pub fn bundles_with_display(&self, entity_type: &str, mode: &DisplayMode) -> Result<Vec<String>> {
        Ok(self
            .list_displays()?
            .into_iter()
            .filter(|id| {
                id.entity_type == entity_type && id.context == mode.context && id.mode == mode.mode
            })
            .map(|id| id.bundle)
            .collect())
    }
}

fn parse_display_file_name(name: &str) -> Option<DisplayId> {
    let stem = name.strip_suffix(&format!(".{}", EXTENSION))?;
    [DisplayContext::Form, DisplayContext::View]
        .into_iter()
        .find_map(|context| {
            let key = stem.strip_prefix(&format!("{}.", context.config_prefix()))?;
            let parts: Vec<&str> = key.split('.').collect();
            match parts.as_slice() {
                [entity_type, bundle, mode]
                    if !entity_type.is_empty() && !bundle.is_empty() && !mode.is_empty() =>
                {
                    Some(DisplayId::new(*entity_type, *bundle, *mode, context))
                }
                _ => None,
            }
        })
}

impl DisplayStore for ConfigDirStore {
    fn load_display(&self, id: &DisplayId) -> Result<Option<Display>> {
        let path = self.display_path(id);
        let loaded: Option<Display> = self.files.load_optional(&path)?;
        Ok(loaded.map(|mut display| {
            display.context = id.context;
            display
        }))
    }

    fn save_display(&mut self, display: &Display) -> Result<()> {
        let path = self.display_path(&display.display_id());
        match self.files.save(&path, display) {
            Ok(WriteOutcome::Written) => {
                tracing::debug!(path = %path, "wrote display");
                Ok(())
            }
            Ok(WriteOutcome::Unchanged) => Ok(()),
            Err(e) => Err(Error::persistence(format!("display {}", display.id), e)),
        }
    }
}

impl FieldSchemaStore for ConfigDirStore {
    fn load_field(
        &self,
        entity_type: &str,
        bundle: &str,
        field_name: &str,
    ) -> Result<Option<FieldDefinition>> {
        let path = self.field_path(entity_type, bundle, field_name);
        Ok(self.files.load_optional(&path)?)
    }
}

impl FieldGroupStore for ConfigDirStore {
    fn load_group(&self, group_name: &str, display: &DisplayId) -> Result<Option<FieldGroup>> {
        super::load_group_from_display(self, group_name, display)
    }

    fn save_group(&mut self, group: &FieldGroup) -> Result<()> {
        super::save_group_into_display(self, group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "core.entity_form_display.node.article.default.yml",
        Some(DisplayId::new("node", "article", "default", DisplayContext::Form))
    )]
    #[case(
        "core.entity_view_display.commerce_product.food.teaser.yml",
        Some(DisplayId::new("commerce_product", "food", "teaser", DisplayContext::View))
    )]
    #[case("field.field.node.article.body.yml", None)]
    #[case("core.entity_form_display.node.article.yml", None)]
    #[case("core.entity_form_display.node.article.default.yaml", None)]
    #[case("core.entity_form_mode.node.default.yml", None)]
    fn display_file_names(#[case] name: &str, #[case] expected: Option<DisplayId>) {
        assert_eq!(parse_display_file_name(name), expected);
    }

    #[test]
    fn open_requires_existing_directory() {
        let err = ConfigDirStore::open("/definitely/not/a/config/dir").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn paths_follow_export_naming() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigDirStore::open(dir.path()).unwrap();
        let id = DisplayId::new("node", "page", "default", DisplayContext::View);

        assert!(store
            .display_path(&id)
            .as_str()
            .ends_with("/core.entity_view_display.node.page.default.yml"));
        assert!(store
            .field_path("node", "page", "body")
            .as_str()
            .ends_with("/field.field.node.page.body.yml"));
    }
}
