//! In-memory store

use std::collections::{BTreeMap, BTreeSet};

use super::{DisplayStore, FieldGroupStore, FieldSchemaStore};
use crate::model::{Display, DisplayId, FieldDefinition, FieldGroup};
use crate::{Error, Result};

/// Displays and field definitions held in maps.
///
/// Field groups live inside their displays, as they do on disk. Writes for
/// bundles passed to [`MemoryStore::reject_writes_for`] fail, which lets
/// callers exercise persistence failures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    displays: BTreeMap<DisplayId, Display>,
    fields: BTreeMap<(String, String, String), FieldDefinition>,
    rejected_bundles: BTreeSet<String>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `display` under the id derived from its own fields.
    pub fn insert_display(&mut self, display: Display) {
        self.displays.insert(display.display_id(), display);
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.insert_display(display);
        self
    }

    pub fn insert_field(&mut self, field: FieldDefinition) {
        self.fields.insert(
            (
                field.entity_type.clone(),
                field.bundle.clone(),
                field.field_name.clone(),
            ),
            field,
        );
    }

    /// Define `field_name` on each of `bundles`.
    pub fn with_field(mut self, entity_type: &str, bundles: &[&str], field_name: &str) -> Self {
        for bundle in bundles {
            self.insert_field(FieldDefinition::new(entity_type, *bundle, field_name));
        }
        self
    }

    pub fn reject_writes_for(&mut self, bundle: impl Into<String>) {
        self.rejected_bundles.insert(bundle.into());
    }

    pub fn display(&self, id: &DisplayId) -> Option<&Display> {
        self.displays.get(id)
    }

    /// Number of successful display writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DisplayStore for MemoryStore {
    fn load_display(&self, id: &DisplayId) -> Result<Option<Display>> {
        Ok(self.displays.get(id).cloned())
    }

    fn save_display(&mut self, display: &Display) -> Result<()> {
        if self.rejected_bundles.contains(&display.bundle) {
            return Err(Error::persistence(
                format!("display {}", display.id),
                "store rejected the write",
            ));
        }
        self.displays.insert(display.display_id(), display.clone());
        self.writes += 1;
        Ok(())
    }
}

impl FieldSchemaStore for MemoryStore {
    fn load_field(
        &self,
        entity_type: &str,
        bundle: &str,
        field_name: &str,
    ) -> Result<Option<FieldDefinition>> {
        let key = (
            entity_type.to_string(),
            bundle.to_string(),
            field_name.to_string(),
        );
        Ok(self.fields.get(&key).cloned())
    }
}

impl FieldGroupStore for MemoryStore {
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
    use crate::model::{DisplayContext, GroupSettings, Region};

    fn form(bundle: &str) -> DisplayId {
        DisplayId::new("node", bundle, "default", DisplayContext::Form)
    }

    #[test]
    fn save_group_updates_owning_display() {
        let mut store = MemoryStore::new().with_display(Display::new(&form("page")));
        let group = FieldGroup::builder("group_main")
            .display(&form("page"))
            .layout_from(&GroupSettings::new("Main", "tabs"))
            .region(Region::Hidden)
            .build()
            .unwrap();

        store.save_group(&group).unwrap();

        let loaded = store.load_group("group_main", &form("page")).unwrap().unwrap();
        assert_eq!(loaded, group);
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn save_group_without_display_fails() {
        let mut store = MemoryStore::new();
        let group = FieldGroup::builder("group_main")
            .display(&form("page"))
            .format_type("tabs")
            .build()
            .unwrap();

        assert!(matches!(
            store.save_group(&group),
            Err(Error::Persistence { .. })
        ));
    }

    #[test]
    fn rejected_bundle_fails_writes() {
        let mut store = MemoryStore::new();
        store.reject_writes_for("page");

        let result = store.save_display(&Display::new(&form("page")));

        assert!(result.is_err());
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn form_and_view_displays_are_separate() {
        let view = DisplayId::new("node", "page", "default", DisplayContext::View);
        let store = MemoryStore::new().with_display(Display::new(&form("page")));

        assert!(store.load_display(&form("page")).unwrap().is_some());
        assert!(store.load_display(&view).unwrap().is_none());
    }
}
