//! Storage seams for displays, field definitions and field groups
//!
//! The reconcilers only talk to these traits. Two implementations ship:
//! - [`MemoryStore`]: in-process maps, for embedding and tests
//! - [`ConfigDirStore`]: a directory of exported configuration YAML files

mod config_dir;
mod memory;

pub use config_dir::ConfigDirStore;
pub use memory::MemoryStore;

use crate::model::{Display, DisplayId, FieldDefinition, FieldGroup};
use crate::{Error, Result};

/// Persisted form and view displays.
pub trait DisplayStore {
    /// Load the display for `id`, or `None` when nothing is stored under it.
    fn load_display(&self, id: &DisplayId) -> Result<Option<Display>>;

    fn save_display(&mut self, display: &Display) -> Result<()>;
}

/// Schema-level field definitions.
pub trait FieldSchemaStore {
    fn load_field(
        &self,
        entity_type: &str,
        bundle: &str,
        field_name: &str,
    ) -> Result<Option<FieldDefinition>>;
}

/// Field groups addressed by name and display.
pub trait FieldGroupStore {
    fn load_group(&self, group_name: &str, display: &DisplayId) -> Result<Option<FieldGroup>>;

    fn save_group(&mut self, group: &FieldGroup) -> Result<()>;
}

/// Everything the sync engine needs from a backend.
pub trait ConfigStorage: DisplayStore + FieldSchemaStore + FieldGroupStore {}

impl<T: DisplayStore + FieldSchemaStore + FieldGroupStore> ConfigStorage for T {}

/// Read a group out of its display's third-party settings.
pub(crate) fn load_group_from_display<S: DisplayStore + ?Sized>(
    store: &S,
    group_name: &str,
    display: &DisplayId,
) -> Result<Option<FieldGroup>> {
    let Some(loaded) = store.load_display(display)? else {
        return Ok(None);
    };
    Ok(loaded
        .field_groups()
        .get(group_name)
        .map(|settings| FieldGroup::from_settings(group_name, display, settings)))
}

/// Write a group into its display's third-party settings.
pub(crate) fn save_group_into_display<S: DisplayStore + ?Sized>(
    store: &mut S,
    group: &FieldGroup,
) -> Result<()> {
    let id = group.display_id();
    let mut display = store.load_display(&id)?.ok_or_else(|| {
        Error::persistence(
            format!("field group {}", group.group_name),
            format!("display {} does not exist", id),
        )
    })?;
    display
        .field_groups_mut()
        .insert(group.group_name.clone(), group.to_settings());
    store.save_display(&display)
}
