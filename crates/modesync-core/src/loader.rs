//! Display resolution

use crate::Result;
use crate::model::{Display, DisplayContext, DisplayId};
use crate::store::DisplayStore;

/// Resolves persisted displays from a [`DisplayStore`].
///
/// Absence is a normal outcome (`Ok(None)`); errors are reserved for a store
/// that could not be read.
pub struct DisplayLoader<'a, S: DisplayStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: DisplayStore + ?Sized> DisplayLoader<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn resolve(
        &self,
        entity_type: &str,
        bundle: &str,
        mode: &str,
        context: DisplayContext,
    ) -> Result<Option<Display>> {
        self.resolve_id(&DisplayId::new(entity_type, bundle, mode, context))
    }

    pub fn resolve_id(&self, id: &DisplayId) -> Result<Option<Display>> {
        let display = self.store.load_display(id)?;
        if display.is_none() {
            tracing::debug!(display = %id, context = %id.context, "display not found");
        }
        Ok(display)
    }
}
