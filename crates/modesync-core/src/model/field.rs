//! Field definitions (schema level)

use serde::{Deserialize, Serialize};

/// A configurable field attached to one bundle.
///
/// Only presence matters to synchronization; the remaining attributes are
/// read for reporting and never written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub field_name: String,
    pub entity_type: String,
    pub bundle: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub translatable: bool,
    #[serde(default)]
    pub field_type: String,
}

impl FieldDefinition {
    pub fn new(
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Self {
        let field_name = field_name.into();
        Self {
            label: field_name.clone(),
            field_name,
            entity_type: entity_type.into(),
            bundle: bundle.into(),
            description: String::new(),
            required: false,
            translatable: false,
            field_type: String::new(),
        }
    }
}
