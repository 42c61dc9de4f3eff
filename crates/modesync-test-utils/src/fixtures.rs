//! Exported configuration documents shaped like a real site export.

use serde_json::{Map, Value, json};

const DEFAULT_UUID: &str = "4b0b6f8a-0000-4000-8000-000000000000";

/// Builder for a `core.entity_{form,view}_display.*` document.
///
/// ```rust
/// use modesync_test_utils::DisplayFixture;
///
/// let yaml = DisplayFixture::form("node", "article", "default")
///     .component("field_tags", "entity_reference_autocomplete", 3)
///     .group("group_main", "Main", "tabs", &["field_tags"])
///     .to_yaml();
/// assert!(yaml.contains("group_main"));
/// ```
#[derive(Debug, Clone)]
pub struct DisplayFixture {
    context: &'static str,
    entity_type: String,
    bundle: String,
    mode: String,
    uuid: String,
    content: Map<String, Value>,
    hidden: Map<String, Value>,
    groups: Map<String, Value>,
}

impl DisplayFixture {
    pub fn form(entity_type: &str, bundle: &str, mode: &str) -> Self {
        Self::new("form", entity_type, bundle, mode)
    }

    pub fn view(entity_type: &str, bundle: &str, mode: &str) -> Self {
        Self::new("view", entity_type, bundle, mode)
    }

    fn new(context: &'static str, entity_type: &str, bundle: &str, mode: &str) -> Self {
        Self {
            context,
            entity_type: entity_type.to_string(),
            bundle: bundle.to_string(),
            mode: mode.to_string(),
            uuid: DEFAULT_UUID.to_string(),
            content: Map::new(),
            hidden: Map::new(),
            groups: Map::new(),
        }
    }

    pub fn uuid(mut self, uuid: &str) -> Self {
        self.uuid = uuid.to_string();
        self
    }

    pub fn component(self, name: &str, kind: &str, weight: i64) -> Self {
        self.component_with_settings(name, kind, weight, json!({}))
    }

    pub fn component_with_settings(mut self, name: &str, kind: &str, weight: i64, settings: Value) -> Self {
        self.content.insert(
            name.to_string(),
            json!({
                "type": kind,
                "weight": weight,
                "region": "content",
                "settings": settings,
                "third_party_settings": {},
            }),
        );
        self
    }

    pub fn hidden(mut self, name: &str) -> Self {
        self.hidden.insert(name.to_string(), Value::Bool(true));
        self
    }

    /// Add a field group in the content region at weight 0.
    pub fn group(self, name: &str, label: &str, format_type: &str, children: &[&str]) -> Self {
        self.group_value(
            name,
            json!({
                "children": children,
                "label": label,
                "region": "content",
                "parent_name": "",
                "weight": 0,
                "format_type": format_type,
                "format_settings": {},
            }),
        )
    }

    /// Add a field group from a raw settings object.
    pub fn group_value(mut self, name: &str, settings: Value) -> Self {
        self.groups.insert(name.to_string(), settings);
        self
    }

    pub fn file_name(&self) -> String {
        display_file_name(self.context, &self.entity_type, &self.bundle, &self.mode)
    }

    pub fn to_value(&self) -> Value {
        let mut third_party_settings = Map::new();
        if !self.groups.is_empty() {
            third_party_settings.insert("field_group".to_string(), Value::Object(self.groups.clone()));
        }
        json!({
            "uuid": self.uuid,
            "langcode": "en",
            "status": true,
            "dependencies": {
                "config": [format!("{}.type.{}", self.entity_type, self.bundle)],
            },
            "third_party_settings": third_party_settings,
            "id": format!("{}.{}.{}", self.entity_type, self.bundle, self.mode),
            "targetEntityType": self.entity_type,
            "bundle": self.bundle,
            "mode": self.mode,
            "content": self.content,
            "hidden": self.hidden,
        })
    }

    pub fn to_yaml(&self) -> String {
        serde_yaml::to_string(&self.to_value()).unwrap()
    }
}

/// File name of an exported display; `context` is `form` or `view`.
pub fn display_file_name(context: &str, entity_type: &str, bundle: &str, mode: &str) -> String {
    format!(
        "core.entity_{}_display.{}.{}.{}.yml",
        context, entity_type, bundle, mode
    )
}

/// A `field.field.*` document for a plain text field.
pub fn field_yaml(entity_type: &str, bundle: &str, field_name: &str) -> String {
    let value = json!({
        "uuid": DEFAULT_UUID,
        "langcode": "en",
        "status": true,
        "id": format!("{}.{}.{}", entity_type, bundle, field_name),
        "field_name": field_name,
        "entity_type": entity_type,
        "bundle": bundle,
        "label": field_name,
        "description": "",
        "required": false,
        "translatable": true,
        "default_value": [],
        "settings": {},
        "field_type": "string",
    });
    serde_yaml::to_string(&value).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_document_has_export_keys() {
        let value = DisplayFixture::view("node", "page", "teaser")
            .component("body", "text_summary_or_trimmed", 0)
            .hidden("links")
            .to_value();

        assert_eq!(value["targetEntityType"], "node");
        assert_eq!(value["id"], "node.page.teaser");
        assert_eq!(value["content"]["body"]["type"], "text_summary_or_trimmed");
        assert_eq!(value["hidden"]["links"], true);
    }

    #[test]
    fn file_names_follow_export_layout() {
        assert_eq!(
            DisplayFixture::form("node", "page", "default").file_name(),
            "core.entity_form_display.node.page.default.yml"
        );
    }
}
