//! Field groups

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::display::{DisplayContext, DisplayId};
use crate::{Error, Result};

/// Visibility bucket of a field group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Content,
    /// Soft-disabled: the group stays defined but is not rendered.
    Hidden,
}

/// Layout style a group renders with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormatType {
    Tabs,
    Tab,
    Details,
    DetailsSidebar,
    Fieldset,
    HtmlElement,
    Accordion,
    AccordionItem,
    /// A formatter contributed by another module.
    Other(String),
}

impl FormatType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tabs => "tabs",
            Self::Tab => "tab",
            Self::Details => "details",
            Self::DetailsSidebar => "details_sidebar",
            Self::Fieldset => "fieldset",
            Self::HtmlElement => "html_element",
            Self::Accordion => "accordion",
            Self::AccordionItem => "accordion_item",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for FormatType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "tabs" => Self::Tabs,
            "tab" => Self::Tab,
            "details" => Self::Details,
            "details_sidebar" => Self::DetailsSidebar,
            "fieldset" => Self::Fieldset,
            "html_element" => Self::HtmlElement,
            "accordion" => Self::Accordion,
            "accordion_item" => Self::AccordionItem,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for FormatType {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<FormatType> for String {
    fn from(value: FormatType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level groups store an empty `parent_name`.
mod blank_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value: Option<String> = Option::deserialize(deserializer)?;
        Ok(value.filter(|name| !name.is_empty()))
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A group as stored inside a display's third-party settings.
///
/// The owning display supplies entity type, bundle, mode and context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSettings {
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub region: Region,
    #[serde(default, with = "blank_as_none")]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub weight: i64,
    pub format_type: FormatType,
    #[serde(default = "empty_object")]
    pub format_settings: Value,
}

impl GroupSettings {
    pub fn new(label: impl Into<String>, format_type: impl Into<FormatType>) -> Self {
        Self {
            children: Vec::new(),
            label: label.into(),
            region: Region::Content,
            parent_name: None,
            weight: 0,
            format_type: format_type.into(),
            format_settings: empty_object(),
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_name = Some(parent.into());
        self
    }

    pub fn with_weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn with_format_settings(mut self, settings: Value) -> Self {
        self.format_settings = settings;
        self
    }
}

/// A field group record addressed by name and display.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub group_name: String,
    pub entity_type: String,
    pub bundle: String,
    pub mode: String,
    pub context: DisplayContext,
    pub children: Vec<String>,
    pub parent_name: Option<String>,
    pub weight: i64,
    pub label: String,
    pub format_type: FormatType,
    pub format_settings: Value,
    pub region: Region,
}

impl FieldGroup {
    pub fn builder(group_name: impl Into<String>) -> FieldGroupBuilder {
        FieldGroupBuilder::new(group_name)
    }

    /// Rebuild the record for a group stored on `display`.
    pub fn from_settings(group_name: &str, display: &DisplayId, settings: &GroupSettings) -> Self {
        Self {
            group_name: group_name.to_string(),
            entity_type: display.entity_type.clone(),
            bundle: display.bundle.clone(),
            mode: display.mode.clone(),
            context: display.context,
            children: settings.children.clone(),
            parent_name: settings.parent_name.clone(),
            weight: settings.weight,
            label: settings.label.clone(),
            format_type: settings.format_type.clone(),
            format_settings: settings.format_settings.clone(),
            region: settings.region,
        }
    }

    /// The stored shape, without the display identity.
    pub fn to_settings(&self) -> GroupSettings {
        GroupSettings {
            children: self.children.clone(),
            label: self.label.clone(),
            region: self.region,
            parent_name: self.parent_name.clone(),
            weight: self.weight,
            format_type: self.format_type.clone(),
            format_settings: self.format_settings.clone(),
        }
    }

    pub fn display_id(&self) -> DisplayId {
        DisplayId::new(
            self.entity_type.clone(),
            self.bundle.clone(),
            self.mode.clone(),
            self.context,
        )
    }

    /// True when children, parent, weight, label, format type and format
    /// settings all match. Identity and region are not compared.
    pub fn same_layout(&self, other: &FieldGroup) -> bool {
        self.children == other.children
            && self.parent_name == other.parent_name
            && self.weight == other.weight
            && self.label == other.label
            && self.format_type == other.format_type
            && self.format_settings == other.format_settings
    }

    /// Overwrite the compared attributes with those of `source`.
    pub fn copy_layout_from(&mut self, source: &FieldGroup) {
        self.children = source.children.clone();
        self.parent_name = source.parent_name.clone();
        self.weight = source.weight;
        self.label = source.label.clone();
        self.format_type = source.format_type.clone();
        self.format_settings = source.format_settings.clone();
    }
}

/// Validating builder for [`FieldGroup`].
///
/// Only identity and format are checked. `children` and `parent_name` are
/// taken as given, even when they name the group itself or a group that
/// does not exist.
#[derive(Debug, Clone)]
pub struct FieldGroupBuilder {
    group_name: String,
    display: Option<DisplayId>,
    children: Vec<String>,
    parent_name: Option<String>,
    weight: i64,
    label: String,
    format_type: Option<FormatType>,
    format_settings: Value,
    region: Region,
}

impl FieldGroupBuilder {
    fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            display: None,
            children: Vec::new(),
            parent_name: None,
            weight: 0,
            label: String::new(),
            format_type: None,
            format_settings: empty_object(),
            region: Region::Content,
        }
    }

    /// The display the group belongs to.
    pub fn display(mut self, display: &DisplayId) -> Self {
        self.display = Some(display.clone());
        self
    }

    /// Take children, parent, weight, label and format from stored settings.
    pub fn layout_from(mut self, settings: &GroupSettings) -> Self {
        self.children = settings.children.clone();
        self.parent_name = settings.parent_name.clone();
        self.weight = settings.weight;
        self.label = settings.label.clone();
        self.format_type = Some(settings.format_type.clone());
        self.format_settings = settings.format_settings.clone();
        self
    }

    pub fn children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn parent_name(mut self, parent_name: Option<impl Into<String>>) -> Self {
        self.parent_name = parent_name.map(Into::into);
        self
    }

    pub fn weight(mut self, weight: i64) -> Self {
        self.weight = weight;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn format_type(mut self, format_type: impl Into<FormatType>) -> Self {
        self.format_type = Some(format_type.into());
        self
    }

    pub fn format_settings(mut self, format_settings: Value) -> Self {
        self.format_settings = format_settings;
        self
    }

    pub fn region(mut self, region: Region) -> Self {
        self.region = region;
        self
    }

    pub fn build(self) -> Result<FieldGroup> {
        let invalid = |reason: &str| Error::InvalidGroup {
            group: self.group_name.clone(),
            reason: reason.to_string(),
        };

        if self.group_name.trim().is_empty() || self.group_name.contains(char::is_whitespace) {
            return Err(invalid("group name must be a non-empty machine name"));
        }
        let display = self
            .display
            .clone()
            .ok_or_else(|| invalid("no display given"))?;
        if display.entity_type.is_empty() || display.bundle.is_empty() || display.mode.is_empty() {
            return Err(invalid("entity type, bundle and mode must not be empty"));
        }
        let format_type = self
            .format_type
            .clone()
            .ok_or_else(|| invalid("no format type given"))?;
        Ok(FieldGroup {
            group_name: self.group_name,
            entity_type: display.entity_type,
            bundle: display.bundle,
            mode: display.mode,
            context: display.context,
            children: self.children,
            parent_name: self.parent_name,
            weight: self.weight,
            label: self.label,
            format_type,
            format_settings: self.format_settings,
            region: self.region,
        })
    }
}
