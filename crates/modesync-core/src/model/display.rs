//! Displays and their field components

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::group::GroupSettings;
use crate::{Error, Result};

/// Which configuration namespace a display lives in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayContext {
    /// Editing widgets
    #[default]
    Form,
    /// Rendering formatters
    View,
}

impl DisplayContext {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::View => "view",
        }
    }

    /// Prefix of exported configuration names in this namespace.
    pub fn config_prefix(self) -> &'static str {
        match self {
            Self::Form => "core.entity_form_display",
            Self::View => "core.entity_view_display",
        }
    }
}

impl fmt::Display for DisplayContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayContext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "form" => Ok(Self::Form),
            "view" => Ok(Self::View),
            other => Err(Error::InvalidDisplayMode {
                value: other.to_string(),
            }),
        }
    }
}

/// A display selector such as `form.default` or `view.teaser`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayMode {
    pub context: DisplayContext,
    pub mode: String,
}

impl DisplayMode {
    pub fn new(context: DisplayContext, mode: impl Into<String>) -> Self {
        Self {
            context,
            mode: mode.into(),
        }
    }

    pub fn form(mode: impl Into<String>) -> Self {
        Self::new(DisplayContext::Form, mode)
    }

    pub fn view(mode: impl Into<String>) -> Self {
        Self::new(DisplayContext::View, mode)
    }
}

impl FromStr for DisplayMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidDisplayMode {
            value: s.to_string(),
        };
        let (context, mode) = s.split_once('.').ok_or_else(invalid)?;
        if mode.is_empty() || mode.contains('.') {
            return Err(invalid());
        }
        let context = context.parse().map_err(|_| invalid())?;
        Ok(Self::new(context, mode))
    }
}

impl TryFrom<String> for DisplayMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<DisplayMode> for String {
    fn from(value: DisplayMode) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.context, self.mode)
    }
}

/// Identity of one display: `entity_type.bundle.mode` within a context.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DisplayId {
    pub entity_type: String,
    pub bundle: String,
    pub mode: String,
    pub context: DisplayContext,
}

impl DisplayId {
    pub fn new(
        entity_type: impl Into<String>,
        bundle: impl Into<String>,
        mode: impl Into<String>,
        context: DisplayContext,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
            mode: mode.into(),
            context,
        }
    }

    /// The storage key, `{entity_type}.{bundle}.{mode}`.
    pub fn key(&self) -> String {
        format!("{}.{}.{}", self.entity_type, self.bundle, self.mode)
    }

    /// The same display slot on another bundle.
    pub fn with_bundle(&self, bundle: impl Into<String>) -> Self {
        Self {
            bundle: bundle.into(),
            ..self.clone()
        }
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::new(self.context, self.mode.clone())
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.entity_type, self.bundle, self.mode)
    }
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Per-field configuration entry of a display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Widget or formatter plugin id
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub weight: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default = "empty_object")]
    pub settings: Value,
    #[serde(default = "empty_object")]
    pub third_party_settings: Value,
}

impl Component {
    pub fn new(kind: impl Into<String>, weight: i64) -> Self {
        Self {
            kind: Some(kind.into()),
            label: None,
            weight,
            region: Some("content".to_string()),
            settings: empty_object(),
            third_party_settings: empty_object(),
        }
    }

    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_third_party_settings(mut self, settings: Value) -> Self {
        self.third_party_settings = settings;
        self
    }

    /// The entry a target display receives for a synced field: plugin, weight
    /// and both settings blobs from `source`, placed in the content region.
    /// Anything else the target had configured is dropped.
    pub fn synced_from(source: &Component) -> Self {
        Self {
            kind: source.kind.clone(),
            label: None,
            weight: source.weight,
            region: Some("content".to_string()),
            settings: source.settings.clone(),
            third_party_settings: source.third_party_settings.clone(),
        }
    }
}

/// Settings other modules attach to a display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThirdPartySettings {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub field_group: BTreeMap<String, GroupSettings>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl ThirdPartySettings {
    pub fn is_empty(&self) -> bool {
        self.field_group.is_empty() && self.other.is_empty()
    }
}

/// A persisted form or view display.
///
/// Mirrors the exported configuration shape: components under `content`,
/// removed components under `hidden`, field groups under
/// `third_party_settings.field_group`. Keys this type does not model are kept
/// in `extra` so a load/save cycle does not lose them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    /// Not part of the stored document; set by whoever loads the display.
    #[serde(skip)]
    pub context: DisplayContext,
    pub id: String,
    #[serde(rename = "targetEntityType")]
    pub entity_type: String,
    pub bundle: String,
    pub mode: String,
    #[serde(default)]
    pub content: BTreeMap<String, Component>,
    #[serde(default)]
    pub hidden: BTreeMap<String, bool>,
    #[serde(default, skip_serializing_if = "ThirdPartySettings::is_empty")]
    pub third_party_settings: ThirdPartySettings,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Display {
    /// An empty display for `id`.
    pub fn new(id: &DisplayId) -> Self {
        Self {
            context: id.context,
            id: id.key(),
            entity_type: id.entity_type.clone(),
            bundle: id.bundle.clone(),
            mode: id.mode.clone(),
            content: BTreeMap::new(),
            hidden: BTreeMap::new(),
            third_party_settings: ThirdPartySettings::default(),
            extra: BTreeMap::new(),
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

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.content.get(name)
    }

    /// Place `name` in the content region with `component`.
    pub fn set_component(&mut self, name: impl Into<String>, component: Component) {
        let name = name.into();
        self.hidden.remove(&name);
        self.content.insert(name, component);
    }

    /// Take `name` out of the content region and list it as hidden.
    pub fn remove_component(&mut self, name: &str) -> Option<Component> {
        let removed = self.content.remove(name);
        self.hidden.insert(name.to_string(), true);
        removed
    }

    pub fn field_groups(&self) -> &BTreeMap<String, GroupSettings> {
        &self.third_party_settings.field_group
    }

    pub fn field_groups_mut(&mut self) -> &mut BTreeMap<String, GroupSettings> {
        &mut self.third_party_settings.field_group
    }

    pub fn with_component(mut self, name: impl Into<String>, component: Component) -> Self {
        self.set_component(name, component);
        self
    }

    pub fn with_group(mut self, name: impl Into<String>, group: GroupSettings) -> Self {
        self.field_groups_mut().insert(name.into(), group);
        self
    }
}
