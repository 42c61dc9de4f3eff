//! Display, component, field-group and field-definition types

mod display;
mod field;
mod group;

pub use display::{Component, Display, DisplayContext, DisplayId, DisplayMode, ThirdPartySettings};
pub use field::FieldDefinition;
pub use group::{FieldGroup, FieldGroupBuilder, FormatType, GroupSettings, Region};
