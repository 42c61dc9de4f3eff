//! The parameters of one sync run

use serde::{Deserialize, Serialize};

use crate::model::{DisplayId, DisplayMode};

/// One source display and the bundles it should be copied onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub entity_type: String,
    pub source_bundle: String,
    pub display: DisplayMode,
    /// Target bundles in the order they are processed, without duplicates.
    pub targets: Vec<String>,
}

impl SyncRequest {
    pub fn new(
        entity_type: impl Into<String>,
        source_bundle: impl Into<String>,
        display: DisplayMode,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            source_bundle: source_bundle.into(),
            display,
            targets: Vec::new(),
        }
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for target in targets {
            self.add_target(target);
        }
        self
    }

    /// Append a target bundle; repeats are ignored.
    pub fn add_target(&mut self, bundle: impl Into<String>) {
        let bundle = bundle.into();
        if !self.targets.contains(&bundle) {
            self.targets.push(bundle);
        }
    }

    pub fn source_id(&self) -> DisplayId {
        self.target_id(&self.source_bundle)
    }

    pub fn target_id(&self, bundle: &str) -> DisplayId {
        DisplayId::new(
            self.entity_type.clone(),
            bundle,
            self.display.mode.clone(),
            self.display.context,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DisplayContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn targets_keep_order_and_drop_repeats() {
        let request = SyncRequest::new("node", "article", DisplayMode::form("default"))
            .with_targets(["page", "blog", "page", "event"]);
        assert_eq!(request.targets, vec!["page", "blog", "event"]);
    }

    #[test]
    fn ids_share_entity_mode_and_context() {
        let request = SyncRequest::new("node", "article", DisplayMode::view("teaser"));
        assert_eq!(
            request.source_id(),
            DisplayId::new("node", "article", "teaser", DisplayContext::View)
        );
        assert_eq!(
            request.target_id("page"),
            DisplayId::new("node", "page", "teaser", DisplayContext::View)
        );
    }
}
