//! Field component reconciliation

use std::collections::{BTreeMap, BTreeSet};

use crate::Result;
use crate::model::{Component, Display};
use crate::store::{DisplayStore, FieldSchemaStore};

use super::report::SyncEvent;
use super::request::SyncRequest;

/// Reconciles the field components of target displays for one sync request.
pub struct FieldReconciler<'r> {
    request: &'r SyncRequest,
    dry_run: bool,
}

impl<'r> FieldReconciler<'r> {
    pub fn new(request: &'r SyncRequest, dry_run: bool) -> Self {
        Self { request, dry_run }
    }

    /// Copy the source components onto `target` and save it once.
    ///
    /// Names that neither bundle defines as a field (base fields, extra
    /// fields) are never added or removed. Fields the target bundle lacks are
    /// reported and left alone.
    pub fn reconcile<S: DisplayStore + FieldSchemaStore + ?Sized>(
        &self,
        store: &mut S,
        target: &mut Display,
        source_components: &BTreeMap<String, Component>,
        events: &mut Vec<SyncEvent>,
    ) -> Result<()> {
        let display_key = target.display_id().key();
        let target_bundle = target.bundle.clone();
        let mut to_disable: BTreeSet<String> = target.content.keys().cloned().collect();

        for (field_name, source_component) in source_components {
            let target_field = store.load_field(&self.request.entity_type, &target_bundle, field_name)?;
            let source_field =
                store.load_field(&self.request.entity_type, &self.request.source_bundle, field_name)?;

            match (target_field, source_field) {
                (None, None) => {
                    tracing::debug!(field = %field_name, "not a configurable field, leaving it alone");
                }
                (None, Some(_)) => {
                    tracing::info!(field = %field_name, display = %display_key, "field does not exist on target bundle");
                    events.push(SyncEvent::FieldMissing {
                        field: field_name.clone(),
                        display: display_key.clone(),
                    });
                }
                _ => {
                    let update = Component::synced_from(source_component);
                    let changed = target.component(field_name) != Some(&update)
                        || target.hidden.contains_key(field_name);
                    target.set_component(field_name.clone(), update);
                    events.push(SyncEvent::FieldUpdated {
                        field: field_name.clone(),
                        display: display_key.clone(),
                        changed,
                    });
                }
            }
            to_disable.remove(field_name);
        }

        for field_name in to_disable {
            if self.is_unmanaged(&*store, &target_bundle, &field_name)? {
                continue;
            }
            target.remove_component(&field_name);
            tracing::info!(field = %field_name, display = %display_key, "removed field from display");
            events.push(SyncEvent::FieldRemoved {
                field: field_name,
                display: display_key.clone(),
            });
        }

        if !self.dry_run {
            store.save_display(target)?;
        }
        Ok(())
    }

    /// Neither bundle defines `field_name` as a field.
    fn is_unmanaged<S: FieldSchemaStore + ?Sized>(
        &self,
        store: &S,
        target_bundle: &str,
        field_name: &str,
    ) -> Result<bool> {
        let entity_type = &self.request.entity_type;
        Ok(store.load_field(entity_type, target_bundle, field_name)?.is_none()
            && store
                .load_field(entity_type, &self.request.source_bundle, field_name)?
                .is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayContext, DisplayId, DisplayMode};
    use crate::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const ENTITY: &str = "node";

    fn request() -> SyncRequest {
        SyncRequest::new(ENTITY, "article", DisplayMode::form("default")).with_targets(["page"])
    }

    fn id(bundle: &str) -> DisplayId {
        DisplayId::new(ENTITY, bundle, "default", DisplayContext::Form)
    }

    fn run(store: &mut MemoryStore, source: &Display, dry_run: bool) -> Vec<SyncEvent> {
        let request = request();
        let mut target = store.load_display(&id("page")).unwrap().unwrap();
        let mut events = Vec::new();
        FieldReconciler::new(&request, dry_run)
            .reconcile(store, &mut target, &source.content, &mut events)
            .unwrap();
        events
    }

    fn stored_target(store: &MemoryStore) -> Display {
        store.display(&id("page")).unwrap().clone()
    }

    #[test]
    fn shared_field_takes_source_widget() {
        let source = Display::new(&id("article")).with_component(
            "field_a",
            Component::new("text_default", 0).with_settings(json!({"size": 60})),
        );
        let mut store = MemoryStore::new()
            .with_field(ENTITY, &["article", "page"], "field_a")
            .with_display(
                Display::new(&id("page")).with_component("field_a", Component::new("string_textfield", 5)),
            );

        let events = run(&mut store, &source, false);

        assert_eq!(
            events,
            vec![SyncEvent::FieldUpdated {
                field: "field_a".into(),
                display: "node.page.default".into(),
                changed: true
            }]
        );
        let component = stored_target(&store).component("field_a").cloned().unwrap();
        assert_eq!(component.kind.as_deref(), Some("text_default"));
        assert_eq!(component.weight, 0);
        assert_eq!(component.settings, json!({"size": 60}));
    }

    #[test]
    fn field_missing_on_target_is_reported_not_created() {
        let source = Display::new(&id("article")).with_component("field_b", Component::new("text_default", 1));
        let mut store = MemoryStore::new()
            .with_field(ENTITY, &["article"], "field_b")
            .with_display(Display::new(&id("page")));

        let events = run(&mut store, &source, false);

        assert_eq!(
            events,
            vec![SyncEvent::FieldMissing {
                field: "field_b".into(),
                display: "node.page.default".into()
            }]
        );
        assert!(stored_target(&store).component("field_b").is_none());
    }

    #[test]
    fn unmanaged_names_are_neither_added_nor_removed() {
        let source = Display::new(&id("article")).with_component("title", Component::new("string_textfield", -5));
        let mut store = MemoryStore::new().with_display(
            Display::new(&id("page")).with_component("created", Component::new("datetime_timestamp", 10)),
        );
        let before = stored_target(&store);

        let events = run(&mut store, &source, false);

        assert!(events.is_empty());
        assert_eq!(stored_target(&store).content, before.content);
    }

    #[test]
    fn target_only_field_is_removed() {
        let source = Display::new(&id("article"));
        let mut store = MemoryStore::new()
            .with_field(ENTITY, &["page"], "field_legacy")
            .with_display(
                Display::new(&id("page")).with_component("field_legacy", Component::new("boolean_checkbox", 3)),
            );

        let events = run(&mut store, &source, false);

        assert_eq!(
            events,
            vec![SyncEvent::FieldRemoved {
                field: "field_legacy".into(),
                display: "node.page.default".into()
            }]
        );
        let target = stored_target(&store);
        assert!(target.component("field_legacy").is_none());
        assert_eq!(target.hidden.get("field_legacy"), Some(&true));
    }

    #[test]
    fn display_is_saved_once() {
        let source = Display::new(&id("article"))
            .with_component("field_a", Component::new("text_default", 0))
            .with_component("field_b", Component::new("text_default", 1));
        let mut store = MemoryStore::new()
            .with_field(ENTITY, &["article", "page"], "field_a")
            .with_field(ENTITY, &["article", "page"], "field_b")
            .with_display(Display::new(&id("page")));

        run(&mut store, &source, false);

        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn hidden_field_brought_back_counts_as_change() {
        let source = Display::new(&id("article")).with_component("field_a", Component::new("text_default", 0));
        let mut page = Display::new(&id("page"));
        page.remove_component("field_a");
        let mut store = MemoryStore::new()
            .with_field(ENTITY, &["article", "page"], "field_a")
            .with_display(page);

        let events = run(&mut store, &source, false);

        assert!(events[0].is_change());
        assert!(!stored_target(&store).hidden.contains_key("field_a"));
    }

    #[test]
    fn dry_run_does_not_save() {
        let source = Display::new(&id("article")).with_component("field_a", Component::new("text_default", 0));
        let mut store = MemoryStore::new()
            .with_field(ENTITY, &["article", "page"], "field_a")
            .with_display(Display::new(&id("page")));

        let events = run(&mut store, &source, true);

        assert_eq!(events.len(), 1);
        assert_eq!(store.write_count(), 0);
        assert!(stored_target(&store).component("field_a").is_none());
    }
}
