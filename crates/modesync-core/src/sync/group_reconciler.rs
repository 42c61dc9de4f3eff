//! Field-group reconciliation
//!
//! Brings the field groups of one target display in line with the source:
//! missing groups are created, shared groups take the source layout, and
//! groups the source no longer defines are moved to the hidden region.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Display, FieldGroup, GroupSettings, Region};
use crate::store::FieldGroupStore;
use crate::{Error, Result};

use super::report::SyncEvent;
use super::request::SyncRequest;

/// Reconciles field groups for one sync request.
pub struct GroupReconciler<'r> {
    request: &'r SyncRequest,
    dry_run: bool,
}

impl<'r> GroupReconciler<'r> {
    pub fn new(request: &'r SyncRequest, dry_run: bool) -> Self {
        Self { request, dry_run }
    }

    /// Reconcile `target` against `source_groups`, persisting each group as it
    /// is handled. Events are appended to `events` as work completes, so a
    /// failure part-way leaves the earlier events in place.
    pub fn reconcile<S: FieldGroupStore + ?Sized>(
        &self,
        store: &mut S,
        target: &Display,
        source_groups: &BTreeMap<String, GroupSettings>,
        events: &mut Vec<SyncEvent>,
    ) -> Result<()> {
        let target_id = target.display_id();
        let source_id = self.request.source_id();
        let target_groups = target.field_groups();
        let mut to_disable: BTreeSet<&str> = target_groups.keys().map(String::as_str).collect();

        for (name, source_settings) in source_groups {
            if !target_groups.contains_key(name) {
                let group = FieldGroup::builder(name.as_str())
                    .display(&target_id)
                    .layout_from(source_settings)
                    .region(Region::Content)
                    .build()?;
                self.save(store, &group)?;
                tracing::info!(group = %name, bundle = %target.bundle, "created field group");
                events.push(SyncEvent::GroupCreated {
                    group: name.clone(),
                    bundle: target.bundle.clone(),
                });
            } else {
                let mut target_group = store.load_group(name, &target_id)?.ok_or_else(|| {
                    Error::GroupNotFound {
                        group: name.clone(),
                        display: target_id.key(),
                    }
                })?;
                let source_group = store.load_group(name, &source_id)?.ok_or_else(|| {
                    Error::GroupNotFound {
                        group: name.clone(),
                        display: source_id.key(),
                    }
                })?;

                let changed = !target_group.same_layout(&source_group);
                if changed {
                    target_group.copy_layout_from(&source_group);
                    self.save(store, &target_group)?;
                    tracing::info!(group = %name, bundle = %target.bundle, "updated field group");
                } else {
                    tracing::debug!(group = %name, bundle = %target.bundle, "field group already matches source");
                }
                events.push(SyncEvent::GroupUpdated {
                    group: name.clone(),
                    bundle: target.bundle.clone(),
                    changed,
                });
            }
            to_disable.remove(name.as_str());
        }

        for name in to_disable {
            let mut group = store.load_group(name, &target_id)?.ok_or_else(|| {
                Error::GroupNotFound {
                    group: name.to_string(),
                    display: target_id.key(),
                }
            })?;
            let changed = group.region != Region::Hidden;
            if changed {
                group.region = Region::Hidden;
                self.save(store, &group)?;
                tracing::info!(group = %name, bundle = %target.bundle, "disabled field group");
            }
            events.push(SyncEvent::GroupDisabled {
                group: name.to_string(),
                bundle: target.bundle.clone(),
                changed,
            });
        }

        Ok(())
    }

    fn save<S: FieldGroupStore + ?Sized>(&self, store: &mut S, group: &FieldGroup) -> Result<()> {
        if self.dry_run {
            return Ok(());
        }
        store.save_group(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayContext, DisplayId, DisplayMode};
    use crate::store::{DisplayStore, MemoryStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn request() -> SyncRequest {
        SyncRequest::new("commerce_product", "default", DisplayMode::form("default"))
            .with_targets(["food"])
    }

    fn id(bundle: &str) -> DisplayId {
        DisplayId::new("commerce_product", bundle, "default", DisplayContext::Form)
    }

    fn main_group() -> GroupSettings {
        GroupSettings::new("Main", "tabs")
            .with_children(["field_a"])
            .with_format_settings(json!({"direction": "vertical"}))
    }

    fn run(store: &mut MemoryStore, dry_run: bool) -> Vec<SyncEvent> {
        let request = request();
        let source = store.load_display(&id("default")).unwrap().unwrap();
        let target = store.load_display(&id("food")).unwrap().unwrap();
        let mut events = Vec::new();
        GroupReconciler::new(&request, dry_run)
            .reconcile(store, &target, source.field_groups(), &mut events)
            .unwrap();
        events
    }

    #[test]
    fn creates_missing_group_in_content_region() {
        let mut store = MemoryStore::new()
            .with_display(Display::new(&id("default")).with_group("group_main", main_group().with_region(Region::Hidden)))
            .with_display(Display::new(&id("food")));

        let events = run(&mut store, false);

        assert_eq!(
            events,
            vec![SyncEvent::GroupCreated {
                group: "group_main".into(),
                bundle: "food".into()
            }]
        );
        let created = store.load_group("group_main", &id("food")).unwrap().unwrap();
        assert_eq!(created.region, Region::Content);
        assert_eq!(created.children, vec!["field_a"]);
        assert_eq!(created.bundle, "food");
    }

    #[test]
    fn update_copies_layout_but_not_region() {
        let target_group = main_group()
            .with_weight(7)
            .with_region(Region::Hidden);
        let mut store = MemoryStore::new()
            .with_display(Display::new(&id("default")).with_group("group_main", main_group()))
            .with_display(Display::new(&id("food")).with_group("group_main", target_group));

        let events = run(&mut store, false);

        assert_eq!(
            events,
            vec![SyncEvent::GroupUpdated {
                group: "group_main".into(),
                bundle: "food".into(),
                changed: true
            }]
        );
        let updated = store.load_group("group_main", &id("food")).unwrap().unwrap();
        assert_eq!(updated.weight, 0);
        assert_eq!(updated.region, Region::Hidden);
    }

    #[test]
    fn equal_group_is_reported_without_write() {
        let mut store = MemoryStore::new()
            .with_display(Display::new(&id("default")).with_group("group_main", main_group()))
            .with_display(Display::new(&id("food")).with_group("group_main", main_group()));

        let events = run(&mut store, false);

        assert_eq!(
            events,
            vec![SyncEvent::GroupUpdated {
                group: "group_main".into(),
                bundle: "food".into(),
                changed: false
            }]
        );
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn extra_target_group_is_hidden_not_deleted() {
        let mut store = MemoryStore::new()
            .with_display(Display::new(&id("default")))
            .with_display(Display::new(&id("food")).with_group("group_extra", main_group()));

        let events = run(&mut store, false);

        assert_eq!(
            events,
            vec![SyncEvent::GroupDisabled {
                group: "group_extra".into(),
                bundle: "food".into(),
                changed: true
            }]
        );
        let extra = store.load_group("group_extra", &id("food")).unwrap().unwrap();
        assert_eq!(extra.region, Region::Hidden);
    }

    #[test]
    fn dry_run_reports_without_writing() {
        let mut store = MemoryStore::new()
            .with_display(Display::new(&id("default")).with_group("group_main", main_group()))
            .with_display(Display::new(&id("food")).with_group("group_extra", main_group()));
        let before = store.clone();

        let events = run(&mut store, true);

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(SyncEvent::is_change));
        assert_eq!(store.write_count(), 0);
        assert_eq!(store.display(&id("food")), before.display(&id("food")));
    }

    #[test]
    fn nested_group_references_are_copied_verbatim() {
        let inner = main_group().with_parent("group_missing_parent");
        let mut store = MemoryStore::new()
            .with_display(Display::new(&id("default")).with_group("group_inner", inner))
            .with_display(Display::new(&id("food")));

        run(&mut store, false);

        let created = store.load_group("group_inner", &id("food")).unwrap().unwrap();
        assert_eq!(created.parent_name.as_deref(), Some("group_missing_parent"));
    }
}
