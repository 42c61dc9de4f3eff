//! Drift check types
//!
//! A check is a dry-run sync whose events are classified into what would
//! change on each target.

use serde::{Deserialize, Serialize};

use super::report::{SyncReport, TargetStatus};

/// Overall result of a drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Every target already matches the source
    Healthy,
    /// Some target displays do not exist
    Missing,
    /// Some targets differ from the source
    Drifted,
    /// The source display is missing or a target could not be read
    Broken,
}

/// A pending change or a missing display on one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftItem {
    pub bundle: String,
    pub display: String,
    pub description: String,
}

/// Result of a drift check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub status: CheckStatus,
    pub drifted: Vec<DriftItem>,
    pub missing: Vec<DriftItem>,
    /// Informational notes and errors
    pub messages: Vec<String>,
}

impl CheckReport {
    pub fn healthy() -> Self {
        Self {
            status: CheckStatus::Healthy,
            drifted: Vec::new(),
            missing: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn broken(message: String) -> Self {
        Self {
            status: CheckStatus::Broken,
            drifted: Vec::new(),
            missing: Vec::new(),
            messages: vec![message],
        }
    }

    /// Classify the events of a dry-run sync.
    pub fn from_dry_run(report: &SyncReport) -> Self {
        if !report.errors.is_empty() {
            let mut broken = Self::broken(report.errors[0].clone());
            broken.messages.extend(report.errors.iter().skip(1).cloned());
            return broken;
        }

        let mut check = Self::healthy();
        let mut failed = false;
        for target in &report.targets {
            match target.status {
                TargetStatus::NotFound => check.missing.push(DriftItem {
                    bundle: target.bundle.clone(),
                    display: target.display.clone(),
                    description: target
                        .error
                        .clone()
                        .unwrap_or_else(|| "Display not found".to_string()),
                }),
                TargetStatus::Failed => {
                    failed = true;
                    check.messages.push(format!(
                        "{}: {}",
                        target.bundle,
                        target.error.as_deref().unwrap_or("failed")
                    ));
                }
                TargetStatus::Synced => {}
            }

            for event in &target.events {
                if event.is_change() {
                    check.drifted.push(DriftItem {
                        bundle: target.bundle.clone(),
                        display: target.display.clone(),
                        description: event.to_string(),
                    });
                } else if matches!(event, super::SyncEvent::FieldMissing { .. }) {
                    check.messages.push(event.to_string());
                }
            }
        }

        check.status = if failed {
            CheckStatus::Broken
        } else if !check.drifted.is_empty() {
            CheckStatus::Drifted
        } else if !check.missing.is_empty() {
            CheckStatus::Missing
        } else {
            CheckStatus::Healthy
        };
        check
    }

    pub fn is_healthy(&self) -> bool {
        self.status == CheckStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DisplayContext, DisplayId};
    use crate::sync::{SyncEvent, TargetReport};

    fn source() -> DisplayId {
        DisplayId::new("node", "article", "default", DisplayContext::Form)
    }

    fn target(bundle: &str, events: Vec<SyncEvent>) -> TargetReport {
        let mut report = TargetReport::new(bundle, &source().with_bundle(bundle));
        report.events = events;
        report
    }

    #[test]
    fn no_op_events_are_healthy() {
        let mut report = SyncReport::new(&source(), true);
        report.push_target(target(
            "page",
            vec![SyncEvent::GroupUpdated {
                group: "group_main".into(),
                bundle: "page".into(),
                changed: false,
            }],
        ));

        let check = CheckReport::from_dry_run(&report);
        assert_eq!(check.status, CheckStatus::Healthy);
        assert!(check.drifted.is_empty());
    }

    #[test]
    fn changes_become_drift_items() {
        let mut report = SyncReport::new(&source(), true);
        report.push_target(target(
            "page",
            vec![SyncEvent::FieldRemoved {
                field: "field_old".into(),
                display: "node.page.default".into(),
            }],
        ));

        let check = CheckReport::from_dry_run(&report);
        assert_eq!(check.status, CheckStatus::Drifted);
        assert_eq!(check.drifted[0].bundle, "page");
        assert!(check.drifted[0].description.contains("field_old"));
    }

    #[test]
    fn missing_target_is_reported_as_missing() {
        let mut report = SyncReport::new(&source(), true);
        let mut missing = target("blog", Vec::new());
        missing.mark_not_found("Target display node.blog.default failed to load");
        report.push_target(missing);

        let check = CheckReport::from_dry_run(&report);
        assert_eq!(check.status, CheckStatus::Missing);
        assert_eq!(check.missing.len(), 1);
    }

    #[test]
    fn missing_source_is_broken() {
        let report = SyncReport::failure(&source(), true, "Source display node.article.default failed to load");
        let check = CheckReport::from_dry_run(&report);
        assert_eq!(check.status, CheckStatus::Broken);
        assert_eq!(check.messages.len(), 1);
    }
}
