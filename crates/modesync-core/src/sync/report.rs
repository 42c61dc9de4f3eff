//! Events and reports produced by a sync run

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::DisplayId;

/// One thing a reconciler did, or would do in a dry run.
///
/// `changed` separates real writes from no-op passes over configuration that
/// already matched the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SyncEvent {
    GroupCreated {
        group: String,
        bundle: String,
    },
    GroupUpdated {
        group: String,
        bundle: String,
        changed: bool,
    },
    GroupDisabled {
        group: String,
        bundle: String,
        changed: bool,
    },
    FieldUpdated {
        field: String,
        display: String,
        changed: bool,
    },
    /// The source configures a field the target bundle does not define.
    FieldMissing {
        field: String,
        display: String,
    },
    FieldRemoved {
        field: String,
        display: String,
    },
}

impl SyncEvent {
    /// Whether the event altered (or would alter) stored configuration.
    pub fn is_change(&self) -> bool {
        match self {
            Self::GroupCreated { .. } | Self::FieldRemoved { .. } => true,
            Self::GroupUpdated { changed, .. }
            | Self::GroupDisabled { changed, .. }
            | Self::FieldUpdated { changed, .. } => *changed,
            Self::FieldMissing { .. } => false,
        }
    }
}

impl fmt::Display for SyncEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GroupCreated { group, bundle } => {
                write!(f, "Created field group {} on {}.", group, bundle)
            }
            Self::GroupUpdated { group, bundle, .. } => {
                write!(f, "Updated field group {} on {}.", group, bundle)
            }
            Self::GroupDisabled {
                group,
                bundle,
                changed: true,
            } => write!(f, "Disabled field group {} on {}.", group, bundle),
            Self::GroupDisabled { group, bundle, .. } => {
                write!(f, "Field group {} on {} is already hidden.", group, bundle)
            }
            Self::FieldUpdated { field, display, .. } => {
                write!(f, "Field {} updated in {}", field, display)
            }
            Self::FieldMissing { field, display } => {
                write!(f, "{} does not exist in {}", field, display)
            }
            Self::FieldRemoved { field, display } => {
                write!(f, "Field {} removed from {}", field, display)
            }
        }
    }
}

/// Outcome for one target bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetStatus {
    Synced,
    /// No display exists for the target bundle.
    NotFound,
    /// Processing stopped at an error; earlier writes were kept.
    Failed,
}

/// What happened to one target display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetReport {
    pub bundle: String,
    pub display: String,
    pub status: TargetStatus,
    pub events: Vec<SyncEvent>,
    pub error: Option<String>,
}

impl TargetReport {
    pub fn new(bundle: impl Into<String>, display: &DisplayId) -> Self {
        Self {
            bundle: bundle.into(),
            display: display.key(),
            status: TargetStatus::Synced,
            events: Vec::new(),
            error: None,
        }
    }

    pub fn mark_not_found(&mut self, error: impl Into<String>) {
        self.status = TargetStatus::NotFound;
        self.error = Some(error.into());
    }

    pub fn mark_failed(&mut self, error: impl Into<String>) {
        self.status = TargetStatus::Failed;
        self.error = Some(error.into());
    }

    pub fn is_synced(&self) -> bool {
        self.status == TargetStatus::Synced
    }

    pub fn changes(&self) -> impl Iterator<Item = &SyncEvent> {
        self.events.iter().filter(|event| event.is_change())
    }
}

/// Report for a whole sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// True only when every target synced
    pub success: bool,
    pub source: String,
    pub dry_run: bool,
    pub targets: Vec<TargetReport>,
    /// Operation-level failures (a missing source display)
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn new(source: &DisplayId, dry_run: bool) -> Self {
        Self {
            success: true,
            source: source.key(),
            dry_run,
            targets: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Report for a run that stopped before any target was touched.
    pub fn failure(source: &DisplayId, dry_run: bool, error: impl Into<String>) -> Self {
        Self {
            success: false,
            source: source.key(),
            dry_run,
            targets: Vec::new(),
            errors: vec![error.into()],
        }
    }

    pub fn push_target(&mut self, target: TargetReport) {
        if !target.is_synced() {
            self.success = false;
        }
        self.targets.push(target);
    }

    pub fn events(&self) -> impl Iterator<Item = &SyncEvent> {
        self.targets.iter().flat_map(|target| target.events.iter())
    }

    pub fn change_count(&self) -> usize {
        self.targets.iter().map(|target| target.changes().count()).sum()
    }

    pub fn target(&self, bundle: &str) -> Option<&TargetReport> {
        self.targets.iter().find(|target| target.bundle == bundle)
    }

    /// One-line closing message.
    pub fn summary(&self) -> String {
        if let Some(error) = self.errors.first() {
            return format!("{}.", error.trim_end_matches('.'));
        }
        let total = self.targets.len();
        let synced = self.targets.iter().filter(|t| t.is_synced()).count();
        if self.success {
            let verb = if self.dry_run { "Checked" } else { "Synchronized" };
            format!(
                "{} {} target display(s) from {}. Export the configuration after reviewing the changes.",
                verb, total, self.source
            )
        } else {
            format!(
                "{} of {} target display(s) synchronized from {}; {} failed.",
                synced,
                total,
                self.source,
                total - synced
            )
        }
    }
}
