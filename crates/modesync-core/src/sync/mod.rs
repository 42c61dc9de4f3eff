//! Display synchronization
//!
//! A [`SyncRequest`] names a source display and a list of target bundles.
//! [`SyncEngine`] resolves the source once, then for each target runs the
//! [`GroupReconciler`] followed by the [`FieldReconciler`] and collects what
//! happened into a [`SyncReport`].
//!
//! ```no_run
//! use modesync_core::{DisplayMode, MemoryStore, SyncEngine, SyncRequest};
//!
//! let mut store = MemoryStore::new();
//! let request = SyncRequest::new("node", "article", DisplayMode::form("default"))
//!     .with_targets(["page", "blog"]);
//! let report = SyncEngine::new(&mut store).sync(&request)?;
//! println!("{}", report.summary());
//! # Ok::<(), modesync_core::Error>(())
//! ```

mod check;
mod engine;
mod field_reconciler;
mod group_reconciler;
mod report;
mod request;

pub use check::{CheckReport, CheckStatus, DriftItem};
pub use engine::{SyncEngine, SyncOptions};
pub use field_reconciler::FieldReconciler;
pub use group_reconciler::GroupReconciler;
pub use report::{SyncEvent, SyncReport, TargetReport, TargetStatus};
pub use request::SyncRequest;
