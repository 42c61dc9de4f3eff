//! Sync orchestration

use crate::loader::DisplayLoader;
use crate::model::Display;
use crate::notify::{NotificationSink, TracingSink};
use crate::store::ConfigStorage;
use crate::{Error, Result};

use super::check::CheckReport;
use super::field_reconciler::FieldReconciler;
use super::group_reconciler::GroupReconciler;
use super::report::{SyncReport, TargetReport};
use super::request::SyncRequest;

/// Options for a sync run
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Compute events without writing anything or notifying the sink
    pub dry_run: bool,
}

/// Runs sync requests against a store.
///
/// Targets are processed in request order and independently: a failing
/// target is recorded in the report and the run moves on. Writes already
/// made for a failing target are not rolled back.
pub struct SyncEngine<'a> {
    store: &'a mut dyn ConfigStorage,
    sink: Box<dyn NotificationSink + 'a>,
    options: SyncOptions,
}

impl<'a> SyncEngine<'a> {
    pub fn new(store: &'a mut dyn ConfigStorage) -> Self {
        Self {
            store,
            sink: Box::new(TracingSink),
            options: SyncOptions::default(),
        }
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'a) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> SyncOptions {
        self.options
    }

    /// Copy the source display's groups and components onto every target.
    ///
    /// A missing source display yields an unsuccessful report, not an error.
    /// `Err` is returned only when the source itself could not be read.
    pub fn sync(&mut self, request: &SyncRequest) -> Result<SyncReport> {
        let dry_run = self.options.dry_run;
        let source_id = request.source_id();

        let Some(source) = DisplayLoader::new(&*self.store).resolve_id(&source_id)? else {
            let error = Error::SourceNotFound {
                id: source_id.key(),
            };
            tracing::warn!(display = %source_id, "{}", error);
            return Ok(SyncReport::failure(&source_id, dry_run, error.to_string()));
        };

        let mut report = SyncReport::new(&source_id, dry_run);
        for bundle in &request.targets {
            let target = self.sync_target(request, &source, bundle);
            if !dry_run {
                self.notify(&target);
            }
            report.push_target(target);
        }

        tracing::info!(
            source = %source_id,
            targets = report.targets.len(),
            changes = report.change_count(),
            dry_run,
            "{}",
            report.summary()
        );
        Ok(report)
    }

    /// Report what a sync would change without touching the store.
    pub fn check(&mut self, request: &SyncRequest) -> Result<CheckReport> {
        let saved = self.options;
        self.options.dry_run = true;
        let report = self.sync(request);
        self.options = saved;
        Ok(CheckReport::from_dry_run(&report?))
    }

    fn sync_target(&mut self, request: &SyncRequest, source: &Display, bundle: &str) -> TargetReport {
        let target_id = request.target_id(bundle);
        let mut target = TargetReport::new(bundle, &target_id);

        if bundle == request.source_bundle {
            target.mark_failed(format!(
                "Target bundle {} is the source bundle",
                bundle
            ));
            tracing::warn!(bundle = %bundle, "skipping target equal to source");
            return target;
        }

        let _span = tracing::debug_span!("sync_target", display = %target_id).entered();
        match self.reconcile_target(request, source, &mut target) {
            Ok(()) => {}
            Err(error @ Error::TargetNotFound { .. }) => {
                tracing::warn!(display = %target_id, "{}", error);
                target.mark_not_found(error.to_string());
            }
            Err(error) => {
                tracing::warn!(display = %target_id, error = %error, "target sync failed");
                target.mark_failed(error.to_string());
            }
        }
        target
    }

    fn reconcile_target(
        &mut self,
        request: &SyncRequest,
        source: &Display,
        report: &mut TargetReport,
    ) -> Result<()> {
        let dry_run = self.options.dry_run;
        let target_id = request.target_id(&report.bundle);
        let not_found = || Error::TargetNotFound {
            id: target_id.key(),
        };

        let target = DisplayLoader::new(&*self.store)
            .resolve_id(&target_id)?
            .ok_or_else(not_found)?;
        GroupReconciler::new(request, dry_run).reconcile(
            &mut *self.store,
            &target,
            source.field_groups(),
            &mut report.events,
        )?;

        // Group writes went through the store; reload so the field pass
        // saves on top of them.
        let mut target = DisplayLoader::new(&*self.store)
            .resolve_id(&target_id)?
            .ok_or_else(not_found)?;
        FieldReconciler::new(request, dry_run).reconcile(
            &mut *self.store,
            &mut target,
            &source.content,
            &mut report.events,
        )
    }

    fn notify(&mut self, target: &TargetReport) {
        for event in &target.events {
            if let Err(error) = self.sink.notify(event) {
                tracing::warn!(error = %error, "notification sink failed");
            }
        }
    }
}
