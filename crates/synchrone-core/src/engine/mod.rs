//! ReconciliationEngine implementation
//!
//! The engine executes one [`UpdatePolicy`] per run against a
//! [`ResourceLayout`]. Each run accumulates its own statistics and log; the
//! log is persisted under the run's backup directory, together with a
//! manifest of everything that was backed up.

mod components;
mod full;
mod primitives;
mod targeted;

pub use components::{Correspondence, find_correspondences};

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::backup::{BackupRecord, BackupVault};
use crate::{Error, OperationLog, PolicyKind, ResourceLayout, Result, RunStamp, Statistics, UpdatePolicy};
use primitives::Run;

/// Outcome of one reconciliation run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub policy: PolicyKind,
    pub stamp: RunStamp,
    pub stats: Statistics,
    /// Directories created (not counted in [`Statistics`])
    pub directories_created: usize,
    pub log: OperationLog,
    pub backups: Vec<BackupRecord>,
    /// Where the operation log was written, if anything was logged
    pub log_file: Option<PathBuf>,
    /// Why the log or manifest could not be written
    pub persist_error: Option<String>,
}

impl RunReport {
    /// Items added or replaced plus directories created.
    pub fn operation_count(&self) -> usize {
        self.stats.added + self.stats.replaced + self.directories_created
    }
}

/// Executes update policies for one project.
///
/// All runs of one engine share its [`RunStamp`], so the policies of one
/// install session back up into the same directory, each below its own
/// [`PolicyKind::slug`]. The operation log and manifest are shared.
pub struct ReconciliationEngine {
    layout: ResourceLayout,
    vault: BackupVault,
}

impl ReconciliationEngine {
    pub fn new(layout: ResourceLayout, stamp: RunStamp) -> Self {
        let vault = BackupVault::new(layout.backup_dir.clone(), stamp, layout.dir_mode);
        Self { layout, vault }
    }

    pub fn layout(&self) -> &ResourceLayout {
        &self.layout
    }

    pub fn vault(&self) -> &BackupVault {
        &self.vault
    }

    pub fn stamp(&self) -> &RunStamp {
        self.vault.stamp()
    }

    /// Tree a policy merges from.
    pub fn source_root(&self, kind: PolicyKind) -> &Path {
        match kind {
            PolicyKind::FullMerge | PolicyKind::TargetedMerge => &self.layout.vendor_dir,
            PolicyKind::NewComponentMerge => &self.layout.new_components_dir,
        }
    }

    /// Execute `policy` as one run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceMissing`] if the policy's source tree does not
    /// exist; nothing is touched in that case. Failures of individual items
    /// never abort the run and are reported through [`RunReport::stats`].
    pub fn run(&self, policy: &UpdatePolicy) -> Result<RunReport> {
        let kind = policy.kind();
        let source = self.source_root(kind);
        if !source.is_dir() {
            return Err(Error::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        tracing::info!(policy = %kind, stamp = %self.stamp(), "Starting run");
        let vault = self.vault.scoped(kind.slug());
        let mut run = Run::new(&self.layout, &vault);
        match policy {
            UpdatePolicy::FullMerge { directories } => full::merge(&mut run, directories),
            UpdatePolicy::TargetedMerge { roots, tree } => targeted::merge(&mut run, roots, tree),
            UpdatePolicy::NewComponentMerge { directories } => {
                components::merge(&mut run, directories)
            }
        }

        let Run {
            stats,
            log,
            backups,
            directories_created,
            ..
        } = run;

        let mut report = RunReport {
            policy: kind,
            stamp: self.stamp().clone(),
            stats,
            directories_created,
            log,
            backups,
            log_file: None,
            persist_error: None,
        };
        self.persist(&mut report);

        tracing::info!(
            policy = %kind,
            added = report.stats.added,
            replaced = report.stats.replaced,
            failed = report.stats.failed,
            "Run finished"
        );
        Ok(report)
    }

    /// Write the log and manifest. Failure here never undoes the run.
    fn persist(&self, report: &mut RunReport) {
        if !report.backups.is_empty()
            && let Err(e) = self.vault.write_manifest(&report.backups)
        {
            tracing::warn!(error = %e, "Failed to write backup manifest");
            report.persist_error = Some(e.to_string());
        }

        if report.log.is_empty() {
            return;
        }
        match self.vault.append_log(&report.log.render()) {
            Ok(path) => report.log_file = Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save operation log");
                report.persist_error = Some(e.to_string());
            }
        }
    }
}
