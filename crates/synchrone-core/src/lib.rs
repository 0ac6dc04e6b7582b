//! Reconciliation engine for synchrone
//!
//! Merges the framework's vendored resource trees into a consuming project
//! without silently destroying local edits:
//!
//! - **Policies**: full merge, targeted merge driven by the update document,
//!   and new-component merge
//! - **Backups**: every overwritten item is copied to a timestamped run
//!   directory first, with a manifest and the run's operation log
//! - **Bookkeeping**: per-run statistics, a plain-text operation log and an
//!   end-of-run summary
//!
//! # Architecture
//!
//! ```text
//!                  synchrone-cli
//!                        |
//!                  synchrone-core
//!                        |
//!            +-----------+-----------+
//!            |                       |
//!      synchrone-fs          synchrone-config
//! ```
//!
//! # Example
//!
//! ```no_run
//! use synchrone_config::ConfigDocument;
//! use synchrone_core::{InstallPlan, ReconciliationEngine, ResourceLayout, RunStamp, Summary};
//!
//! fn install(root: &std::path::Path) -> synchrone_core::Result<()> {
//!     let doc = ConfigDocument::load(&root.join("synchrone-config.yaml"))?;
//!     let layout = ResourceLayout::from_document(root, &doc);
//!     let plan = InstallPlan::from_document(&doc, &layout)?;
//!     let engine = ReconciliationEngine::new(layout, RunStamp::now());
//!     for policy in plan.policies() {
//!         let report = engine.run(policy)?;
//!         println!("{:?}", Summary::from_report(&report));
//!     }
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod engine;
pub mod error;
pub mod layout;
pub mod oplog;
pub mod policy;
pub mod stamp;
pub mod stats;
pub mod summary;

pub use backup::{BackupKind, BackupManifest, BackupRecord, BackupRun, BackupVault};
pub use engine::{Correspondence, ReconciliationEngine, RunReport, find_correspondences};
pub use error::{Error, Result};
pub use layout::ResourceLayout;
pub use oplog::{Action, LogEntry, OperationLog};
pub use policy::{InstallPlan, PolicyKind, UpdatePolicy, load_document};
pub use stamp::RunStamp;
pub use stats::{StatCategory, Statistics};
pub use summary::{Summary, SummaryLine};
