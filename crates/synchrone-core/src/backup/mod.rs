//! Timestamped backups of everything a run overwrites
//!
//! Backups are stored at `<backup root>/<run stamp>/<logical path>` with:
//! - `manifest.toml`: every record of the run with SHA-256 of backed-up files
//! - `operation.log`: the plain-text operation log of the run
//!
//! One run is always recoverable as one unit. Restoring is manual.

mod manifest;
mod vault;

pub use manifest::{BackupManifest, MANIFEST_FILE};
pub use vault::{BackupKind, BackupRecord, BackupRun, BackupVault, OPERATION_LOG_FILE};
