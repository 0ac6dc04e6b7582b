//! Backup vault implementation
//!
//! Handles copying pre-existing items aside before they are overwritten, the
//! per-run operation log and manifest, and listing past runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use synchrone_fs::{EntryKind, NormalizedPath, checksum, io};

use super::{BackupManifest, MANIFEST_FILE};
use crate::{Error, Result, RunStamp};

/// File name of the persisted operation log inside a run directory.
pub const OPERATION_LOG_FILE: &str = "operation.log";

/// Whether a backed-up item was a file or a whole directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupKind {
    File,
    Directory,
}

impl From<EntryKind> for BackupKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => Self::File,
            EntryKind::Directory => Self::Directory,
        }
    }
}

/// One item copied aside before an overwrite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Run the backup belongs to
    pub stamp: RunStamp,
    /// Logical path relative to the run directory
    pub path: String,
    /// Where the item lived when it was backed up
    pub original: PathBuf,
    /// Where the copy was written
    pub location: PathBuf,
    pub kind: BackupKind,
    /// SHA-256 of the backed-up content (files only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

/// A run directory found under the backup root
#[derive(Debug, Clone, Serialize)]
pub struct BackupRun {
    pub stamp: RunStamp,
    pub path: PathBuf,
    pub manifest: Option<BackupManifest>,
    pub has_log: bool,
}

/// Computes backup locations for one run and writes copies there.
///
/// A vault never overwrites a backup: each location is written at most once.
/// Runs sharing a stamp keep their copies apart with [`BackupVault::scoped`].
#[derive(Debug, Clone)]
pub struct BackupVault {
    backup_root: PathBuf,
    stamp: RunStamp,
    scope: Option<String>,
    dir_mode: u32,
}

impl BackupVault {
    pub fn new(backup_root: impl Into<PathBuf>, stamp: RunStamp, dir_mode: u32) -> Self {
        Self {
            backup_root: backup_root.into(),
            stamp,
            scope: None,
            dir_mode,
        }
    }

    /// Same run, with copies written below `<stamp>/<scope>`.
    ///
    /// The operation log and manifest stay shared at the run directory.
    pub fn scoped(&self, scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..self.clone()
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    pub fn stamp(&self) -> &RunStamp {
        &self.stamp
    }

    /// `<backup root>/<stamp>`
    pub fn run_dir(&self) -> PathBuf {
        self.backup_root.join(self.stamp.as_str())
    }

    /// `<backup root>/<stamp>[/<scope>]/<logical>`
    pub fn location(&self, logical: &NormalizedPath) -> PathBuf {
        let mut base = self.run_dir();
        if let Some(scope) = &self.scope {
            base.push(scope);
        }
        logical.resolve(&base)
    }

    /// Copy `target` to its backup location.
    ///
    /// The original is never moved. Directories are copied recursively with
    /// their relative structure; files are copied byte for byte and
    /// checksummed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SourceMissing`] if nothing exists at `target`,
    /// [`Error::BackupExists`] if the location already holds a backup, or a
    /// filesystem error if the backup location cannot be created or written.
    pub fn backup(&self, target: &Path, logical: &NormalizedPath) -> Result<BackupRecord> {
        let kind = EntryKind::of(target).ok_or_else(|| Error::SourceMissing {
            path: target.to_path_buf(),
        })?;
        let location = self.location(logical);
        if EntryKind::of(&location).is_some() {
            return Err(Error::BackupExists { path: location });
        }

        io::ensure_parent(&location, self.dir_mode)?;
        let checksum = match kind {
            EntryKind::Directory => {
                io::copy_tree(target, &location, self.dir_mode)?;
                None
            }
            EntryKind::File => {
                io::copy_file(target, &location, self.dir_mode)?;
                Some(checksum::file_checksum(&location)?)
            }
        };

        tracing::debug!(?target, ?location, "Backed up");

        Ok(BackupRecord {
            stamp: self.stamp.clone(),
            path: logical.to_string(),
            original: target.to_path_buf(),
            location,
            kind: kind.into(),
            checksum,
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.run_dir().join(OPERATION_LOG_FILE)
    }

    /// Append rendered log text to this run's `operation.log`.
    pub fn append_log(&self, content: &str) -> Result<PathBuf> {
        let path = self.log_path();
        io::append_locked(&path, content.as_bytes(), self.dir_mode)?;
        Ok(path)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.run_dir().join(MANIFEST_FILE)
    }

    /// Record `records` in this run's manifest, merging with an existing one.
    pub fn write_manifest(&self, records: &[BackupRecord]) -> Result<PathBuf> {
        let path = self.manifest_path();
        let mut manifest = if path.is_file() {
            BackupManifest::load(&path)?
        } else {
            BackupManifest::new(self.stamp.clone())
        };
        manifest.merge(records);
        manifest.save(&path, self.dir_mode)?;
        Ok(path)
    }

    /// Runs found under `backup_root`, newest first.
    ///
    /// Entries whose name is not a run stamp are ignored. A missing backup
    /// root yields an empty list.
    pub fn list_runs(backup_root: &Path) -> Result<Vec<BackupRun>> {
        if !backup_root.is_dir() {
            return Ok(Vec::new());
        }

        let mut runs = Vec::new();
        for entry in fs::read_dir(backup_root).map_err(|e| synchrone_fs::Error::io(backup_root, e))? {
            let entry = entry.map_err(|e| synchrone_fs::Error::io(backup_root, e))?;
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Ok(stamp) = RunStamp::parse(&entry.file_name().to_string_lossy()) else {
                continue;
            };

            let manifest_path = path.join(MANIFEST_FILE);
            let manifest = if manifest_path.is_file() {
                match BackupManifest::load(&manifest_path) {
                    Ok(manifest) => Some(manifest),
                    Err(e) => {
                        tracing::warn!(path = ?manifest_path, error = %e, "Unreadable backup manifest");
                        None
                    }
                }
            } else {
                None
            };

            runs.push(BackupRun {
                has_log: path.join(OPERATION_LOG_FILE).is_file(),
                stamp,
                path,
                manifest,
            });
        }

        runs.sort_by(|a, b| b.stamp.cmp(&a.stamp));
        Ok(runs)
    }
}
