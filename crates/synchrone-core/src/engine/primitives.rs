//! Per-run state and the file-level operations every strategy is built from
//!
//! Failures of individual items are recorded, never returned: each operation
//! bumps a [`Statistics`] counter, appends an [`OperationLog`] entry and moves
//! on.

use std::fmt::Display;
use std::path::Path;

use synchrone_fs::{EntryKind, NormalizedPath, TreeWalker, io};

use crate::backup::{BackupRecord, BackupVault};
use crate::{Action, OperationLog, ResourceLayout, StatCategory, Statistics};

/// Mutable state of one reconciliation run.
pub(crate) struct Run<'a> {
    pub layout: &'a ResourceLayout,
    pub vault: &'a BackupVault,
    pub stats: Statistics,
    pub log: OperationLog,
    pub backups: Vec<BackupRecord>,
    pub directories_created: usize,
}

impl<'a> Run<'a> {
    pub fn new(layout: &'a ResourceLayout, vault: &'a BackupVault) -> Self {
        Self {
            layout,
            vault,
            stats: Statistics::new(),
            log: OperationLog::new(),
            backups: Vec::new(),
            directories_created: 0,
        }
    }

    /// Absolute project-side path of a logical path.
    pub fn target(&self, logical: &NormalizedPath) -> std::path::PathBuf {
        logical.resolve(&self.layout.project_root)
    }

    /// Check that `logical` stays below the roots it is resolved under.
    ///
    /// Records a failure and returns `false` for paths that climb out.
    pub fn admit(&mut self, logical: &NormalizedPath) -> bool {
        match logical.try_resolve(&self.layout.project_root) {
            Ok(_) => true,
            Err(e) => {
                self.fail(logical, e);
                false
            }
        }
    }

    fn record(&mut self, category: StatCategory, action: Action, logical: &NormalizedPath) {
        self.stats.record(category);
        self.log.push(action, logical, None);
    }

    pub fn fail(&mut self, logical: &NormalizedPath, reason: impl Display) {
        let reason = reason.to_string();
        tracing::warn!(path = %logical, %reason, "Operation failed");
        self.stats.record(StatCategory::Failed);
        self.log.push(Action::Failed, logical, Some(reason));
    }

    pub fn not_found(&mut self, logical: &NormalizedPath) {
        tracing::debug!(path = %logical, "Selected path not found in vendor tree");
        self.record(StatCategory::NotFound, Action::NotFound, logical);
    }

    /// Back up the project-side item at `logical`.
    ///
    /// Returns `false` (after recording the failure) if the backup could not be
    /// written; the caller must then leave the item alone.
    fn backup(&mut self, logical: &NormalizedPath) -> bool {
        let target = self.target(logical);
        match self.vault.backup(&target, logical) {
            Ok(record) => {
                self.backups.push(record);
                self.record(StatCategory::BackedUp, Action::BackedUp, logical);
                true
            }
            Err(e) => {
                self.fail(logical, format!("backup failed: {e}"));
                false
            }
        }
    }

    /// Create the project-side directory at `logical` if absent.
    ///
    /// Directories are never backed up or replaced.
    pub fn ensure_directory(&mut self, logical: &NormalizedPath) -> bool {
        let target = self.target(logical);
        match io::ensure_dir(&target, self.layout.dir_mode) {
            Ok(true) => {
                self.directories_created += 1;
                self.log.push(Action::DirectoryCreated, logical, None);
                tracing::debug!(path = %logical, "Directory created");
                true
            }
            Ok(false) => true,
            Err(e) => {
                self.fail(logical, e);
                false
            }
        }
    }

    /// Copy `source` to the project-side file at `logical`.
    ///
    /// A missing target is added. An existing target is backed up first, and
    /// only replaced once the backup succeeded.
    pub fn replace_file_with_backup(&mut self, source: &Path, logical: &NormalizedPath) {
        let dest = self.target(logical);
        let mode = self.layout.dir_mode;

        match EntryKind::of(&dest) {
            None => match io::copy_file(source, &dest, mode) {
                Ok(_) => {
                    tracing::debug!(path = %logical, "Added");
                    self.record(StatCategory::Added, Action::Added, logical);
                }
                Err(e) => self.fail(logical, e),
            },
            Some(EntryKind::Directory) => self.fail(
                logical,
                synchrone_fs::Error::TypeMismatch {
                    path: dest,
                    expected: EntryKind::File,
                    found: EntryKind::Directory,
                },
            ),
            Some(EntryKind::File) => {
                if !self.backup(logical) {
                    return;
                }
                match io::copy_file(source, &dest, mode) {
                    Ok(_) => {
                        tracing::debug!(path = %logical, "Replaced");
                        self.record(StatCategory::Replaced, Action::Replaced, logical);
                    }
                    Err(e) => self.fail(logical, e),
                }
            }
        }
    }

    /// Mirror every entry of `source_dir` below `logical_base`.
    ///
    /// Subdirectories are created as needed; files go through
    /// [`Run::replace_file_with_backup`].
    pub fn copy_directory_with_backup(&mut self, source_dir: &Path, logical_base: &NormalizedPath) {
        let walk = match TreeWalker::new(source_dir).walk() {
            Ok(walk) => walk,
            Err(e) => {
                self.fail(logical_base, e);
                return;
            }
        };
        if !self.ensure_directory(logical_base) {
            return;
        }

        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.fail(logical_base, e);
                    continue;
                }
            };
            let logical = logical_base.join(entry.path.as_str());
            if entry.is_dir {
                self.ensure_directory(&logical);
            } else {
                self.replace_file_with_backup(&entry.path.resolve(source_dir), &logical);
            }
        }
    }

    /// Replace the project-side item at `logical` wholesale with `source`.
    ///
    /// The existing item is backed up first; if that fails nothing is swapped,
    /// even though the new-component merge would otherwise swap regardless of
    /// the backup outcome. A file never replaces a directory or the other way
    /// round.
    pub fn swap_item(&mut self, source: &Path, logical: &NormalizedPath) {
        let dest = self.target(logical);
        let Some(source_kind) = EntryKind::of(source) else {
            self.fail(
                logical,
                synchrone_fs::Error::NotADirectory {
                    path: source.to_path_buf(),
                },
            );
            return;
        };

        let existing = EntryKind::of(&dest);
        if let Some(dest_kind) = existing {
            if dest_kind != source_kind {
                self.fail(
                    logical,
                    synchrone_fs::Error::TypeMismatch {
                        path: dest,
                        expected: source_kind,
                        found: dest_kind,
                    },
                );
                return;
            }
            if !self.backup(logical) {
                return;
            }
        }

        match io::replace_tree(source, &dest, self.layout.dir_mode) {
            Ok(()) if existing.is_none() => {
                self.record(StatCategory::Added, Action::Added, logical);
            }
            Ok(()) => {
                tracing::debug!(path = %logical, kind = %source_kind, "Swapped");
                self.record(StatCategory::Replaced, Action::Replaced, logical);
            }
            Err(e) => self.fail(logical, e),
        }
    }

    /// Create or copy `source` at `logical` only if nothing is there yet.
    pub fn add_if_missing(&mut self, source: &Path, is_dir: bool, logical: &NormalizedPath) {
        if EntryKind::of(&self.target(logical)).is_some() {
            return;
        }
        if is_dir {
            self.ensure_directory(logical);
        } else {
            self.replace_file_with_backup(source, logical);
        }
    }
}
