//! Blocking filesystem primitives
//!
//! All merge operations are strictly ordered and synchronous: parents are created
//! before children, and copies always complete before anything is removed.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, Result, TreeWalker};

/// Permission bits for every directory synchrone creates (rwxrwxr-x).
pub const DEFAULT_DIR_MODE: u32 = 0o775;

/// Whether a filesystem entry is a file or a directory.
///
/// Symlinks are not followed and count as files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Inspect `path` without following symlinks; `None` if nothing is there.
    pub fn of(path: &Path) -> Option<Self> {
        let meta = fs::symlink_metadata(path).ok()?;
        Some(if meta.is_dir() {
            Self::Directory
        } else {
            Self::File
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Create `dir` and any missing ancestors with `mode`.
///
/// Returns `true` if the directory had to be created. Fails with
/// [`Error::TypeMismatch`] if a file occupies the path.
pub fn ensure_dir(dir: &Path, mode: u32) -> Result<bool> {
    match EntryKind::of(dir) {
        Some(EntryKind::Directory) => return Ok(false),
        Some(EntryKind::File) => {
            return Err(Error::TypeMismatch {
                path: dir.to_path_buf(),
                expected: EntryKind::Directory,
                found: EntryKind::File,
            });
        }
        None => {}
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(dir).map_err(|e| Error::io(dir, e))?;
    Ok(true)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent(path: &Path, mode: u32) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent, mode)?;
    }
    Ok(())
}

/// Byte-for-byte copy of a single file, creating the destination's parent.
///
/// Refuses to write over a directory.
pub fn copy_file(src: &Path, dst: &Path, mode: u32) -> Result<u64> {
    if let Some(EntryKind::Directory) = EntryKind::of(src) {
        return Err(Error::TypeMismatch {
            path: src.to_path_buf(),
            expected: EntryKind::File,
            found: EntryKind::Directory,
        });
    }
    if let Some(EntryKind::Directory) = EntryKind::of(dst) {
        return Err(Error::TypeMismatch {
            path: dst.to_path_buf(),
            expected: EntryKind::File,
            found: EntryKind::Directory,
        });
    }
    ensure_parent(dst, mode)?;
    fs::copy(src, dst).map_err(|e| Error::io(dst, e))
}

/// Copy a directory tree, or a single file, to `dst`.
///
/// Existing files under `dst` are overwritten; nothing is removed. Returns the
/// number of files copied.
pub fn copy_tree(src: &Path, dst: &Path, mode: u32) -> Result<usize> {
    match EntryKind::of(src) {
        None => Err(Error::NotADirectory {
            path: src.to_path_buf(),
        }),
        Some(EntryKind::File) => copy_file(src, dst, mode).map(|_| 1),
        Some(EntryKind::Directory) => {
            ensure_dir(dst, mode)?;
            let mut copied = 0;
            for entry in TreeWalker::new(src).walk()? {
                let entry = entry?;
                let from = entry.path.resolve(src);
                let to = entry.path.resolve(dst);
                if entry.is_dir {
                    ensure_dir(&to, mode)?;
                } else {
                    copy_file(&from, &to, mode)?;
                    copied += 1;
                }
            }
            Ok(copied)
        }
    }
}

/// Remove a file or a whole directory tree. Missing paths are not an error.
pub fn remove_tree(path: &Path) -> Result<()> {
    match EntryKind::of(path) {
        None => Ok(()),
        Some(EntryKind::File) => fs::remove_file(path).map_err(|e| Error::io(path, e)),
        Some(EntryKind::Directory) => fs::remove_dir_all(path).map_err(|e| Error::io(path, e)),
    }
}

/// Replace whatever is at `dst` with a copy of `src`.
///
/// The new content is staged in a hidden sibling first, so the window in which
/// neither the old nor the new item exists is limited to a remove and a rename.
pub fn replace_tree(src: &Path, dst: &Path, mode: u32) -> Result<()> {
    ensure_parent(dst, mode)?;
    let staging = staging_path(dst);
    remove_tree(&staging)?;

    if let Err(e) = copy_tree(src, &staging, mode) {
        discard_staging(&staging);
        return Err(e);
    }
    if let Err(e) = remove_tree(dst) {
        discard_staging(&staging);
        return Err(e);
    }
    fs::rename(&staging, dst).map_err(|e| Error::io(dst, e))?;
    tracing::debug!(?src, ?dst, "Replaced");
    Ok(())
}

fn discard_staging(staging: &Path) {
    if let Err(e) = remove_tree(staging) {
        tracing::warn!(?staging, error = %e, "Failed to remove staging copy");
    }
}

fn staging_path(dst: &Path) -> PathBuf {
    let name = dst
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dst.with_file_name(format!(".{}.{}.staging", name, std::process::id()))
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename so readers never observe a partial file.
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    ensure_parent(path, mode)?;

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: path.to_path_buf(),
        })?;
    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;
    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
}

/// Append to a file under an exclusive advisory lock, creating it if needed.
pub fn append_locked(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    ensure_parent(path, mode)?;

    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;

    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    let written = file.write_all(content).map_err(|e| Error::io(path, e));
    file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;
    written
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
