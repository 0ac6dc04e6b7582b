//! Error types for synchrone-fs

use std::path::PathBuf;

use crate::EntryKind;

/// Result type for synchrone-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in synchrone-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        path: PathBuf,
        expected: EntryKind,
        found: EntryKind,
    },

    #[error("Path {path} escapes {base}")]
    PathEscape { path: String, base: PathBuf },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
