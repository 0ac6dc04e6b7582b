//! Error types for synchrone-core
//!
//! Only conditions that abort a run are errors. Per-item failures during a
//! merge are counted in [`crate::Statistics`] and never returned.

use std::path::PathBuf;

/// Result type for synchrone-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in synchrone-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Two mutually exclusive update types are enabled
    #[error("Configuration conflict: '{first}' and '{second}' cannot be enabled simultaneously")]
    ConfigurationConflict { first: String, second: String },

    /// The update document is missing
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The tree a policy merges from does not exist
    #[error("Merge source not found: {path}")]
    SourceMissing { path: PathBuf },

    /// Something was already backed up to this location
    #[error("Backup location already in use: {path}")]
    BackupExists { path: PathBuf },

    /// A backup run directory name is not a run stamp
    #[error("Invalid run stamp: {value}")]
    InvalidRunStamp { value: String },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from synchrone-fs
    #[error(transparent)]
    Fs(#[from] synchrone_fs::Error),

    /// Document error from synchrone-config
    #[error(transparent)]
    Config(#[from] synchrone_config::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// TOML serialization error
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),
}
