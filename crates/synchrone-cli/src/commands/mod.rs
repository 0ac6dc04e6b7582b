//! Command implementations for synchrone-cli

pub mod backups;
pub mod init;
pub mod install;
pub mod update;

pub use backups::run_backups;
pub use init::run_init;
pub use install::run_install;
pub use update::run_update;

use std::path::{Path, PathBuf};

use synchrone_config::DEFAULT_DOCUMENT_NAME;

/// Resolve the update document path against the project root.
pub fn config_path(root: &Path, config: Option<&Path>) -> PathBuf {
    match config {
        Some(path) => root.join(path),
        None => root.join(DEFAULT_DOCUMENT_NAME),
    }
}
