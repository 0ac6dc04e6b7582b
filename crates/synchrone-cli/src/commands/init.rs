//! Init command implementation

use std::path::Path;

use colored::Colorize;

use synchrone_config::DEFAULT_DOCUMENT_NAME;
use synchrone_config::template::DEFAULT_DOCUMENT;
use synchrone_fs::{DEFAULT_DIR_MODE, io};

use crate::error::{CliError, Result};

/// Run the init command
///
/// Writes the default update document unless one exists already.
pub fn run_init(root: &Path, force: bool) -> Result<()> {
    let path = root.join(DEFAULT_DOCUMENT_NAME);

    if path.exists() && !force {
        return Err(CliError::user(format!(
            "{} already exists. Use --force to overwrite it.",
            DEFAULT_DOCUMENT_NAME
        )));
    }

    io::write_atomic(&path, DEFAULT_DOCUMENT.as_bytes(), DEFAULT_DIR_MODE)?;
    tracing::debug!(?path, force, "Wrote default document");

    println!(
        "{} Created {}",
        "OK".green().bold(),
        DEFAULT_DOCUMENT_NAME.cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn writes_default_document() {
        let temp = TempDir::new().unwrap();
        run_init(temp.path(), false).unwrap();

        let content = fs::read_to_string(temp.path().join(DEFAULT_DOCUMENT_NAME)).unwrap();
        assert_eq!(content, DEFAULT_DOCUMENT);
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_DOCUMENT_NAME);
        fs::write(&path, "update: {}\n").unwrap();

        let result = run_init(temp.path(), false);
        assert!(matches!(result, Err(CliError::User { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "update: {}\n");

        run_init(temp.path(), true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_DOCUMENT);
    }
}
