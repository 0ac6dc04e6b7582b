//! Backups command implementation

use std::path::Path;

use colored::Colorize;

use synchrone_config::ConfigDocument;
use synchrone_core::{BackupVault, ResourceLayout};

use super::config_path;
use crate::error::Result;

/// Run the backups command
///
/// Honors the `layout.backups` override when an update document exists.
pub fn run_backups(root: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let path = config_path(root, config);
    let layout = if path.is_file() {
        ResourceLayout::from_document(root, &ConfigDocument::load(&path)?)
    } else {
        ResourceLayout::new(root)
    };

    let runs = BackupVault::list_runs(&layout.backup_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&runs)?);
        return Ok(());
    }

    if runs.is_empty() {
        println!("{} No backups found in {}", "=>".blue().bold(), layout.backup_dir.display());
        return Ok(());
    }

    println!("{}", "Backup runs:".bold());
    for run in &runs {
        let records = run.manifest.as_ref().map(|m| m.len()).unwrap_or(0);
        let log = if run.has_log {
            "log".green()
        } else {
            "no log".dimmed()
        };
        println!(
            "   {} {} item(s) backed up, {}",
            run.stamp.as_str().cyan(),
            records,
            log
        );
    }
    println!();
    println!("Restore by copying files back from {}", layout.backup_dir.display());
    Ok(())
}
