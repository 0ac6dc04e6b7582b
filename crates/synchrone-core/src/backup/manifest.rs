//! `manifest.toml` of a backup run

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use synchrone_fs::io;

use super::BackupRecord;
use crate::{Result, RunStamp};

/// File name of the manifest inside a run directory.
pub const MANIFEST_FILE: &str = "manifest.toml";

/// Metadata for one backup run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackupManifest {
    /// Run the records belong to
    pub stamp: RunStamp,
    /// When the manifest was first written
    pub created: DateTime<Utc>,
    /// Backed-up items in backup order
    #[serde(default)]
    pub records: Vec<BackupRecord>,
}

impl BackupManifest {
    pub fn new(stamp: RunStamp) -> Self {
        Self {
            stamp,
            created: Utc::now(),
            records: Vec::new(),
        }
    }

    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = io::read_text(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the manifest atomically.
    pub fn save(&self, path: &Path, dir_mode: u32) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        io::write_atomic(path, content.as_bytes(), dir_mode)?;
        Ok(())
    }

    /// Append records. Every record is kept, including several for one
    /// logical path; only a record already present is not added again.
    pub fn merge(&mut self, records: &[BackupRecord]) {
        for record in records {
            if !self.records.contains(record) {
                self.records.push(record.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
