//! Plain-text audit trail of one run
//!
//! Entries carry no color or icons; the persisted `operation.log` is exactly
//! [`OperationLog::render`], and console styling is applied by the CLI.

use std::fmt;

use serde::Serialize;
use synchrone_fs::NormalizedPath;

/// What happened to an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    DirectoryCreated,
    Added,
    BackedUp,
    Replaced,
    NotFound,
    Failed,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DirectoryCreated => "directory created",
            Self::Added => "added",
            Self::BackedUp => "backed up",
            Self::Replaced => "replaced",
            Self::NotFound => "not found",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub action: Action,
    /// Project-relative path of the item
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<17} {}", self.action.as_str(), self.path)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

/// Ordered log of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OperationLog {
    entries: Vec<LogEntry>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action, path: &NormalizedPath, detail: Option<String>) {
        self.entries.push(LogEntry {
            action,
            path: path.to_string(),
            detail,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, action: Action) -> usize {
        self.entries.iter().filter(|e| e.action == action).count()
    }

    /// The log as newline-terminated plain text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}
