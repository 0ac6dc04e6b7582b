//! Per-run counters

use std::fmt;

use serde::{Deserialize, Serialize};

/// One counter of [`Statistics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatCategory {
    Added,
    Replaced,
    BackedUp,
    NotFound,
    Failed,
}

impl StatCategory {
    /// Fixed presentation order.
    pub const ORDER: [StatCategory; 5] = [
        StatCategory::Added,
        StatCategory::Replaced,
        StatCategory::BackedUp,
        StatCategory::NotFound,
        StatCategory::Failed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Replaced => "replaced",
            Self::BackedUp => "backed_up",
            Self::NotFound => "not_found",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for StatCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters accumulated by one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub added: usize,
    pub replaced: usize,
    pub backed_up: usize,
    pub failed: usize,
    pub not_found: usize,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: StatCategory) -> usize {
        match category {
            StatCategory::Added => self.added,
            StatCategory::Replaced => self.replaced,
            StatCategory::BackedUp => self.backed_up,
            StatCategory::NotFound => self.not_found,
            StatCategory::Failed => self.failed,
        }
    }

    pub fn record(&mut self, category: StatCategory) {
        let counter = match category {
            StatCategory::Added => &mut self.added,
            StatCategory::Replaced => &mut self.replaced,
            StatCategory::BackedUp => &mut self.backed_up,
            StatCategory::NotFound => &mut self.not_found,
            StatCategory::Failed => &mut self.failed,
        };
        *counter += 1;
    }

    pub fn total(&self) -> usize {
        StatCategory::ORDER.iter().map(|c| self.get(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero counters in presentation order.
    pub fn non_zero(&self) -> Vec<(StatCategory, usize)> {
        StatCategory::ORDER
            .iter()
            .map(|c| (*c, self.get(*c)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}
