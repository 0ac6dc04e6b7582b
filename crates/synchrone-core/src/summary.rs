//! End-of-run summary
//!
//! A plain projection of a [`RunReport`]; the CLI decides how to color it.

use serde::Serialize;

use crate::{PolicyKind, RunReport, StatCategory};

/// Shown when a full merge found nothing to add or replace.
pub const EMPTY_VENDOR_NOTICE: &str = "No changes made - vendor resource set empty";
/// Shown when every counter of a run is zero.
pub const NO_UPDATES_NOTICE: &str = "No updates performed";

/// One non-zero counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLine {
    pub category: StatCategory,
    pub count: usize,
    pub text: String,
}

impl SummaryLine {
    pub fn new(category: StatCategory, count: usize) -> Self {
        let text = match category {
            StatCategory::Added => format!("{count} file(s) added"),
            StatCategory::Replaced => format!("{count} file(s) replaced"),
            StatCategory::BackedUp => format!("{count} file(s) backed up"),
            StatCategory::NotFound => format!("{count} file(s) not found"),
            StatCategory::Failed => format!("{count} operation(s) failed"),
        };
        Self {
            category,
            count,
            text,
        }
    }

    /// Whether the line reports a problem.
    pub fn is_problem(&self) -> bool {
        matches!(self.category, StatCategory::NotFound | StatCategory::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub policy: PolicyKind,
    /// Non-zero counters in fixed order
    pub lines: Vec<SummaryLine>,
    pub directories_created: usize,
    pub notice: Option<String>,
}

impl Summary {
    pub fn from_report(report: &RunReport) -> Self {
        let lines: Vec<SummaryLine> = report
            .stats
            .non_zero()
            .into_iter()
            .map(|(category, count)| SummaryLine::new(category, count))
            .collect();

        let notice = if report.policy == PolicyKind::FullMerge && report.operation_count() == 0 {
            Some(EMPTY_VENDOR_NOTICE.to_string())
        } else if lines.is_empty() && report.directories_created == 0 {
            Some(NO_UPDATES_NOTICE.to_string())
        } else {
            None
        };

        Self {
            policy: report.policy,
            lines,
            directories_created: report.directories_created,
            notice,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.lines
            .iter()
            .any(|line| line.category == StatCategory::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{OperationLog, RunStamp, Statistics};
    use pretty_assertions::assert_eq;

    fn report(policy: PolicyKind, stats: Statistics, directories_created: usize) -> RunReport {
        RunReport {
            policy,
            stamp: RunStamp::parse("2026-10-16_101500").unwrap(),
            stats,
            directories_created,
            log: OperationLog::new(),
            backups: Vec::new(),
            log_file: None,
            persist_error: None,
        }
    }

    #[test]
    fn lines_follow_fixed_order_and_texts() {
        let stats = Statistics {
            added: 2,
            replaced: 1,
            backed_up: 1,
            failed: 3,
            not_found: 1,
        };
        let summary = Summary::from_report(&report(PolicyKind::TargetedMerge, stats, 0));
        let texts: Vec<&str> = summary.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "2 file(s) added",
                "1 file(s) replaced",
                "1 file(s) backed up",
                "1 file(s) not found",
                "3 operation(s) failed",
            ]
        );
        assert_eq!(summary.notice, None);
        assert!(summary.has_failures());
    }

    #[test]
    fn all_zero_is_no_updates() {
        let summary =
            Summary::from_report(&report(PolicyKind::NewComponentMerge, Statistics::new(), 0));
        assert!(summary.lines.is_empty());
        assert_eq!(summary.notice.as_deref(), Some(NO_UPDATES_NOTICE));
    }

    #[test]
    fn empty_full_merge_has_distinct_notice() {
        let stats = Statistics {
            failed: 1,
            ..Statistics::default()
        };
        let summary = Summary::from_report(&report(PolicyKind::FullMerge, stats, 0));
        assert_eq!(summary.notice.as_deref(), Some(EMPTY_VENDOR_NOTICE));
        assert_eq!(summary.lines.len(), 1);
    }

    #[test]
    fn created_directories_count_as_work() {
        let summary =
            Summary::from_report(&report(PolicyKind::FullMerge, Statistics::new(), 2));
        assert_eq!(summary.notice, None);
        assert_eq!(summary.directories_created, 2);
    }
}
