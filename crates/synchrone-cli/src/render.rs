//! Console rendering of run reports
//!
//! Color is applied here only; the operation log itself stays plain text.

use colored::{ColoredString, Colorize};

use synchrone_core::{Action, LogEntry, RunReport, StatCategory, Summary};

fn action_label(action: Action) -> ColoredString {
    let label = format!("{:<17}", action.as_str());
    match action {
        Action::DirectoryCreated => label.cyan(),
        Action::Added => label.green(),
        Action::BackedUp => label.yellow(),
        Action::Replaced => label.blue(),
        Action::NotFound => label.magenta(),
        Action::Failed => label.red().bold(),
    }
}

fn entry_line(entry: &LogEntry) -> String {
    match &entry.detail {
        Some(detail) => format!(
            "   {} {}: {}",
            action_label(entry.action),
            entry.path,
            detail.dimmed()
        ),
        None => format!("   {} {}", action_label(entry.action), entry.path),
    }
}

/// Print the operations of a run followed by its summary.
pub fn print_report(report: &RunReport) {
    if !report.log.is_empty() {
        println!();
        println!("{}", "Operations performed:".bold());
        for entry in report.log.entries() {
            println!("{}", entry_line(entry));
        }
    }

    print_summary(&Summary::from_report(report));

    if let Some(path) = &report.log_file {
        println!("   Operation log saved to {}", path.display().to_string().cyan());
    }
    if let Some(error) = &report.persist_error {
        println!("{} Could not save run records: {}", "WARN".yellow().bold(), error);
    }
}

pub fn print_summary(summary: &Summary) {
    println!();
    for line in &summary.lines {
        let text = match line.category {
            StatCategory::Added | StatCategory::Replaced => line.text.green(),
            StatCategory::BackedUp => line.text.yellow(),
            StatCategory::NotFound | StatCategory::Failed => line.text.red(),
        };
        let marker = if line.is_problem() {
            "!".red().bold()
        } else {
            "+".green().bold()
        };
        println!("   {} {}", marker, text);
    }
    if summary.directories_created > 0 {
        println!(
            "   {} {}",
            "+".green().bold(),
            format!("{} directory(ies) created", summary.directories_created).cyan()
        );
    }
    if let Some(notice) = &summary.notice {
        println!("   {} {}", "-".yellow().bold(), notice.yellow());
    }
}
