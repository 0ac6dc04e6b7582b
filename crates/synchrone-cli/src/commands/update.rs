//! Update command implementation
//!
//! A thin wrapper around the package manager; nothing is merged here.

use std::path::Path;
use std::process::Command;

use colored::Colorize;
use serde::Serialize;

use crate::error::{CliError, Result};

/// Package required from the package manager.
pub const PACKAGE: &str = "epaphrodites/packages";

/// What the package manager reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub success: bool,
    /// Combined stdout and stderr, line by line
    pub output: Vec<String>,
    pub return_code: Option<i32>,
}

/// Run `<program> require epaphrodites/packages` in `root`.
pub fn require_package(root: &Path, program: &str) -> Result<UpdateOutcome> {
    tracing::debug!(program, package = PACKAGE, "Running package manager");

    let result = Command::new(program)
        .args(["require", PACKAGE])
        .current_dir(root)
        .output()
        .map_err(|e| CliError::user(format!("Failed to run {}: {}", program, e)))?;

    let mut output: Vec<String> = String::from_utf8_lossy(&result.stdout)
        .lines()
        .map(str::to_string)
        .collect();
    output.extend(
        String::from_utf8_lossy(&result.stderr)
            .lines()
            .map(str::to_string),
    );

    Ok(UpdateOutcome {
        success: result.status.success(),
        output,
        return_code: result.status.code(),
    })
}

/// Run the update command
pub fn run_update(root: &Path, program: &str, json: bool) -> Result<()> {
    if !json {
        println!(
            "{} Requiring {} with {}...",
            "=>".blue().bold(),
            PACKAGE.cyan(),
            program
        );
    }

    let outcome = require_package(root, program)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        for line in &outcome.output {
            println!("   {}", line);
        }
    }

    if !outcome.success {
        return Err(CliError::user(match outcome.return_code {
            Some(code) => format!("Package update failed with exit code {code}"),
            None => "Package update was interrupted".to_string(),
        }));
    }

    if !json {
        println!("{} Package updated", "OK".green().bold());
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn captures_output_and_status() {
        let temp = TempDir::new().unwrap();
        let outcome = require_package(temp.path(), "echo").unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.return_code, Some(0));
        assert_eq!(outcome.output, vec!["require epaphrodites/packages"]);
    }

    #[test]
    fn failing_program_is_reported() {
        let temp = TempDir::new().unwrap();
        let outcome = require_package(temp.path(), "false").unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.return_code, Some(1));
    }

    #[test]
    fn missing_program_is_a_user_error() {
        let temp = TempDir::new().unwrap();
        let result = require_package(temp.path(), "synchrone-no-such-program");
        assert!(matches!(result, Err(CliError::User { .. })));
    }
}
