//! Install command implementation
//!
//! Loads the update document, picks the policies it enables and runs each one
//! as its own reconciliation run. All runs of one invocation share a stamp.

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use synchrone_config::DEFAULT_DOCUMENT_NAME;
use synchrone_core::{
    Error as CoreError, InstallPlan, ReconciliationEngine, ResourceLayout, RunReport, RunStamp,
    Summary, UpdatePolicy, load_document,
};

use super::config_path;
use crate::error::{CliError, Result};
use crate::render;

/// Printed when neither `all` nor `specific` is enabled.
pub const NO_PRIMARY_MESSAGE: &str = "No general or specific updates detected";
/// Printed when `new` is not enabled.
pub const NO_NEW_MESSAGE: &str = "No new component updates requested";

#[derive(Debug, Serialize)]
struct RunOutput {
    report: RunReport,
    summary: Summary,
}

#[derive(Debug, Serialize)]
struct InstallOutput {
    stamp: RunStamp,
    runs: Vec<RunOutput>,
    messages: Vec<String>,
}

/// Run the install command
pub fn run_install(root: &Path, config: Option<&Path>, json: bool) -> Result<()> {
    let path = config_path(root, config);
    let doc = load_document(&path).map_err(|e| match e {
        CoreError::ConfigNotFound { .. } => CliError::user(format!(
            "Please ensure {} is located at the root of your project",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| DEFAULT_DOCUMENT_NAME.to_string())
        )),
        other => other.into(),
    })?;

    let layout = ResourceLayout::from_document(root, &doc);
    let plan = InstallPlan::from_document(&doc, &layout)?;
    let engine = ReconciliationEngine::new(layout, RunStamp::now());

    let mut output = InstallOutput {
        stamp: engine.stamp().clone(),
        runs: Vec::new(),
        messages: Vec::new(),
    };

    match &plan.primary {
        Some(policy) => execute(&engine, policy, json, &mut output)?,
        None => message(NO_PRIMARY_MESSAGE, json, &mut output),
    }
    match &plan.new_components {
        Some(policy) => execute(&engine, policy, json, &mut output)?,
        None => message(NO_NEW_MESSAGE, json, &mut output),
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }
    Ok(())
}

fn execute(
    engine: &ReconciliationEngine,
    policy: &UpdatePolicy,
    json: bool,
    output: &mut InstallOutput,
) -> Result<()> {
    let kind = policy.kind();
    if !json {
        println!("{} Running {}...", "=>".blue().bold(), kind);
    }

    match engine.run(policy) {
        Ok(report) => {
            if !json {
                render::print_report(&report);
                println!("{} {} completed", "OK".green().bold(), kind);
            }
            output.runs.push(RunOutput {
                summary: Summary::from_report(&report),
                report,
            });
            Ok(())
        }
        Err(CoreError::SourceMissing { path }) => {
            message(
                &format!("Skipped {}: source not found at {}", kind, path.display()),
                json,
                output,
            );
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn message(text: &str, json: bool, output: &mut InstallOutput) {
    if !json {
        println!("{} {}", "WARN".yellow().bold(), text);
    }
    output.messages.push(text.to_string());
}
