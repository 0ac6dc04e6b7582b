//! synchrone CLI
//!
//! Installs and updates the Epaphrodites framework's shipped resources in a
//! consuming project.

mod cli;
mod commands;
mod error;
mod render;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let root = project_root(cli.root)?;
    tracing::debug!(?root, "Project root");

    match cli.command {
        Some(cmd) => execute_command(&root, cmd),
        None => {
            println!("{} Epaphrodites resource installer", "synchrone".green().bold());
            println!();
            println!("Run {} for available commands.", "synchrone --help".cyan());
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    tracing::debug!("Verbose mode enabled");
    Ok(())
}

fn project_root(root: Option<PathBuf>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }
    Ok(dunce::canonicalize(&root)?)
}

fn execute_command(root: &std::path::Path, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Install { config, json } => commands::run_install(root, config.as_deref(), json),
        Commands::Update { program, json } => commands::run_update(root, &program, json),
        Commands::Init { force } => commands::run_init(root, force),
        Commands::Backups { config, json } => commands::run_backups(root, config.as_deref(), json),
    }
}
