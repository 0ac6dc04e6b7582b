//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// synchrone - Install and update Epaphrodites framework resources in a project
#[derive(Parser, Debug)]
#[command(name = "synchrone")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "SYNCHRONE_ROOT")]
    pub root: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Merge vendored resources into the project
    ///
    /// Reads synchrone-config.yaml and runs the update policies it enables.
    /// Every overwritten file is backed up first.
    ///
    /// Examples:
    ///   synchrone install            # Use ./synchrone-config.yaml
    ///   synchrone -i                 # Same, short form
    ///   synchrone install --json     # Machine-readable run reports
    #[command(short_flag = 'i')]
    Install {
        /// Update document (relative to the project root)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Fetch the latest framework package with the package manager
    #[command(short_flag = 'u')]
    Update {
        /// Package manager executable
        #[arg(long, default_value = "composer")]
        program: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write a default synchrone-config.yaml
    Init {
        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },

    /// List backup runs, newest first
    Backups {
        /// Update document (relative to the project root)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
