//! Shared test utilities for the synchrone workspace.
//!
//! This crate provides a [`TestProject`] fixture so every crate builds its
//! vendor/project/backup trees the same way. It is a dev-dependency only.
//!
//! # Modules
//!
//! - [`project`]: [`TestProject`] builder for a consuming project with a
//!   vendored framework package

pub mod project;

pub use project::{
    BACKUP_DIR, NEW_COMPONENTS_DIR, TestProject, VENDOR_DIR,
};
