//! Declarative update document for synchrone.
//!
//! This crate reads the project's `synchrone-config.yaml`, answers dotted-path
//! lookups over it, and exposes the `update_targets` section as an
//! [`InclusionTree`] the targeted merge strategy walks.

pub mod document;
pub mod error;
pub mod inclusion;
pub mod template;

pub use document::{ConfigDocument, DEFAULT_DOCUMENT_NAME, MAX_DOCUMENT_SIZE};
pub use error::{Error, Result};
pub use inclusion::{InclusionNode, InclusionTree};
