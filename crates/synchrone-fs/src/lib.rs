//! Filesystem layer for synchrone
//!
//! Provides normalized relative paths, blocking copy/delete primitives with the
//! project's directory permissions, checksums, and the depth-first tree walker
//! every merge strategy is driven by.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;
pub mod walker;

pub use error::{Error, Result};
pub use io::{DEFAULT_DIR_MODE, EntryKind};
pub use path::NormalizedPath;
pub use walker::{TreeWalker, WalkEntry};
