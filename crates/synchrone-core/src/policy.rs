//! Update policies and their selection from the update document

use std::fmt;
use std::path::Path;

use serde::Serialize;
use synchrone_config::{ConfigDocument, InclusionTree};
use synchrone_fs::NormalizedPath;

use crate::{Error, ResourceLayout, Result};

/// Document flag selecting a full merge.
pub const FLAG_ALL: &str = "all";
/// Document flag selecting a targeted merge.
pub const FLAG_SPECIFIC: &str = "specific";
/// Document flag requesting a new-component merge.
pub const FLAG_NEW: &str = "new";

/// Load the update document at `path`.
///
/// A missing document is fatal for an install and maps to
/// [`Error::ConfigNotFound`].
pub fn load_document(path: &Path) -> Result<ConfigDocument> {
    ConfigDocument::load(path).map_err(|e| match e {
        synchrone_config::Error::ConfigNotFound { path } => Error::ConfigNotFound { path },
        other => other.into(),
    })
}

/// Name of a policy, without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    FullMerge,
    TargetedMerge,
    NewComponentMerge,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FullMerge => "full merge",
            Self::TargetedMerge => "targeted merge",
            Self::NewComponentMerge => "new component merge",
        }
    }

    /// Directory name of this policy's backups inside a run directory.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::FullMerge => "full-merge",
            Self::TargetedMerge => "targeted-merge",
            Self::NewComponentMerge => "new-component-merge",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reconciliation strategy with its parameters. Exactly one is active per run.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePolicy {
    /// Reconcile these vendor directories wholesale
    FullMerge { directories: Vec<NormalizedPath> },
    /// Touch only the paths the inclusion tree selects, below these roots
    TargetedMerge {
        roots: Vec<String>,
        tree: InclusionTree,
    },
    /// Swap same-named entries of these directories, then add anything new
    NewComponentMerge { directories: Vec<NormalizedPath> },
}

impl UpdatePolicy {
    pub fn kind(&self) -> PolicyKind {
        match self {
            Self::FullMerge { .. } => PolicyKind::FullMerge,
            Self::TargetedMerge { .. } => PolicyKind::TargetedMerge,
            Self::NewComponentMerge { .. } => PolicyKind::NewComponentMerge,
        }
    }

    pub fn full_merge(layout: &ResourceLayout) -> Self {
        Self::FullMerge {
            directories: layout.full_merge_directories.clone(),
        }
    }

    pub fn targeted_merge(layout: &ResourceLayout, tree: InclusionTree) -> Self {
        Self::TargetedMerge {
            roots: layout.targeted_roots.clone(),
            tree,
        }
    }

    pub fn new_component_merge(layout: &ResourceLayout) -> Self {
        Self::NewComponentMerge {
            directories: layout.new_component_directories.clone(),
        }
    }
}

/// The policies one install session executes, in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstallPlan {
    /// Full or targeted merge, if either flag is set
    pub primary: Option<UpdatePolicy>,
    /// New-component merge, executed after the primary policy
    pub new_components: Option<UpdatePolicy>,
}

impl InstallPlan {
    /// Evaluate the document's `update.type` flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationConflict`] if both `all` and `specific`
    /// are enabled. Nothing has been touched on disk at that point.
    pub fn from_document(doc: &ConfigDocument, layout: &ResourceLayout) -> Result<Self> {
        let all = doc.is_update_type_enabled(FLAG_ALL);
        let specific = doc.is_update_type_enabled(FLAG_SPECIFIC);
        let new = doc.is_update_type_enabled(FLAG_NEW);

        tracing::debug!(all, specific, new, "Evaluated update flags");

        if all && specific {
            return Err(Error::ConfigurationConflict {
                first: FLAG_ALL.to_string(),
                second: FLAG_SPECIFIC.to_string(),
            });
        }

        let primary = if all {
            Some(UpdatePolicy::full_merge(layout))
        } else if specific {
            Some(UpdatePolicy::targeted_merge(layout, doc.update_targets(None)))
        } else {
            None
        };
        let new_components = new.then(|| UpdatePolicy::new_component_merge(layout));

        Ok(Self {
            primary,
            new_components,
        })
    }

    /// Policies in execution order.
    pub fn policies(&self) -> impl Iterator<Item = &UpdatePolicy> {
        self.primary.iter().chain(self.new_components.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.new_components.is_none()
    }
}
