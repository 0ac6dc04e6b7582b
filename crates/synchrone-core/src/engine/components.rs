//! New-component merge
//!
//! Same-named entries found one level deep in both the project and the
//! new-component tree are swapped wholesale after a backup. A sweep over the
//! whole new-component tree then adds whatever the project does not have.

use synchrone_fs::{EntryKind, NormalizedPath, TreeWalker};

use super::primitives::Run;
use crate::ResourceLayout;

/// A same-named entry present in both listings of a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    /// Scanned directory, relative to both roots
    pub directory: NormalizedPath,
    /// Entry name inside `directory`
    pub item: String,
    /// Kind of the project-side entry
    pub kind: EntryKind,
}

impl Correspondence {
    pub fn path(&self) -> NormalizedPath {
        self.directory.join(&self.item)
    }
}

/// List the correspondences of `directories` between project and new components.
///
/// Directories missing on either side, or escaping either root, are skipped.
/// Order follows `directories`, then entry name.
pub fn find_correspondences(
    layout: &ResourceLayout,
    directories: &[NormalizedPath],
) -> Vec<Correspondence> {
    let mut matches = Vec::new();

    for directory in directories.iter().filter(|d| !d.escapes_root()) {
        let project_dir = directory.resolve(&layout.project_root);
        let new_dir = directory.resolve(&layout.new_components_dir);
        let (Ok(project_items), Ok(new_items)) = (
            TreeWalker::new(&project_dir).children(),
            TreeWalker::new(&new_dir).children(),
        ) else {
            continue;
        };

        for (item, kind) in project_items {
            if new_items.iter().any(|(name, _)| *name == item) {
                matches.push(Correspondence {
                    directory: directory.clone(),
                    item,
                    kind,
                });
            }
        }
    }

    matches
}

pub(crate) fn merge(run: &mut Run<'_>, directories: &[NormalizedPath]) {
    let directories: Vec<NormalizedPath> = directories
        .iter()
        .filter(|directory| run.admit(directory))
        .cloned()
        .collect();
    let matches = find_correspondences(run.layout, &directories);
    tracing::info!(count = matches.len(), "Found component correspondences");

    for found in &matches {
        let logical = found.path();
        tracing::debug!(path = %logical, kind = %found.kind, "Processing correspondence");
        let source = logical.resolve(&run.layout.new_components_dir);
        run.swap_item(&source, &logical);
    }

    sweep_new(run);
}

fn sweep_new(run: &mut Run<'_>) {
    let root = run.layout.new_components_dir.clone();
    let walk = match TreeWalker::new(&root).walk() {
        Ok(walk) => walk,
        Err(e) => {
            run.fail(&NormalizedPath::root(), e);
            return;
        }
    };

    for entry in walk {
        match entry {
            Ok(entry) => run.add_if_missing(&entry.path.resolve(&root), entry.is_dir, &entry.path),
            Err(e) => run.fail(&NormalizedPath::root(), e),
        }
    }
}
