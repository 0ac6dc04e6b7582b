//! Targeted merge: only touch what the inclusion tree selects
//!
//! The tree is descended in lockstep with the vendor filesystem. A leaf `true`
//! on a directory takes its whole subtree; `false` or an absent key leaves the
//! path unvisited.

use synchrone_config::{InclusionNode, InclusionTree};
use synchrone_fs::{EntryKind, NormalizedPath, TreeWalker};

use super::primitives::Run;

pub(crate) fn merge(run: &mut Run<'_>, roots: &[String], tree: &InclusionTree) {
    for root in roots {
        let Some(node) = tree.get(root) else {
            continue;
        };
        let base = NormalizedPath::new(root);
        tracing::info!(root = %base, "Merging selected targets");

        match node {
            InclusionNode::Include(false) => {}
            InclusionNode::Include(true) => apply(run, &base, None),
            InclusionNode::Branch(entries) => {
                for (name, child) in entries.entries() {
                    let path = base.join(name);
                    match child {
                        InclusionNode::Include(true) => apply(run, &path, Some(&base)),
                        InclusionNode::Include(false) => {}
                        InclusionNode::Branch(nested) => descend(run, nested, &path),
                    }
                }
            }
        }
    }
}

fn descend(run: &mut Run<'_>, tree: &InclusionTree, base: &NormalizedPath) {
    for (name, node) in tree.entries() {
        let path = base.join(name);
        match node {
            InclusionNode::Include(true) => apply(run, &path, None),
            InclusionNode::Include(false) => {}
            InclusionNode::Branch(nested) => descend(run, nested, &path),
        }
    }
}

/// Merge the selected `path`. `fallback_root` is set for entries directly
/// below a root, whose absence triggers a sweep of that root.
fn apply(run: &mut Run<'_>, path: &NormalizedPath, fallback_root: Option<&NormalizedPath>) {
    if !run.admit(path) {
        return;
    }
    let source = path.resolve(&run.layout.vendor_dir);
    match EntryKind::of(&source) {
        Some(EntryKind::Directory) => run.copy_directory_with_backup(&source, path),
        Some(EntryKind::File) => run.replace_file_with_backup(&source, path),
        None => {
            if let Some(root) = fallback_root {
                sweep_missing(run, root);
            }
            run.not_found(path);
        }
    }
}

/// Copy every vendor file below `root` the project does not have yet.
///
/// Existing project files are left alone, and selections nested below `root`
/// are not revisited.
fn sweep_missing(run: &mut Run<'_>, root: &NormalizedPath) {
    let source_root = root.resolve(&run.layout.vendor_dir);
    let walk = match TreeWalker::new(&source_root).walk() {
        Ok(walk) => walk,
        Err(e) => {
            tracing::debug!(%root, error = %e, "Nothing to recover");
            return;
        }
    };

    tracing::debug!(%root, "Recovering missing baseline files");
    for entry in walk {
        match entry {
            Ok(entry) if !entry.is_dir => {
                let logical = root.join(entry.path.as_str());
                run.add_if_missing(&entry.path.resolve(&source_root), false, &logical);
            }
            Ok(_) => {}
            Err(e) => run.fail(root, e),
        }
    }
}
