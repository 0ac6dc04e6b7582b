//! Full merge: reconcile whole vendor directories into the project
//!
//! Selective-additive. Every vendor file is added or backed up and replaced;
//! nothing the vendor tree lacks is ever removed from the project.

use synchrone_fs::NormalizedPath;

use super::primitives::Run;

pub(crate) fn merge(run: &mut Run<'_>, directories: &[NormalizedPath]) {
    for directory in directories {
        if !run.admit(directory) {
            continue;
        }
        let source = directory.resolve(&run.layout.vendor_dir);
        if !source.is_dir() {
            tracing::debug!(%directory, "Vendor directory absent, skipping");
            continue;
        }
        tracing::info!(%directory, "Merging directory");
        run.copy_directory_with_backup(&source, directory);
    }
}
