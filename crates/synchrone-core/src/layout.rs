//! Where the vendored trees, the project, and the backups live
//!
//! All path fragments are fields of [`ResourceLayout`] so every run can be
//! pointed at temporary directories.

use std::path::{Path, PathBuf};

use synchrone_config::ConfigDocument;
use synchrone_fs::{DEFAULT_DIR_MODE, NormalizedPath};

/// Vendored resource tree merged by full and targeted updates.
pub const DEFAULT_VENDOR_DIR: &str = "vendor/epaphrodites/packages/src/epaphrodites/init-ressources";
/// Tree scanned for new components.
pub const DEFAULT_NEW_COMPONENTS_DIR: &str =
    "vendor/epaphrodites/packages/src/epaphrodites/new-ressources";
/// Root under which each run's backups are stored.
pub const DEFAULT_BACKUP_DIR: &str = "vendor/epaphrodites/packages/src/epaphrodites/old-ressources";

/// Directories reconciled wholesale by a full merge.
pub const DEFAULT_FULL_MERGE_DIRECTORIES: &[&str] = &["bin", "public/layouts", "config"];
/// Directories scanned for name correspondences by a new-component merge.
pub const DEFAULT_NEW_COMPONENT_DIRECTORIES: &[&str] = &["bin", "public/layouts"];
/// Top-level keys of `update_targets` a targeted merge honours.
pub const DEFAULT_TARGETED_ROOTS: &[&str] = &["bin", "public"];

/// Explicit path configuration for one project.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceLayout {
    /// The consuming project's working tree (merge target)
    pub project_root: PathBuf,
    /// Vendored resource tree (merge source for full/targeted merges)
    pub vendor_dir: PathBuf,
    /// New-component tree (merge source for new-component merges)
    pub new_components_dir: PathBuf,
    /// Root of all backup runs
    pub backup_dir: PathBuf,
    pub full_merge_directories: Vec<NormalizedPath>,
    pub new_component_directories: Vec<NormalizedPath>,
    pub targeted_roots: Vec<String>,
    /// Permission bits for created directories
    pub dir_mode: u32,
}

impl ResourceLayout {
    /// Default layout for a project rooted at `project_root`.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            vendor_dir: project_root.join(DEFAULT_VENDOR_DIR),
            new_components_dir: project_root.join(DEFAULT_NEW_COMPONENTS_DIR),
            backup_dir: project_root.join(DEFAULT_BACKUP_DIR),
            full_merge_directories: to_paths(DEFAULT_FULL_MERGE_DIRECTORIES.iter().copied()),
            new_component_directories: to_paths(DEFAULT_NEW_COMPONENT_DIRECTORIES.iter().copied()),
            targeted_roots: dedup(DEFAULT_TARGETED_ROOTS.iter().map(|s| s.to_string())),
            dir_mode: DEFAULT_DIR_MODE,
            project_root,
        }
    }

    /// Default layout with overrides from the document's `layout:` section.
    pub fn from_document(project_root: impl Into<PathBuf>, doc: &ConfigDocument) -> Self {
        let mut layout = Self::new(project_root);

        if let Some(vendor) = doc.string("layout.vendor") {
            layout.vendor_dir = layout.resolve(vendor);
        }
        if let Some(new_components) = doc.string("layout.new_components") {
            layout.new_components_dir = layout.resolve(new_components);
        }
        if let Some(backups) = doc.string("layout.backups") {
            layout.backup_dir = layout.resolve(backups);
        }
        if let Some(dirs) = doc.string_list("layout.full_merge") {
            layout.full_merge_directories = to_paths(dirs.iter().map(String::as_str));
        }
        if let Some(dirs) = doc.string_list("layout.new_component_directories") {
            layout.new_component_directories = to_paths(dirs.iter().map(String::as_str));
        }
        if let Some(roots) = doc.string_list("layout.targeted_roots") {
            layout.targeted_roots = dedup(roots);
        }

        tracing::debug!(
            vendor = ?layout.vendor_dir,
            backups = ?layout.backup_dir,
            "Resolved resource layout"
        );
        layout
    }

    pub fn with_vendor_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.vendor_dir = self.resolve(dir);
        self
    }

    pub fn with_new_components_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.new_components_dir = self.resolve(dir);
        self
    }

    pub fn with_backup_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.backup_dir = self.resolve(dir);
        self
    }

    /// Resolve a fragment against the project root; absolute paths pass through.
    pub fn resolve(&self, fragment: impl AsRef<Path>) -> PathBuf {
        self.project_root.join(fragment)
    }
}

fn to_paths<'a>(items: impl Iterator<Item = &'a str>) -> Vec<NormalizedPath> {
    let mut paths: Vec<NormalizedPath> = Vec::new();
    for path in items.map(NormalizedPath::new) {
        if !path.is_root() && !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

fn dedup(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
