//! [`TestProject`] builder for reconciliation scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Default vendored resource tree, relative to the project root.
pub const VENDOR_DIR: &str = "vendor/epaphrodites/packages/src/epaphrodites/init-ressources";
/// Default new-component tree, relative to the project root.
pub const NEW_COMPONENTS_DIR: &str = "vendor/epaphrodites/packages/src/epaphrodites/new-ressources";
/// Default backup root, relative to the project root.
pub const BACKUP_DIR: &str = "vendor/epaphrodites/packages/src/epaphrodites/old-ressources";

/// A temporary consuming project with helpers to seed the vendor, project and
/// new-component trees and to assert on the result.
///
/// # Example
///
/// ```rust,no_run
/// use synchrone_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.vendor_file("bin/Config.ini", "A");
/// project.project_file("bin/Config.ini", "B");
/// project.assert_file_contains("bin/Config.ini", "B");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create an empty temporary project directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the project root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of the vendored resource tree.
    pub fn vendor_root(&self) -> PathBuf {
        self.root().join(VENDOR_DIR)
    }

    /// Absolute path of the new-component tree.
    pub fn new_components_root(&self) -> PathBuf {
        self.root().join(NEW_COMPONENTS_DIR)
    }

    /// Absolute path of the backup root.
    pub fn backup_root(&self) -> PathBuf {
        self.root().join(BACKUP_DIR)
    }

    /// Write a file below the vendored resource tree.
    pub fn vendor_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.vendor_root().join(rel), content)
    }

    /// Create an (empty) directory below the vendored resource tree.
    pub fn vendor_dir(&self, rel: &str) -> PathBuf {
        make_dir(&self.vendor_root().join(rel))
    }

    /// Write a file below the new-component tree.
    pub fn new_component_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.new_components_root().join(rel), content)
    }

    /// Write a file in the project itself.
    pub fn project_file(&self, rel: &str, content: &str) -> PathBuf {
        write_file(&self.root().join(rel), content)
    }

    /// Create a directory in the project itself.
    pub fn project_dir(&self, rel: &str) -> PathBuf {
        make_dir(&self.root().join(rel))
    }

    /// Write `synchrone-config.yaml` at the project root.
    pub fn write_config(&self, yaml: &str) -> PathBuf {
        write_file(&self.root().join("synchrone-config.yaml"), yaml)
    }

    /// Read a project file relative to the root.
    pub fn read(&self, rel: &str) -> String {
        let path = self.root().join(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// The single backup run directory; panics unless exactly one run exists.
    pub fn only_backup_run(&self) -> PathBuf {
        let runs = self.backup_runs();
        assert_eq!(runs.len(), 1, "Expected exactly one backup run, found {runs:?}");
        runs.into_iter().next().unwrap()
    }

    /// All run directories under the backup root, sorted by name.
    pub fn backup_runs(&self) -> Vec<PathBuf> {
        let Ok(entries) = fs::read_dir(self.backup_root()) else {
            return Vec::new();
        };
        let mut runs: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .collect();
        runs.sort();
        runs
    }

    /// Every file below `dir`, as sorted forward-slash relative paths.
    pub fn files_under(&self, dir: &Path) -> Vec<String> {
        let mut files: Vec<String> = WalkDir::new(dir)
            .min_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                e.path()
                    .strip_prefix(dir)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect();
        files.sort();
        files
    }

    /// Assert that `path` (relative to the project root) exists.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the project root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to root) contains `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

fn make_dir(path: &Path) -> PathBuf {
    fs::create_dir_all(path).unwrap();
    path.to_path_buf()
}
