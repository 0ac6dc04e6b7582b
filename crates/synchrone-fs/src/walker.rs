//! Depth-first traversal of a resource tree
//!
//! Yields every entry below a root as a path relative to that root, parents
//! before their children, siblings in file-name order. Each call to
//! [`TreeWalker::walk`] re-opens the directory, so a walker can be restarted.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{EntryKind, Error, NormalizedPath, Result};

/// One entry produced by a [`TreeWalker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// Path relative to the walk root
    pub path: NormalizedPath,
    /// Whether the entry is a directory (symlinks are never directories)
    pub is_dir: bool,
}

/// Recursive walker over a source directory.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    root: PathBuf,
}

impl TreeWalker {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Start a lazy traversal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotADirectory`] if the root is missing or is not a
    /// directory. Errors met while reading individual entries are yielded by
    /// the iterator.
    pub fn walk(&self) -> Result<Walk> {
        if !self.root.is_dir() {
            return Err(Error::NotADirectory {
                path: self.root.clone(),
            });
        }

        let inner = WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        Ok(Walk {
            root: self.root.clone(),
            inner,
        })
    }

    /// List the immediate children of the root (one level, sorted by name).
    pub fn children(&self) -> Result<Vec<(String, EntryKind)>> {
        if !self.root.is_dir() {
            return Err(Error::NotADirectory {
                path: self.root.clone(),
            });
        }

        let mut children = Vec::new();
        let entries = std::fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.root, e))?;
            let kind = if entry
                .file_type()
                .map_err(|e| Error::io(entry.path(), e))?
                .is_dir()
            {
                EntryKind::Directory
            } else {
                EntryKind::File
            };
            children.push((entry.file_name().to_string_lossy().into_owned(), kind));
        }
        children.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(children)
    }
}

/// Iterator returned by [`TreeWalker::walk`].
pub struct Walk {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Iterator for Walk {
    type Item = Result<WalkEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = match self.inner.next()? {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                return Some(Err(Error::io(path, e.into())));
            }
        };

        let relative = entry
            .path()
            .strip_prefix(&self.root)
            .unwrap_or_else(|_| entry.path());

        Some(Ok(WalkEntry {
            path: NormalizedPath::new(relative),
            is_dir: entry.file_type().is_dir(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn collect(root: &Path) -> Vec<(String, bool)> {
        TreeWalker::new(root)
            .walk()
            .unwrap()
            .map(|e| {
                let e = e.unwrap();
                (e.path.as_str().to_string(), e.is_dir)
            })
            .collect()
    }

    #[test]
    fn walk_yields_parents_first_in_name_order() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        fs::write(temp.path().join("config/Config.ini"), "a").unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();

        assert_eq!(
            collect(temp.path()),
            vec![
                ("a.txt".to_string(), false),
                ("b".to_string(), true),
                ("config".to_string(), true),
                ("config/Config.ini".to_string(), false),
            ]
        );
    }

    #[test]
    fn walk_missing_root_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let result = TreeWalker::new(temp.path().join("absent")).walk();
        assert!(matches!(result, Err(Error::NotADirectory { .. })));
    }

    #[test]
    fn walk_file_root_is_not_a_directory() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            TreeWalker::new(&file).walk(),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn walk_is_restartable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.txt"), "1").unwrap();
        let walker = TreeWalker::new(temp.path());

        assert_eq!(walker.walk().unwrap().count(), 1);
        fs::write(temp.path().join("two.txt"), "2").unwrap();
        assert_eq!(walker.walk().unwrap().count(), 2);
    }

    #[test]
    fn children_lists_one_level() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("layouts/deep")).unwrap();
        fs::write(temp.path().join("index.php"), "x").unwrap();

        let children = TreeWalker::new(temp.path()).children().unwrap();
        assert_eq!(
            children,
            vec![
                ("index.php".to_string(), EntryKind::File),
                ("layouts".to_string(), EntryKind::Directory),
            ]
        );
    }
}
