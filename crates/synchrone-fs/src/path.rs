//! Normalized relative path handling
//!
//! Every item the engine touches is addressed by a path relative to a merge root
//! (`bin/config/Config.ini`). The same logical path is resolved under the vendor
//! tree, the project tree, and the run's backup directory, so it is kept in one
//! platform-independent form and only converted at I/O boundaries.

use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// A relative path normalized to forward slashes without empty segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Backslashes become forward slashes; empty and `.` segments are dropped
    /// and `..` cancels the segment before it. A `..` with nothing left to
    /// cancel is kept, see [`NormalizedPath::escapes_root`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        let raw = path.as_ref().to_string_lossy().replace('\\', "/");
        let mut segments: Vec<&str> = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." if segments.last().is_some_and(|last| *last != "..") => {
                    segments.pop();
                }
                _ => segments.push(segment),
            }
        }
        Self {
            inner: segments.join("/"),
        }
    }

    /// The empty path, addressing a merge root itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// True for the merge root itself.
    pub fn is_root(&self) -> bool {
        self.inner.is_empty()
    }

    /// Convert to a platform-native relative PathBuf.
    pub fn to_native(&self) -> PathBuf {
        self.segments().collect()
    }

    /// Whether resolving this path would leave the directory it is resolved
    /// under: a leading `..`, or a segment the platform reads as a drive or
    /// root prefix.
    pub fn escapes_root(&self) -> bool {
        self.segments().any(|segment| {
            let mut components = Path::new(segment).components();
            !matches!(
                (components.next(), components.next()),
                (Some(Component::Normal(_)), None)
            )
        })
    }

    /// Resolve this path under `base`, refusing paths that escape it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathEscape`] if [`NormalizedPath::escapes_root`] holds.
    pub fn try_resolve(&self, base: &Path) -> Result<PathBuf> {
        if self.escapes_root() {
            return Err(Error::PathEscape {
                path: self.inner.clone(),
                base: base.to_path_buf(),
            });
        }
        Ok(self.resolve(base))
    }

    /// Resolve this path under `base`.
    pub fn resolve(&self, base: &Path) -> PathBuf {
        let mut resolved = base.to_path_buf();
        for segment in self.segments() {
            resolved.push(segment);
        }
        resolved
    }

    /// Join this path with a (possibly multi-segment) relative segment.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        let tail = Self::new(segment);
        match (self.is_root(), tail.is_root()) {
            (true, _) => tail,
            (false, true) => self.clone(),
            (false, false) => Self::new(format!("{}/{}", self.inner, tail.inner)),
        }
    }

    /// Get the parent path, `None` for single-segment paths and the root.
    pub fn parent(&self) -> Option<Self> {
        self.inner.rfind('/').map(|idx| Self {
            inner: self.inner[..idx].to_string(),
        })
    }

    /// Get the final component.
    pub fn file_name(&self) -> Option<&str> {
        if self.is_root() {
            None
        } else {
            self.inner.rsplit('/').next()
        }
    }

    /// Iterate over the path's segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.inner.split('/').filter(|s| !s.is_empty())
    }

    /// Number of segments; the root has depth zero.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Check whether `self` lies at or below `ancestor`.
    pub fn starts_with(&self, ancestor: &NormalizedPath) -> bool {
        ancestor.is_root()
            || self.inner == ancestor.inner
            || self
                .inner
                .strip_prefix(ancestor.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            write!(f, ".")
        } else {
            write!(f, "{}", self.inner)
        }
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
