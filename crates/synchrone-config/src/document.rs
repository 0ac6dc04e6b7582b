//! The parsed update document
//!
//! A [`ConfigDocument`] is a read-only tree of nested mappings and scalars. The
//! engine never inspects YAML itself; it goes through the narrow lookup methods
//! here (`get`, `exists`, `is_update_type_enabled`, `update_targets`,
//! `should_update`).

use std::fs;
use std::path::Path;

use serde_yaml::Value;

use crate::{Error, InclusionNode, InclusionTree, Result};

/// File name looked up at the project root when no explicit path is given.
pub const DEFAULT_DOCUMENT_NAME: &str = "synchrone-config.yaml";

/// Documents larger than this are rejected before parsing.
pub const MAX_DOCUMENT_SIZE: u64 = 1024 * 1024;

/// Parsed `synchrone-config.yaml`.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Value,
}

impl Default for ConfigDocument {
    fn default() -> Self {
        Self {
            root: Value::Mapping(Default::default()),
        }
    }
}

impl ConfigDocument {
    /// Load and parse a document from disk.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if nothing exists at `path`
    /// - [`Error::ConfigTooLarge`] past [`MAX_DOCUMENT_SIZE`]
    /// - [`Error::InvalidConfig`] if the content is not valid YAML
    pub fn load(path: &Path) -> Result<Self> {
        let meta = match fs::metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(synchrone_fs::Error::io(path, e).into()),
        };
        if meta.len() > MAX_DOCUMENT_SIZE {
            return Err(Error::ConfigTooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                max: MAX_DOCUMENT_SIZE,
            });
        }

        let content = synchrone_fs::io::read_text(path)?;
        tracing::debug!(?path, "Loading update document");
        Self::parse(&content).map_err(|e| Error::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parse a document from YAML text. An empty document is an empty mapping.
    pub fn parse(content: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(content).map_err(|e| Error::Parse {
            message: e.to_string(),
        })?;
        match root {
            Value::Null => Ok(Self::default()),
            Value::Mapping(_) => Ok(Self { root }),
            other => Err(Error::Parse {
                message: format!("expected a mapping at the top level, found {}", kind_of(&other)),
            }),
        }
    }

    /// The whole parsed tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Look up a value by explicit path segments.
    ///
    /// Use this when a key itself contains dots, e.g. `["update_targets", "bin",
    /// "config", "Config.ini"]`.
    pub fn get_segments(&self, segments: &[&str]) -> Option<&Value> {
        segments
            .iter()
            .try_fold(&self.root, |current, segment| match current {
                Value::Mapping(map) => map.get(*segment),
                _ => None,
            })
    }

    /// Look up a value by dotted path (`update.type.all`).
    pub fn get(&self, dotted: &str) -> Option<&Value> {
        let segments: Vec<&str> = dotted.split('.').collect();
        self.get_segments(&segments)
    }

    /// Look up a value, falling back to `default` when the path is absent.
    pub fn get_or<'a>(&'a self, dotted: &str, default: &'a Value) -> &'a Value {
        self.get(dotted).unwrap_or(default)
    }

    /// Check whether a dotted path exists (its value may be null or false).
    pub fn exists(&self, dotted: &str) -> bool {
        self.get(dotted).is_some()
    }

    /// String value at a dotted path.
    pub fn string(&self, dotted: &str) -> Option<&str> {
        self.get(dotted).and_then(Value::as_str)
    }

    /// List of strings at a dotted path; non-string items are ignored.
    pub fn string_list(&self, dotted: &str) -> Option<Vec<String>> {
        self.get(dotted).and_then(Value::as_sequence).map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
    }

    /// Framework version declared by the document.
    pub fn version(&self) -> Option<&str> {
        self.string("version")
    }

    /// Package name declared by the document.
    pub fn package(&self) -> Option<&str> {
        self.string("package")
    }

    /// Whether `update.type.<name>` is set to boolean `true`.
    pub fn is_update_type_enabled(&self, name: &str) -> bool {
        matches!(
            self.get_segments(&["update", "type", name]),
            Some(Value::Bool(true))
        )
    }

    /// The `update_targets` tree, or one section of it.
    ///
    /// Missing sections yield an empty tree.
    pub fn update_targets(&self, section: Option<&str>) -> InclusionTree {
        let value = match section {
            Some(section) => self.get_segments(&["update_targets", section]),
            None => self.get_segments(&["update_targets"]),
        };
        value.map(InclusionTree::from_value).unwrap_or_default()
    }

    /// Whether `item` of `section` is selected for update.
    ///
    /// An explicit entry for the item decides; otherwise the whole section must
    /// be set to `true`.
    pub fn should_update(&self, section: &str, item: &str) -> bool {
        if let Some(value) = self.get_segments(&["update_targets", section, item]) {
            return match InclusionNode::from_value(value) {
                InclusionNode::Include(included) => included,
                InclusionNode::Branch(tree) => !tree.is_empty(),
            };
        }
        matches!(
            self.get_segments(&["update_targets", section]),
            Some(Value::Bool(true))
        )
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
version: "v0.01-stable"
package: "packages/epaphrodites"
update:
  type:
    all: true
    specific: false
    new: "yes"
update_targets:
  bin:
    config:
      Config.ini: true
      email.ini: false
  public: true
"#;

    #[test]
    fn dotted_lookup_and_defaults() {
        let doc = ConfigDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("update.type.all"), Some(&Value::Bool(true)));
        assert_eq!(doc.get("update.type.missing"), None);

        let fallback = Value::Bool(false);
        assert_eq!(doc.get_or("update.type.missing", &fallback), &fallback);
        assert!(doc.exists("update.type.specific"));
        assert!(!doc.exists("update.kind"));
    }

    #[test]
    fn update_type_requires_boolean_true() {
        let doc = ConfigDocument::parse(SAMPLE).unwrap();
        assert!(doc.is_update_type_enabled("all"));
        assert!(!doc.is_update_type_enabled("specific"));
        assert!(!doc.is_update_type_enabled("new"));
        assert!(!doc.is_update_type_enabled("absent"));
    }

    #[test]
    fn dotted_keys_need_segment_lookup() {
        let doc = ConfigDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.get("update_targets.bin.config.Config.ini"), None);
        assert_eq!(
            doc.get_segments(&["update_targets", "bin", "config", "Config.ini"]),
            Some(&Value::Bool(true))
        );
    }

    #[test]
    fn should_update_prefers_item_then_section() {
        let doc = ConfigDocument::parse(SAMPLE).unwrap();
        assert!(doc.should_update("bin", "config"));
        assert!(!doc.should_update("bin", "database"));
        assert!(doc.should_update("public", "layouts"));
    }

    #[test]
    fn metadata_accessors() {
        let doc = ConfigDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.version(), Some("v0.01-stable"));
        assert_eq!(doc.package(), Some("packages/epaphrodites"));
    }

    #[test]
    fn empty_document_is_empty_mapping() {
        let doc = ConfigDocument::parse("").unwrap();
        assert!(!doc.is_update_type_enabled("all"));
        assert!(doc.update_targets(None).is_empty());
    }

    #[test]
    fn scalar_document_is_rejected() {
        assert!(matches!(
            ConfigDocument::parse("just a string"),
            Err(Error::Parse { .. })
        ));
    }
}
