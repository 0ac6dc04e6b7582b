//! Declarative inclusion tree for targeted updates
//!
//! Mirrors the `update_targets` section of the document. A leaf `true` selects
//! a file or a whole directory; a leaf `false`, any other scalar, or an absent
//! key leaves the path alone. Entries keep document order.

use serde_yaml::Value;
use synchrone_fs::NormalizedPath;

/// A node of the inclusion tree.
#[derive(Debug, Clone, PartialEq)]
pub enum InclusionNode {
    /// Leaf: `true` includes the path (and, for a directory, its whole subtree)
    Include(bool),
    /// Nested selection one level deeper
    Branch(InclusionTree),
}

impl InclusionNode {
    /// Convert a document value. Non-boolean scalars never include anything.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Bool(included) => Self::Include(*included),
            Value::Mapping(_) => Self::Branch(InclusionTree::from_value(value)),
            Value::Tagged(tagged) => Self::from_value(&tagged.value),
            _ => Self::Include(false),
        }
    }

    pub fn is_included(&self) -> bool {
        matches!(self, Self::Include(true))
    }
}

/// Ordered mapping of entry names to [`InclusionNode`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InclusionTree {
    entries: Vec<(String, InclusionNode)>,
}

impl InclusionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a mapping value; anything else gives an empty tree.
    pub fn from_value(value: &Value) -> Self {
        let Value::Mapping(map) = value else {
            return Self::default();
        };

        let entries = map
            .iter()
            .filter_map(|(key, value)| {
                let name = match key {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((name, InclusionNode::from_value(value)))
            })
            .collect();

        Self { entries }
    }

    /// Append an entry, builder style.
    pub fn with(mut self, name: impl Into<String>, node: InclusionNode) -> Self {
        self.entries.push((name.into(), node));
        self
    }

    pub fn get(&self, name: &str) -> Option<&InclusionNode> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, node)| node)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &InclusionNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every path selected with a leaf `true`, depth first in document order.
    pub fn included_paths(&self) -> Vec<NormalizedPath> {
        let mut paths = Vec::new();
        self.collect_included(&NormalizedPath::root(), &mut paths);
        paths
    }

    fn collect_included(&self, base: &NormalizedPath, out: &mut Vec<NormalizedPath>) {
        for (name, node) in self.entries() {
            let path = base.join(name);
            match node {
                InclusionNode::Include(true) => out.push(path),
                InclusionNode::Include(false) => {}
                InclusionNode::Branch(tree) => tree.collect_included(&path, out),
            }
        }
    }
}
