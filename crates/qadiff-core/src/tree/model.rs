//! Key-value tree types and tree diff output.
//!
//! All output types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Paths are stored as key sequences; `->` is only a rendering separator.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Separator used when a path is rendered for humans.
pub const PATH_SEPARATOR: &str = "->";

/// A parsed key-value tree.
///
/// Sequences are opaque scalars: an array is compared as one value, never
/// element by element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Mapping from unique string keys to subtrees, in document order
    Mapping(IndexMap<String, TreeNode>),
    /// Leaf value: string, number, bool, null or an opaque sequence
    Scalar(Value),
}

impl TreeNode {
    /// Build a mapping node from `(key, node)` pairs. Later duplicates win.
    pub fn mapping<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TreeNode)>,
    {
        TreeNode::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Build a scalar node.
    pub fn scalar(value: impl Into<Value>) -> Self {
        TreeNode::from(value.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            TreeNode::Mapping(_) => NodeKind::Mapping,
            TreeNode::Scalar(_) => NodeKind::Scalar,
        }
    }

    /// Number of keys for a mapping, `None` for a scalar.
    pub fn len(&self) -> Option<usize> {
        match self {
            TreeNode::Mapping(map) => Some(map.len()),
            TreeNode::Scalar(_) => None,
        }
    }
}

impl From<Value> for TreeNode {
    /// Objects become mappings recursively; everything else is a scalar.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => TreeNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, TreeNode::from(v)))
                    .collect(),
            ),
            other => TreeNode::Scalar(other),
        }
    }
}

/// Variant tag of a [`TreeNode`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Mapping,
    Scalar,
}

/// One scalar leaf whose values differ between the two trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiffEntry {
    /// Keys from the root down to the differing leaf
    pub path: Vec<String>,
    pub left_value: Value,
    pub right_value: Value,
}

impl DiffEntry {
    /// `a->b->c`
    pub fn rendered_path(&self) -> String {
        render_path(&self.path)
    }
}

/// A structural incompatibility at one level; descent stops there.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LevelMismatch {
    /// Keys from the root down to the mismatched level (empty = root)
    pub path: Vec<String>,
    pub kind: LevelMismatchKind,
}

impl LevelMismatch {
    pub fn rendered_path(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_string()
        } else {
            render_path(&self.path)
        }
    }
}

/// Why a level could not be compared key by key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LevelMismatchKind {
    /// The compared roots are not both mappings (and not equal scalars)
    NonMappingRoot { left: NodeKind, right: NodeKind },
    /// The two mappings have different numbers of keys
    LengthMismatch { left_len: usize, right_len: usize },
    /// Same number of keys, different key sets (both lists sorted)
    KeySetMismatch {
        only_left: Vec<String>,
        only_right: Vec<String>,
    },
    /// A key holds a mapping on one side and a scalar on the other
    TypeMismatch { left: NodeKind, right: NodeKind },
}

/// The result of diffing two trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeDiffResult {
    /// No level mismatch and no differing leaf anywhere
    pub equal: bool,
    /// Differing leaves, in pre-order following the left tree's key order
    pub entries: Vec<DiffEntry>,
    /// Levels whose shape prevented key-by-key comparison
    pub level_mismatches: Vec<LevelMismatch>,
}

impl TreeDiffResult {
    pub fn has_structural_mismatch(&self) -> bool {
        !self.level_mismatches.is_empty()
    }
}

/// Join keys with [`PATH_SEPARATOR`].
pub fn render_path(path: &[String]) -> String {
    path.join(PATH_SEPARATOR)
}
