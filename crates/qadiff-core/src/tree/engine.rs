//! Recursive tree diff.
//!
//! Depth-first, pre-order. At each level the two mappings must agree on
//! length and key set before any key is descended into; a disagreement is
//! recorded once for that level and its subtree is skipped.

use crate::tree::model::{
    DiffEntry, LevelMismatch, LevelMismatchKind, TreeDiffResult, TreeNode,
};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::BTreeSet;

/// Diff two trees from the root.
pub fn diff_trees(left: &TreeNode, right: &TreeNode) -> TreeDiffResult {
    diff_at(left, right, &[])
}

/// Diff two subtrees whose position under the root is `path`.
///
/// Every reported path is prefixed with `path`.
pub fn diff_at(left: &TreeNode, right: &TreeNode, path: &[String]) -> TreeDiffResult {
    let mut walk = TreeWalk::default();
    let mut path = path.to_vec();

    match (left, right) {
        (TreeNode::Mapping(l), TreeNode::Mapping(r)) => walk.mappings(l, r, &mut path),
        (TreeNode::Scalar(l), TreeNode::Scalar(r)) if scalars_equal(l, r) => {}
        _ => walk.level_mismatch(
            &path,
            LevelMismatchKind::NonMappingRoot {
                left: left.kind(),
                right: right.kind(),
            },
        ),
    }

    walk.finish()
}

/// Scalar equality with numbers compared by value (`1 == 1.0`), including
/// numbers nested inside arrays and objects.
pub fn scalars_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
                x == y
            } else if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
                x == y
            } else {
                a.as_f64() == b.as_f64()
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| scalars_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(k, x)| b.get(k).is_some_and(|y| scalars_equal(x, y)))
        }
        _ => left == right,
    }
}

#[derive(Default)]
struct TreeWalk {
    entries: Vec<DiffEntry>,
    level_mismatches: Vec<LevelMismatch>,
}

impl TreeWalk {
    fn mappings(
        &mut self,
        left: &IndexMap<String, TreeNode>,
        right: &IndexMap<String, TreeNode>,
        path: &mut Vec<String>,
    ) {
        if left.len() != right.len() {
            self.level_mismatch(
                path,
                LevelMismatchKind::LengthMismatch {
                    left_len: left.len(),
                    right_len: right.len(),
                },
            );
            return;
        }

        let left_keys: BTreeSet<&str> = left.keys().map(String::as_str).collect();
        let right_keys: BTreeSet<&str> = right.keys().map(String::as_str).collect();
        if left_keys != right_keys {
            self.level_mismatch(
                path,
                LevelMismatchKind::KeySetMismatch {
                    only_left: left_keys
                        .difference(&right_keys)
                        .map(|k| k.to_string())
                        .collect(),
                    only_right: right_keys
                        .difference(&left_keys)
                        .map(|k| k.to_string())
                        .collect(),
                },
            );
            return;
        }

        for (key, left_node) in left {
            let Some(right_node) = right.get(key) else {
                continue;
            };
            path.push(key.clone());
            match (left_node, right_node) {
                (TreeNode::Mapping(l), TreeNode::Mapping(r)) => self.mappings(l, r, path),
                (TreeNode::Scalar(l), TreeNode::Scalar(r)) => {
                    if !scalars_equal(l, r) {
                        self.entries.push(DiffEntry {
                            path: path.clone(),
                            left_value: l.clone(),
                            right_value: r.clone(),
                        });
                    }
                }
                (l, r) => self.level_mismatch(
                    path,
                    LevelMismatchKind::TypeMismatch {
                        left: l.kind(),
                        right: r.kind(),
                    },
                ),
            }
            path.pop();
        }
    }

    fn level_mismatch(&mut self, path: &[String], kind: LevelMismatchKind) {
        self.level_mismatches.push(LevelMismatch {
            path: path.to_vec(),
            kind,
        });
    }

    fn finish(self) -> TreeDiffResult {
        TreeDiffResult {
            equal: self.entries.is_empty() && self.level_mismatches.is_empty(),
            entries: self.entries,
            level_mismatches: self.level_mismatches,
        }
    }
}
