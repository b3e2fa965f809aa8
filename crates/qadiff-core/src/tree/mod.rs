//! Structural diff of nested key-value trees.
//!
//! ## Entry point
//!
//! ```
//! use qadiff_core::tree::{diff_trees, TreeNode};
//! use serde_json::json;
//!
//! let left = TreeNode::from(json!({"a": {"b": 1, "c": 2}}));
//! let right = TreeNode::from(json!({"a": {"b": 1, "c": 3}}));
//! let result = diff_trees(&left, &right);
//! assert_eq!(result.entries[0].rendered_path(), "a->c");
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: entry order is the pre-order walk of the left tree's
//!   key order; key-set equality itself ignores order.
//! - **Coarse structure**: a length, key-set or mapping/scalar disagreement
//!   is reported once for its level and nothing below it is enumerated.
//! - **Opaque sequences**: arrays are leaves.

pub mod engine;
pub mod model;

pub use engine::{diff_at, diff_trees};
pub use model::{DiffEntry, LevelMismatch, LevelMismatchKind, NodeKind, TreeDiffResult, TreeNode};
