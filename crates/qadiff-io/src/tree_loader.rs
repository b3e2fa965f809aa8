//! JSON document parsing into key-value trees.

use crate::errors::{decode_error, io_error, Result};
use qadiff_core::tree::TreeNode;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read and parse a JSON file, keeping object keys in document order.
///
/// # Errors
///
/// - `Io`: the file could not be read
/// - `Decode`: the content is not valid JSON
pub fn load_tree(path: &Path) -> Result<TreeNode> {
    let bytes = fs::read(path).map_err(|e| io_error("read_json", path, e))?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| decode_error("parse_json", path, e.to_string()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "parsed json");
    Ok(TreeNode::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qadiff_core::errors::DiffErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_document_key_order_is_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, r#"{"zeta": 1, "alpha": {"m": 2, "b": 3}}"#).unwrap();

        let TreeNode::Mapping(root) = load_tree(&path).unwrap() else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = root.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);

        let TreeNode::Mapping(inner) = &root["alpha"] else {
            panic!("expected mapping");
        };
        let keys: Vec<&str> = inner.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["m", "b"]);
    }

    #[test]
    fn test_invalid_json_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"a\": ").unwrap();

        let err = load_tree(&path).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::Decode);
        assert_eq!(err.op(), Some("parse_json"));
    }
}
