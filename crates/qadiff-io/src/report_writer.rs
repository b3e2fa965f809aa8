//! Diff report persistence.
//!
//! Each report is written as `<stem>.json` (structured) and `<stem>.md`
//! (human summary), both via temp file + rename.

use crate::errors::{io_error, Result};
use qadiff_core::errors::DiffError;
use qadiff_core::report::{render_document_summary, ReportDocument};
use std::fs;
use std::path::{Path, PathBuf};

/// Paths of the files produced by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub json_path: PathBuf,
    pub summary_path: PathBuf,
}

/// Write `doc` into `dir` as `<stem>.json` and `<stem>.md`.
///
/// # Errors
///
/// - `Serialization`: the document could not be encoded
/// - `Io`: a file could not be written
pub fn write_report(dir: &Path, stem: &str, doc: &ReportDocument) -> Result<WrittenReport> {
    let json_path = dir.join(format!("{}.json", stem));
    let summary_path = dir.join(format!("{}.md", stem));

    let mut json = serde_json::to_vec_pretty(doc)
        .map_err(|e| DiffError::from(e).with_op("write_report"))?;
    json.push(b'\n');
    atomic_write(&json_path, &json)?;
    atomic_write(&summary_path, render_document_summary(doc).as_bytes())?;

    tracing::debug!(json = %json_path.display(), summary = %summary_path.display(), "report written");
    Ok(WrittenReport {
        json_path,
        summary_path,
    })
}

/// Atomically write bytes to a file
///
/// Uses temp file + rename so readers never see a partial report
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_report_dir", parent, e))?;
    }

    let mut temp_name = target_path.as_os_str().to_owned();
    temp_name.push(".tmp");
    let temp_path = PathBuf::from(temp_name);

    fs::write(&temp_path, content).map_err(|e| io_error("write_report_temp", &temp_path, e))?;
    fs::rename(&temp_path, target_path)
        .map_err(|e| io_error("rename_report_temp", target_path, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qadiff_core::report::{DiffReport, Verdict};
    use qadiff_core::tree::{diff_trees, TreeNode};
    use serde_json::json;
    use tempfile::TempDir;

    fn sample_doc() -> ReportDocument {
        let l = TreeNode::from(json!({"a": 1}));
        let r = TreeNode::from(json!({"a": 2}));
        ReportDocument::new("l.json", "r.json", DiffReport::from(diff_trees(&l, &r)))
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("nested").join("out.txt");

        atomic_write(&target, b"nested").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"nested");
    }

    #[test]
    fn test_write_report_emits_json_and_summary() {
        let temp_dir = TempDir::new().unwrap();
        let written = write_report(temp_dir.path(), "case_1", &sample_doc()).unwrap();

        let json: ReportDocument =
            serde_json::from_slice(&fs::read(&written.json_path).unwrap()).unwrap();
        assert_eq!(json.verdict, Verdict::ValuesDiffer);

        let summary = fs::read_to_string(&written.summary_path).unwrap();
        assert!(summary.contains("- `a`: `1` → `2`"));
    }

    #[test]
    fn test_no_tmp_files_after_write() {
        let temp_dir = TempDir::new().unwrap();
        write_report(temp_dir.path(), "clean", &sample_doc()).unwrap();

        let tmp_count = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .map(|s| s.ends_with(".tmp"))
                    .unwrap_or(false)
            })
            .count();
        assert_eq!(tmp_count, 0);
    }
}
