//! Shared diff report model.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.

use crate::image::ImageComparison;
use crate::table::TableDiffResult;
use crate::tree::TreeDiffResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema version of [`ReportDocument`].
pub const REPORT_SCHEMA_VERSION: u32 = 1;

/// Which comparator produced a report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Image,
    Tree,
    Table,
}

impl ArtifactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Image => "image",
            ArtifactKind::Tree => "tree",
            ArtifactKind::Table => "table",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overall outcome of a completed comparison.
///
/// "Not comparable" is not a verdict; it is an error from the comparator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Equal,
    /// Shapes line up but at least one value differs
    ValuesDiffer,
    /// Shapes are incompatible (level mismatch, row count, column set)
    StructureDiffers,
}

impl Verdict {
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Equal => "Equal",
            Verdict::ValuesDiffer => "Values Differ",
            Verdict::StructureDiffers => "Structure Differs",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The result of any one comparator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum DiffReport {
    Image(ImageComparison),
    Tree(TreeDiffResult),
    Table(TableDiffResult),
}

impl DiffReport {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            DiffReport::Image(_) => ArtifactKind::Image,
            DiffReport::Tree(_) => ArtifactKind::Tree,
            DiffReport::Table(_) => ArtifactKind::Table,
        }
    }

    pub fn verdict(&self) -> Verdict {
        match self {
            DiffReport::Image(r) if r.is_equal() => Verdict::Equal,
            DiffReport::Image(_) => Verdict::ValuesDiffer,
            DiffReport::Tree(r) if r.has_structural_mismatch() => Verdict::StructureDiffers,
            DiffReport::Tree(r) if r.equal => Verdict::Equal,
            DiffReport::Tree(_) => Verdict::ValuesDiffer,
            DiffReport::Table(r) if r.shape_mismatch.is_some() => Verdict::StructureDiffers,
            DiffReport::Table(r) if r.equal => Verdict::Equal,
            DiffReport::Table(_) => Verdict::ValuesDiffer,
        }
    }

    pub fn is_equal(&self) -> bool {
        self.verdict() == Verdict::Equal
    }
}

impl From<ImageComparison> for DiffReport {
    fn from(r: ImageComparison) -> Self {
        DiffReport::Image(r)
    }
}

impl From<TreeDiffResult> for DiffReport {
    fn from(r: TreeDiffResult) -> Self {
        DiffReport::Tree(r)
    }
}

impl From<TableDiffResult> for DiffReport {
    fn from(r: TableDiffResult) -> Self {
        DiffReport::Table(r)
    }
}

/// A report together with the artifacts it describes, as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportDocument {
    /// Always [`REPORT_SCHEMA_VERSION`]
    pub report_schema_version: u32,
    /// Baseline artifact label (usually a path)
    pub source: String,
    /// Candidate artifact label
    pub target: String,
    pub verdict: Verdict,
    pub report: DiffReport,
}

impl ReportDocument {
    pub fn new(source: impl Into<String>, target: impl Into<String>, report: DiffReport) -> Self {
        Self {
            report_schema_version: REPORT_SCHEMA_VERSION,
            source: source.into(),
            target: target.into(),
            verdict: report.verdict(),
            report,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{diff_trees, TreeNode};
    use serde_json::json;

    #[test]
    fn test_tree_verdicts() {
        let a = TreeNode::from(json!({"a": 1}));
        let b = TreeNode::from(json!({"a": 2}));
        let c = TreeNode::from(json!({"b": 1}));

        assert_eq!(DiffReport::from(diff_trees(&a, &a)).verdict(), Verdict::Equal);
        assert_eq!(
            DiffReport::from(diff_trees(&a, &b)).verdict(),
            Verdict::ValuesDiffer
        );
        assert_eq!(
            DiffReport::from(diff_trees(&a, &c)).verdict(),
            Verdict::StructureDiffers
        );
    }

    #[test]
    fn test_report_serializes_with_kind_tag() {
        let a = TreeNode::from(json!({"a": 1}));
        let report = DiffReport::from(diff_trees(&a, &a));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["kind"], "tree");
        assert_eq!(value["result"]["equal"], true);
    }

    #[test]
    fn test_document_records_verdict() {
        let a = TreeNode::from(json!({"a": 1}));
        let b = TreeNode::from(json!({"a": 2}));
        let doc = ReportDocument::new("left.json", "right.json", diff_trees(&a, &b).into());
        assert_eq!(doc.report_schema_version, REPORT_SCHEMA_VERSION);
        assert_eq!(doc.verdict, Verdict::ValuesDiffer);
        assert_eq!(doc.report.kind(), ArtifactKind::Tree);
    }
}
