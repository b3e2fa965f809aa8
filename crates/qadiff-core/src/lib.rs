//! qadiff core - pure comparators for QA regression artifacts
//!
//! This crate provides:
//! - Image comparison: structural equality plus MSE and SSIM metrics
//! - Tree diff: path-qualified differences between nested key-value trees
//! - Table diff: row/column alignment and a sparse cell mismatch mask
//! - The shared diff report model and its Markdown summary
//! - The error and logging facilities used across the workspace
//!
//! Nothing in the comparators performs I/O or logs.

pub mod errors;
pub mod image;
pub mod logging_facility;
pub mod report;
pub mod table;
pub mod tree;

// Re-export commonly used types
pub use errors::{DiffError, DiffErrorKind, Result, TableError};
pub use image::{compare_images, ImageComparison, PixelGrid};
pub use report::{ArtifactKind, DiffReport, ReportDocument, Verdict};
pub use table::{diff_tables, Cell, Table, TableDiffResult};
pub use tree::{diff_trees, TreeDiffResult, TreeNode};
