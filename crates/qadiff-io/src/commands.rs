//! File-level comparison commands.
//!
//! ## Logging Ownership
//!
//! This layer owns lifecycle logging for comparisons:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Loaders use only `tracing::debug!()`; the comparators never log.

use crate::errors::Result;
use crate::format::require_format;
use crate::image_loader::load_pixel_grid;
use crate::table_loader::load_table;
use crate::tree_loader::load_tree;
use qadiff_core::image::compare_images;
use qadiff_core::report::{ArtifactKind, DiffReport, ReportDocument};
use qadiff_core::table::diff_tables;
use qadiff_core::tree::diff_trees;
use qadiff_core::{log_op_end, log_op_error, log_op_start};
use std::path::Path;
use std::time::Instant;

/// Compare two image files.
///
/// Both extensions are validated before either file is decoded.
///
/// # Errors
///
/// - `UnsupportedFormat`: either path is not `jpg`, `jpeg` or `png`
/// - `Io` / `Decode`: a file could not be read or decoded
/// - `EmptyImage` / `ShapeMismatch` / `InvalidInput`: not comparable
pub fn compare_image_files(
    source: &Path,
    target: &Path,
    baseline_width: usize,
) -> Result<ReportDocument> {
    log_op_start!(
        "compare_image_files",
        source = %source.display(),
        target = %target.display(),
        baseline_width = baseline_width as u64
    );
    let start = Instant::now();

    let result = compare_image_files_impl(source, target, baseline_width);
    finish("compare_image_files", start, result)
}

fn compare_image_files_impl(
    source: &Path,
    target: &Path,
    baseline_width: usize,
) -> Result<ReportDocument> {
    require_format(source, ArtifactKind::Image)?;
    require_format(target, ArtifactKind::Image)?;
    let source_grid = load_pixel_grid(source)?;
    let target_grid = load_pixel_grid(target)?;
    let comparison = compare_images(&source_grid, &target_grid, baseline_width)
        .map_err(|e| {
            e.with_artifact(format!("{} vs {}", source.display(), target.display()))
        })?;
    Ok(document(source, target, comparison.into()))
}

/// Compare two JSON files as key-value trees.
///
/// # Errors
///
/// - `UnsupportedFormat`: either path is not `json`
/// - `Io` / `Decode`: a file could not be read or parsed
pub fn compare_json_files(left: &Path, right: &Path) -> Result<ReportDocument> {
    log_op_start!(
        "compare_json_files",
        source = %left.display(),
        target = %right.display()
    );
    let start = Instant::now();

    let result = compare_json_files_impl(left, right);
    finish("compare_json_files", start, result)
}

fn compare_json_files_impl(left: &Path, right: &Path) -> Result<ReportDocument> {
    require_format(left, ArtifactKind::Tree)?;
    require_format(right, ArtifactKind::Tree)?;
    let left_tree = load_tree(left)?;
    let right_tree = load_tree(right)?;
    Ok(document(
        left,
        right,
        diff_trees(&left_tree, &right_tree).into(),
    ))
}

/// Compare two tabular files, optionally aligning rows by `key_column`.
///
/// # Errors
///
/// - `UnsupportedFormat`: either path is not `csv`, `xls` or `xlsx`
/// - `Io` / `Decode` / `InvalidTable`: a file could not be loaded
pub fn compare_table_files(
    left: &Path,
    right: &Path,
    key_column: Option<&str>,
) -> Result<ReportDocument> {
    log_op_start!(
        "compare_table_files",
        source = %left.display(),
        target = %right.display(),
        key_column = key_column.unwrap_or("")
    );
    let start = Instant::now();

    let result = compare_table_files_impl(left, right, key_column);
    finish("compare_table_files", start, result)
}

fn compare_table_files_impl(
    left: &Path,
    right: &Path,
    key_column: Option<&str>,
) -> Result<ReportDocument> {
    require_format(left, ArtifactKind::Table)?;
    require_format(right, ArtifactKind::Table)?;
    let left_table = load_table(left)?;
    let right_table = load_table(right)?;
    Ok(document(
        left,
        right,
        diff_tables(&left_table, &right_table, key_column).into(),
    ))
}

fn document(source: &Path, target: &Path, report: DiffReport) -> ReportDocument {
    ReportDocument::new(
        source.display().to_string(),
        target.display().to_string(),
        report,
    )
}

/// Emit the end (or error) event and tag the error with `op` if untagged.
fn finish(
    op: &'static str,
    start: Instant,
    result: Result<ReportDocument>,
) -> Result<ReportDocument> {
    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(doc) => {
            log_op_end!(op, duration_ms = duration_ms, verdict = doc.verdict.label());
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms);
        }
    }
    result.map_err(|e| if e.op().is_some() { e } else { e.with_op(op) })
}
