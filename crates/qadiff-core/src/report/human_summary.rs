//! Human-readable summary renderer for diff reports.

use crate::image::ImageComparison;
use crate::report::model::{DiffReport, ReportDocument};
use crate::table::{KeySort, TableDiffResult, TableShapeMismatch};
use crate::tree::{LevelMismatchKind, TreeDiffResult};
use serde_json::Value;

/// Render a Markdown summary of a [`DiffReport`].
///
/// Informational only; the structured report is authoritative.
pub fn render_human_summary(report: &DiffReport) -> String {
    let mut out = String::new();

    let title = match report {
        DiffReport::Image(_) => "Image Diff",
        DiffReport::Tree(_) => "Tree Diff",
        DiffReport::Table(_) => "Table Diff",
    };
    out.push_str(&format!("## {title}\n\n"));
    out.push_str(&format!("**Verdict**: {}\n\n", report.verdict()));

    match report {
        DiffReport::Image(r) => render_image(&mut out, r),
        DiffReport::Tree(r) => render_tree(&mut out, r),
        DiffReport::Table(r) => render_table(&mut out, r),
    }
    out
}

/// Same as [`render_human_summary`], preceded by the artifact labels.
pub fn render_document_summary(doc: &ReportDocument) -> String {
    let mut out = format!(
        "**Source**: `{}`  \n**Target**: `{}`\n\n",
        doc.source, doc.target
    );
    out.push_str(&render_human_summary(&doc.report));
    out
}

fn render_image(out: &mut String, r: &ImageComparison) {
    let (h, w, c) = r.compared_shape;
    out.push_str(&format!(
        "| Metric | Value |\n\
         |---|---|\n\
         | Structurally equal | {} |\n\
         | MSE | {:.6} |\n\
         | SSIM | {:.6} |\n\
         | Compared shape | {}x{}x{} |\n\
         | Target resized | {} |\n\n",
        yes_no(r.structurally_equal),
        r.mse,
        r.ssim,
        h,
        w,
        c,
        yes_no(r.target_resized),
    ));

    if r.structurally_equal {
        out.push_str("_No pixel differences detected._\n");
        return;
    }

    out.push_str("### Channel Differences\n\n");
    for (channel, count) in r.channel_diff_nonzero.iter().enumerate() {
        out.push_str(&format!("- channel {}: {} pixel(s)\n", channel, count));
    }
    out.push('\n');
}

fn render_tree(out: &mut String, r: &TreeDiffResult) {
    if r.equal {
        out.push_str("_No differences detected._\n");
        return;
    }

    if !r.level_mismatches.is_empty() {
        out.push_str("### Level Mismatches\n\n");
        for m in &r.level_mismatches {
            let detail = match &m.kind {
                LevelMismatchKind::NonMappingRoot { left, right } => {
                    format!("not both mappings (left {:?}, right {:?})", left, right)
                }
                LevelMismatchKind::LengthMismatch {
                    left_len,
                    right_len,
                } => format!("key count {} vs {}", left_len, right_len),
                LevelMismatchKind::KeySetMismatch {
                    only_left,
                    only_right,
                } => format!(
                    "keys only in left [{}], only in right [{}]",
                    only_left.join(", "),
                    only_right.join(", ")
                ),
                LevelMismatchKind::TypeMismatch { left, right } => {
                    format!("type {:?} vs {:?}", left, right)
                }
            };
            out.push_str(&format!("- `{}`: {}\n", m.rendered_path(), detail));
        }
        out.push('\n');
    }

    if !r.entries.is_empty() {
        out.push_str(&format!("### Value Differences ({})\n\n", r.entries.len()));
        for e in &r.entries {
            out.push_str(&format!(
                "- `{}`: `{}` → `{}`\n",
                e.rendered_path(),
                compact(&e.left_value),
                compact(&e.right_value)
            ));
        }
        out.push('\n');
    }
}

fn render_table(out: &mut String, r: &TableDiffResult) {
    match &r.key_sort {
        KeySort::NotRequested => {}
        KeySort::Sorted { column } => {
            out.push_str(&format!("Rows sorted descending by `{}`.\n\n", column));
        }
        KeySort::FellBack { column, reason } => {
            out.push_str(&format!(
                "Key column `{}` unusable ({}); original row order used.\n\n",
                column, reason
            ));
        }
        KeySort::Skipped { .. } => {}
    }

    if let Some(mismatch) = &r.shape_mismatch {
        out.push_str("### Shape Mismatch\n\n");
        match mismatch {
            TableShapeMismatch::RowCount {
                left_rows,
                right_rows,
            } => out.push_str(&format!("- row count {} vs {}\n", left_rows, right_rows)),
            TableShapeMismatch::ColumnSet {
                only_left,
                only_right,
            } => {
                if !only_left.is_empty() {
                    out.push_str(&format!("- **Only in left**: {}\n", only_left.join(", ")));
                }
                if !only_right.is_empty() {
                    out.push_str(&format!(
                        "- **Only in right**: {}\n",
                        only_right.join(", ")
                    ));
                }
            }
        }
        out.push('\n');
        return;
    }

    let Some(diff) = &r.cell_diff else {
        return;
    };
    if diff.is_clean() {
        out.push_str("_No differences detected._\n");
        return;
    }

    out.push_str(&format!(
        "### Cell Differences ({})\n\n\
         | Row (left/right) | Column | Left | Right |\n\
         |---|---|---|---|\n",
        diff.mismatch_count()
    ));
    for entry in diff.mismatches() {
        out.push_str(&format!(
            "| {}/{} | {} | `{}` | `{}` |\n",
            entry.left_row, entry.right_row, entry.column, entry.mismatch.left, entry.mismatch.right
        ));
    }
    out.push('\n');
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Strings unquoted, everything else as compact JSON.
fn compact(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
