//! Table alignment and cell-by-cell diff.
//!
//! Two tables are comparable only when they have the same number of rows and
//! the same set of column names. The right table's column order is the
//! canonical order of the output; the left table is re-indexed to match.

use crate::table::model::{
    Cell, CellDiff, CellMismatch, KeySort, SortClass, Table, TableDiffResult, TableShapeMismatch,
};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Diff `left` against `right`, optionally sorting both descending by
/// `key_column` first.
///
/// A shape disagreement is reported in the result rather than as an error:
/// `equal` is false, `shape_mismatch` says why and `cell_diff` is `None`.
pub fn diff_tables(left: &Table, right: &Table, key_column: Option<&str>) -> TableDiffResult {
    if let Some(mismatch) = shape_mismatch(left, right) {
        return TableDiffResult {
            equal: false,
            shape_mismatch: Some(mismatch),
            key_sort: match key_column {
                Some(column) => KeySort::Skipped {
                    column: column.to_string(),
                },
                None => KeySort::NotRequested,
            },
            cell_diff: None,
        };
    }

    // column set equality guarantees every lookup succeeds
    let left_cols: Vec<usize> = right
        .columns()
        .iter()
        .filter_map(|name| left.column_index(name))
        .collect();

    let rows = right.row_count();
    let identity: Vec<usize> = (0..rows).collect();
    let (left_rows, right_rows, key_sort) = match key_column {
        None => (identity.clone(), identity, KeySort::NotRequested),
        Some(column) => match (descending_order(left, column), descending_order(right, column)) {
            (Ok(l), Ok(r)) => (
                l,
                r,
                KeySort::Sorted {
                    column: column.to_string(),
                },
            ),
            (Err(reason), _) | (_, Err(reason)) => (
                identity.clone(),
                identity,
                KeySort::FellBack {
                    column: column.to_string(),
                    reason,
                },
            ),
        },
    };

    let mut mask = Vec::with_capacity(rows);
    for (&lr, &rr) in left_rows.iter().zip(&right_rows) {
        let mut row = Vec::with_capacity(left_cols.len());
        for (rc, &lc) in left_cols.iter().enumerate() {
            let l = left.cell_at(lr, lc).cloned().unwrap_or(Cell::Empty);
            let r = right.cell_at(rr, rc).cloned().unwrap_or(Cell::Empty);
            if l.matches(&r) {
                row.push(None);
            } else {
                row.push(Some(CellMismatch { left: l, right: r }));
            }
        }
        mask.push(row);
    }

    let cell_diff = CellDiff {
        columns: right.columns().to_vec(),
        rows: mask,
        left_rows,
        right_rows,
    };

    TableDiffResult {
        equal: cell_diff.is_clean(),
        shape_mismatch: None,
        key_sort,
        cell_diff: Some(cell_diff),
    }
}

/// Row count is checked before the column set.
fn shape_mismatch(left: &Table, right: &Table) -> Option<TableShapeMismatch> {
    if left.row_count() != right.row_count() {
        return Some(TableShapeMismatch::RowCount {
            left_rows: left.row_count(),
            right_rows: right.row_count(),
        });
    }

    let l: BTreeSet<&str> = left.columns().iter().map(String::as_str).collect();
    let r: BTreeSet<&str> = right.columns().iter().map(String::as_str).collect();
    if l != r {
        return Some(TableShapeMismatch::ColumnSet {
            only_left: l.difference(&r).map(|s| s.to_string()).collect(),
            only_right: r.difference(&l).map(|s| s.to_string()).collect(),
        });
    }
    None
}

/// Row indices in stable descending order of `column`; missing cells last.
///
/// Fails with a human-readable reason if the column is absent or holds
/// values of more than one sort class.
fn descending_order(table: &Table, column: &str) -> Result<Vec<usize>, String> {
    let col = table
        .column_index(column)
        .ok_or_else(|| format!("column '{}' not present", column))?;

    let keys: Vec<&Cell> = (0..table.row_count())
        .filter_map(|row| table.cell_at(row, col))
        .collect();

    let mut class: Option<SortClass> = None;
    for cell in &keys {
        match (class, cell.sort_class()) {
            (_, None) => {}
            (None, Some(c)) => class = Some(c),
            (Some(a), Some(b)) if a != b => {
                return Err(format!(
                    "column '{}' mixes {:?} and {:?} values",
                    column, a, b
                ));
            }
            _ => {}
        }
    }

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| match (keys[a].is_missing(), keys[b].is_missing()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => keys[b].compare_same_class(keys[a]),
    });
    Ok(order)
}
