//! Tabular dataset types and table diff output.

use crate::errors::TableError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// One scalar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Empty cells and NaN both mean "no value".
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(i) => Some(*i as f64),
            Cell::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Diff equality: numbers compare by value across `Int`/`Float`, and
    /// two missing cells match.
    pub fn matches(&self, other: &Cell) -> bool {
        if self.is_missing() || other.is_missing() {
            return self.is_missing() && other.is_missing();
        }
        match (self, other) {
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }

    pub(crate) fn sort_class(&self) -> Option<SortClass> {
        match self {
            _ if self.is_missing() => None,
            Cell::Bool(_) => Some(SortClass::Bool),
            Cell::Int(_) | Cell::Float(_) => Some(SortClass::Number),
            Cell::Text(_) => Some(SortClass::Text),
            Cell::Empty => None,
        }
    }

    /// Ordering between two non-missing cells of the same [`SortClass`].
    pub(crate) fn compare_same_class(&self, other: &Cell) -> Ordering {
        match (self, other) {
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(x: f64) -> Self {
        Cell::Float(x)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SortClass {
    Bool,
    Number,
    Text,
}

/// An ordered sequence of rows sharing one list of unique column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table from column names and positional rows.
    ///
    /// # Errors
    ///
    /// - `DuplicateColumn`: a column name repeats
    /// - `RaggedRow`: a row's length differs from the column count
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let mut seen = HashSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn { name: name.clone() });
            }
        }
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != columns.len() {
                return Err(TableError::RaggedRow {
                    row,
                    expected: columns.len(),
                    actual: cells.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from column-name → cell records. The first record's
    /// key order fixes the column order.
    ///
    /// # Errors
    ///
    /// - `ColumnsDiffer`: a record's key set differs from the first record's
    pub fn from_records(records: Vec<IndexMap<String, Cell>>) -> Result<Self, TableError> {
        let Some(first) = records.first() else {
            return Ok(Self {
                columns: Vec::new(),
                rows: Vec::new(),
            });
        };
        let columns: Vec<String> = first.keys().cloned().collect();

        let mut rows = Vec::with_capacity(records.len());
        for (row, mut record) in records.into_iter().enumerate() {
            if record.len() != columns.len() {
                return Err(TableError::ColumnsDiffer { row });
            }
            let mut cells = Vec::with_capacity(columns.len());
            for name in &columns {
                match record.swap_remove(name) {
                    Some(cell) => cells.push(cell),
                    None => return Err(TableError::ColumnsDiffer { row }),
                }
            }
            rows.push(cells);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(|cells| Row {
            columns: &self.columns,
            cells,
        })
    }

    /// Cell at `(row, column name)`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.get(col)
    }

    pub(crate) fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }
}

/// Borrowed view of one row as a column-name → cell mapping.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    columns: &'a [String],
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a Cell> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.cells.get(idx)
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> {
        self.columns.iter().map(String::as_str).zip(self.cells.iter())
    }
}

/// Why two tables could not be aligned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableShapeMismatch {
    RowCount { left_rows: usize, right_rows: usize },
    /// Column name sets differ (both lists sorted)
    ColumnSet {
        only_left: Vec<String>,
        only_right: Vec<String>,
    },
}

/// What happened to the requested key column sort.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeySort {
    NotRequested,
    /// Both tables were sorted descending by `column`
    Sorted { column: String },
    /// Sorting was impossible; original row order was used
    FellBack { column: String, reason: String },
    /// The tables were rejected before sorting
    Skipped { column: String },
}

/// Left and right values of one mismatched cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellMismatch {
    pub left: Cell,
    pub right: Cell,
}

/// Sparse mask over the aligned tables: a cell is `Some` only where the two
/// sides differ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellDiff {
    /// Canonical (right table) column order
    pub columns: Vec<String>,
    /// `rows[aligned_row][column]`
    pub rows: Vec<Vec<Option<CellMismatch>>>,
    /// Original left row index for each aligned row
    pub left_rows: Vec<usize>,
    /// Original right row index for each aligned row
    pub right_rows: Vec<usize>,
}

/// One present cell of a [`CellDiff`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellDiffEntry<'a> {
    pub row: usize,
    pub left_row: usize,
    pub right_row: usize,
    pub column: &'a str,
    pub mismatch: &'a CellMismatch,
}

impl CellDiff {
    pub fn mismatch_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// True when no cell is present.
    pub fn is_clean(&self) -> bool {
        self.rows.iter().flatten().all(Option::is_none)
    }

    /// Present cells in row-major order.
    pub fn mismatches(&self) -> impl Iterator<Item = CellDiffEntry<'_>> {
        self.rows.iter().enumerate().flat_map(move |(row, cells)| {
            cells
                .iter()
                .zip(&self.columns)
                .filter_map(move |(cell, column)| {
                    cell.as_ref().map(|mismatch| CellDiffEntry {
                        row,
                        left_row: self.left_rows.get(row).copied().unwrap_or(row),
                        right_row: self.right_rows.get(row).copied().unwrap_or(row),
                        column: column.as_str(),
                        mismatch,
                    })
                })
        })
    }
}

/// The result of diffing two tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableDiffResult {
    /// Shapes aligned and no cell differs
    pub equal: bool,
    /// Set when the tables were rejected before any cell comparison
    pub shape_mismatch: Option<TableShapeMismatch>,
    pub key_sort: KeySort,
    /// Absent when the tables were rejected
    pub cell_diff: Option<CellDiff>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_matching_rules() {
        assert!(Cell::Int(1).matches(&Cell::Float(1.0)));
        assert!(Cell::Empty.matches(&Cell::Float(f64::NAN)));
        assert!(!Cell::Empty.matches(&Cell::Text(String::new())));
        assert!(!Cell::Text("1".into()).matches(&Cell::Int(1)));
        assert!(!Cell::Bool(true).matches(&Cell::Int(1)));
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::Int(1), Cell::Int(2)], vec![Cell::Int(3)]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::RaggedRow {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_duplicate_columns() {
        let err = Table::new(vec!["a".into(), "a".into()], vec![]).unwrap_err();
        assert_eq!(err, TableError::DuplicateColumn { name: "a".into() });
    }

    #[test]
    fn test_from_records_uses_first_record_order() {
        let mut r1 = IndexMap::new();
        r1.insert("id".to_string(), Cell::Int(1));
        r1.insert("name".to_string(), Cell::from("a"));
        let mut r2 = IndexMap::new();
        r2.insert("name".to_string(), Cell::from("b"));
        r2.insert("id".to_string(), Cell::Int(2));

        let table = Table::from_records(vec![r1, r2]).unwrap();
        assert_eq!(table.columns(), &["id".to_string(), "name".to_string()]);
        assert_eq!(table.cell(1, "name"), Some(&Cell::from("b")));
        assert_eq!(table.row(1).unwrap().get("id"), Some(&Cell::Int(2)));
    }

    #[test]
    fn test_from_records_rejects_differing_keys() {
        let mut r1 = IndexMap::new();
        r1.insert("id".to_string(), Cell::Int(1));
        let mut r2 = IndexMap::new();
        r2.insert("key".to_string(), Cell::Int(2));
        assert_eq!(
            Table::from_records(vec![r1, r2]).unwrap_err(),
            TableError::ColumnsDiffer { row: 1 }
        );
    }
}
