//! Cell-level diff of tabular datasets.
//!
//! ## Entry point
//!
//! ```
//! use qadiff_core::table::{diff_tables, Cell, Table};
//!
//! let cols = vec!["id".to_string(), "qty".to_string()];
//! let left = Table::new(cols.clone(), vec![vec![Cell::Int(1), Cell::Int(5)]]).unwrap();
//! let right = Table::new(cols, vec![vec![Cell::Int(1), Cell::Int(6)]]).unwrap();
//!
//! let result = diff_tables(&left, &right, Some("id"));
//! assert!(!result.equal);
//! assert_eq!(result.cell_diff.unwrap().mismatch_count(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Rejection before comparison**: differing row counts or column sets
//!   produce `shape_mismatch` and no cell diff.
//! - **Sparse output**: only mismatched cells are present in `cell_diff`.
//! - **Best-effort key sort**: an unusable key column falls back to the
//!   original row order and is recorded in `key_sort`.

pub mod engine;
pub mod model;

pub use engine::diff_tables;
pub use model::{
    Cell, CellDiff, CellDiffEntry, CellMismatch, KeySort, Row, Table, TableDiffResult,
    TableShapeMismatch,
};
