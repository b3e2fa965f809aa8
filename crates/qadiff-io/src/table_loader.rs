//! CSV and spreadsheet parsing into tables.
//!
//! The first row holds column names. Workbooks contribute their first
//! worksheet only.

use crate::errors::{at_artifact, decode_error, from_calamine, from_csv, io_error, Result};
use crate::format::{require_format, Format};
use calamine::{open_workbook_auto, Data, Reader};
use qadiff_core::report::ArtifactKind;
use qadiff_core::table::{Cell, Table};
use std::io;
use std::path::Path;

/// Load a `csv`, `xls` or `xlsx` file.
///
/// # Errors
///
/// - `UnsupportedFormat`: the extension is not a table format
/// - `Io` / `Decode`: the file could not be read or parsed
/// - `InvalidTable`: duplicate column names
pub fn load_table(path: &Path) -> Result<Table> {
    let table = match require_format(path, ArtifactKind::Table)? {
        Format::Csv => load_csv(path)?,
        _ => load_workbook(path)?,
    };
    tracing::debug!(
        path = %path.display(),
        rows = table.row_count(),
        columns = table.column_count(),
        "loaded table"
    );
    Ok(table)
}

fn load_csv(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).map_err(|e| io_error("open_csv", path, e))?;
    read_csv(file).map_err(|e| at_artifact(path, e))
}

/// Parse CSV text with a header row.
///
/// # Errors
///
/// - `Decode`: malformed CSV or rows of unequal length
/// - `InvalidTable`: duplicate column names
pub fn read_csv<R: io::Read>(reader: R) -> Result<Table> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let unnamed = Path::new("<csv>");

    let columns = column_names(
        rdr.headers()
            .map_err(|e| from_csv(unnamed, e))?
            .iter()
            .map(str::to_string),
    );

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(|e| from_csv(unnamed, e))?;
        rows.push(record.iter().map(infer_cell).collect());
    }
    Ok(Table::new(columns, rows)?)
}

fn load_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| from_calamine(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| decode_error("load_workbook", path, "workbook has no worksheets"))?
        .map_err(|e| from_calamine(path, e))?;

    let mut rows_iter = range.rows();
    let Some(header) = rows_iter.next() else {
        return Ok(Table::new(Vec::new(), Vec::new())?);
    };
    let columns = column_names(header.iter().map(|d| match d {
        Data::Empty => String::new(),
        other => other.to_string(),
    }));

    let rows = rows_iter
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();
    Table::new(columns, rows).map_err(|e| at_artifact(path, e.into()))
}

/// Blank header cells become `Unnamed: <index>`.
fn column_names(raw: impl Iterator<Item = String>) -> Vec<String> {
    raw.enumerate()
        .map(|(i, name)| {
            if name.trim().is_empty() {
                format!("Unnamed: {}", i)
            } else {
                name
            }
        })
        .collect()
}

/// Infer a typed cell from CSV text: empty, bool, integer, float, text.
pub fn infer_cell(raw: &str) -> Cell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cell::Empty;
    }
    match trimmed {
        "true" | "True" | "TRUE" => return Cell::Bool(true),
        "false" | "False" | "FALSE" => return Cell::Bool(false),
        _ => {}
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Cell::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Cell::Float(f);
    }
    Cell::Text(raw.to_string())
}

fn data_to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) => infer_text(s),
        other => Cell::Text(other.to_string()),
    }
}

/// Spreadsheet strings stay text unless blank.
fn infer_text(s: &str) -> Cell {
    if s.trim().is_empty() {
        Cell::Empty
    } else {
        Cell::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qadiff_core::errors::DiffErrorKind;

    #[test]
    fn test_cell_inference() {
        assert_eq!(infer_cell(""), Cell::Empty);
        assert_eq!(infer_cell("  "), Cell::Empty);
        assert_eq!(infer_cell("True"), Cell::Bool(true));
        assert_eq!(infer_cell("42"), Cell::Int(42));
        assert_eq!(infer_cell("-3.5"), Cell::Float(-3.5));
        assert_eq!(infer_cell("abc"), Cell::Text("abc".into()));
    }

    #[test]
    fn test_read_csv_with_header() {
        let text = "id,name,score\n1,ann,9.5\n2,bob,\n";
        let table = read_csv(text.as_bytes()).unwrap();

        assert_eq!(table.columns(), &["id", "name", "score"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell(0, "score"), Some(&Cell::Float(9.5)));
        assert_eq!(table.cell(1, "score"), Some(&Cell::Empty));
    }

    #[test]
    fn test_blank_header_gets_placeholder_name() {
        let table = read_csv(",value\n0,1\n".as_bytes()).unwrap();
        assert_eq!(table.columns(), &["Unnamed: 0", "value"]);
    }

    #[test]
    fn test_ragged_csv_is_decode_error() {
        let err = read_csv("a,b\n1,2,3\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::Decode);
    }

    #[test]
    fn test_duplicate_header_is_invalid_table() {
        let err = read_csv("a,a\n1,2\n".as_bytes()).unwrap_err();
        assert_eq!(err.kind(), DiffErrorKind::InvalidTable);
    }

    #[test]
    fn test_empty_csv_is_empty_table() {
        let table = read_csv("".as_bytes()).unwrap();
        assert_eq!(table.column_count(), 0);
        assert!(table.is_empty());
    }
}
