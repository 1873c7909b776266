//! Spreadsheet workbook loading (first worksheet only).

use calamine::{open_workbook_auto, CellErrorType, Data, Reader};
use std::path::Path;

use super::{Cell, PlateTable};
use crate::error::{TableError, TableResult};

/// Read the first worksheet of a workbook into a [`PlateTable`].
pub fn read_workbook(path: &Path) -> TableResult<PlateTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TableError::NoWorksheet)??;

    let grid: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(to_cell).collect())
        .collect();

    PlateTable::from_grid(grid)
}

/// Convert a workbook cell. Strings go through [`Cell::parse`] so numbers
/// typed as text still count as numbers.
///
/// `#N/A` is a missing value. Any other error cell (`#DIV/0!`, `#VALUE!`)
/// keeps its error text so the well is reported rather than dropped.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::String(s) => Cell::parse(s),
        Data::Error(CellErrorType::NA) => Cell::Empty,
        Data::Error(e) => Cell::Text(e.to_string()),
        other => Cell::Text(other.to_string()),
    }
}
