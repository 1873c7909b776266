//! Flatten a plate grid into an ordered list of populated wells.
//!
//! # Ordering
//!
//! ```text
//!      1    2            A1, B1, C1, ... H1,
//!  A  5.0  1.2     →     A2, B2, ...
//!  B  0.5   -            (columns outer, rows inner; empty cells skipped)
//! ```
//!
//! The order produced here is the order destination wells are assigned in,
//! so it must not change.

use crate::error::{ReshapeError, ReshapeResult};
use crate::models::{Well, WellEntry};
use crate::parser::{Cell, PlateRow, PlateTable};

/// Reshape a plate table into `(org_pos, org_con)` entries.
pub fn reshape(table: &PlateTable) -> ReshapeResult<Vec<WellEntry>> {
    let columns = column_numbers(table)?;
    let rows: Vec<(usize, &PlateRow)> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| !is_padding(row))
        .collect();

    let mut entries = Vec::new();
    for (col_idx, column) in columns.iter().enumerate() {
        let Some(column) = column else { continue };

        for &(row_idx, row) in &rows {
            let Some(cell) = row.cells.get(col_idx) else { continue };
            if cell.is_empty() {
                continue;
            }

            let well = to_well(row_idx, &row.label, *column)?;
            let org_con = match cell {
                Cell::Number(n) if n.is_finite() => *n,
                Cell::Number(_) => {
                    return Err(ReshapeError::NotFinite {
                        well: well.to_string(),
                    })
                }
                Cell::Text(value) => {
                    return Err(ReshapeError::NotNumeric {
                        well: well.to_string(),
                        value: value.clone(),
                    })
                }
                Cell::Empty => continue,
            };

            entries.push(WellEntry::new(well, org_con));
        }
    }

    Ok(entries)
}

/// Interpret the column headers as plate column numbers. A blank header
/// over an entirely blank column yields `None` (spreadsheet padding).
fn column_numbers(table: &PlateTable) -> ReshapeResult<Vec<Option<u32>>> {
    table
        .column_headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let header = header.trim();
            let blank_column = table
                .rows
                .iter()
                .all(|r| r.cells.get(idx).map_or(true, Cell::is_empty));
            if header.is_empty() && blank_column {
                return Ok(None);
            }
            match header.parse::<u32>() {
                Ok(n) if n > 0 => Ok(Some(n)),
                _ => Err(ReshapeError::BadColumnHeader(header.to_string())),
            }
        })
        .collect()
}

/// A row with no label and no values.
fn is_padding(row: &PlateRow) -> bool {
    row.label.trim().is_empty() && row.cells.iter().all(Cell::is_empty)
}

fn to_well(row_idx: usize, label: &str, column: u32) -> ReshapeResult<Well> {
    format!("{}{}", label.trim(), column)
        .parse::<Well>()
        .map_err(|_| ReshapeError::BadRowLabel {
            row: row_idx + 1,
            label: label.to_string(),
        })
}
