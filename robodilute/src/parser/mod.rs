//! Plate table loading with encoding and delimiter auto-detection.
//!
//! Reads a plate layout (row labels in the first column, column numbers in
//! the header row) into a [`PlateTable`]. No dilution logic here.
//!
//! Workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`) go through [`workbook`];
//! every other file is treated as delimited text.

pub mod workbook;

use serde::Serialize;
use std::path::Path;

use crate::error::{TableError, TableResult};

/// Text markers that mean "no value", matching what spreadsheet exports
/// commonly write into blank wells.
const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#NA", "N/A", "NA", "n/a", "<NA>", "NULL", "null", "NaN", "nan", "-NaN", "-nan",
    "None",
];

/// Extensions read through the workbook loader.
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

// =============================================================================
// Table model
// =============================================================================

/// A single grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Interpret raw text from a delimited file.
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();
        if value.is_empty() || MISSING_MARKERS.contains(&value) {
            return Cell::Empty;
        }
        if let Ok(n) = value.parse::<f64>() {
            return Cell::Number(n);
        }
        // Decimal comma ("0,5")
        if value.matches(',').count() == 1 && !value.contains('.') && !is_thousands_group(value) {
            if let Ok(n) = value.replace(',', ".").parse::<f64>() {
                return Cell::Number(n);
            }
        }
        Cell::Text(value.to_string())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Render the cell as header or label text. Integral numbers lose
    /// their fractional part so a numeric header `1.0` reads as `1`.
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Cell::Number(n) => n.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

/// `"1,000"` could be one thousand or one. Exactly three digits after the
/// comma with a nonzero integer part is left as text; `"0,125"` is a decimal.
fn is_thousands_group(value: &str) -> bool {
    let Some((int_part, frac_part)) = value.split_once(',') else {
        return false;
    };
    let int_part = int_part.trim_start_matches(['-', '+']);
    frac_part.len() == 3
        && frac_part.bytes().all(|b| b.is_ascii_digit())
        && int_part.bytes().any(|b| b.is_ascii_digit() && b != b'0')
}

/// One data row of the grid: its label and the cells under each column header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

/// The grid as read from disk, before any plate interpretation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlateTable {
    /// Header text above the row labels (usually empty)
    pub row_header: String,
    /// Column headers, left to right, excluding the row-label column
    pub column_headers: Vec<String>,
    /// Data rows, top to bottom
    pub rows: Vec<PlateRow>,
}

impl PlateTable {
    /// Build a table from raw grid rows. Leading blank rows are skipped and
    /// the first remaining row is the header. Short rows are padded with
    /// [`Cell::Empty`]; cells beyond the header width are dropped.
    pub fn from_grid(grid: Vec<Vec<Cell>>) -> TableResult<Self> {
        if grid.is_empty() {
            return Err(TableError::EmptyFile);
        }

        let mut rows = grid
            .into_iter()
            .skip_while(|row| row.iter().all(Cell::is_empty));

        let header = rows.next().ok_or(TableError::NoHeaders)?;
        let mut header = header.into_iter();
        let row_header = header.next().map(|c| c.render()).unwrap_or_default();
        let column_headers: Vec<String> = header.map(|c| c.render()).collect();

        if column_headers.is_empty() {
            return Err(TableError::NoHeaders);
        }

        let width = column_headers.len();
        let rows = rows
            .map(|row| {
                let mut cells = row.into_iter();
                let label = cells.next().map(|c| c.render()).unwrap_or_default();
                let mut cells: Vec<Cell> = cells.take(width).collect();
                cells.resize(width, Cell::Empty);
                PlateRow { label, cells }
            })
            .collect();

        Ok(Self {
            row_header,
            column_headers,
            rows,
        })
    }

    /// Number of non-empty value cells.
    pub fn populated_cells(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| !c.is_empty())
            .count()
    }
}

/// Result of loading with metadata
#[derive(Debug, Clone, Serialize)]
pub struct LoadedTable {
    pub table: PlateTable,
    /// Source format ("workbook" or the detected text encoding)
    pub encoding: String,
    /// Detected delimiter for text input
    pub delimiter: Option<char>,
}

// =============================================================================
// Delimited text
// =============================================================================

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF".as_slice()).unwrap_or(bytes);
    match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => {
            encoding_rs::ISO_8859_15.decode(bytes).0.into_owned()
        }
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        // UTF-8, ASCII, and anything unrecognised
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// Detect the delimiter by counting occurrences in the first non-blank line
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("");

    let separators = [';', ',', '\t', '|'];
    let mut best_sep = ';';
    let mut best_count = 0;

    for &sep in &separators {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse delimited text with an explicit delimiter.
///
/// # Example
/// ```ignore
/// use robodilute::parse_delimited;
///
/// let table = parse_delimited(";1;2\nA;5.0;\nB;0.5;1.2", ';').unwrap();
/// assert_eq!(table.column_headers, vec!["1", "2"]);
/// assert_eq!(table.rows.len(), 2);
/// ```
pub fn parse_delimited(content: &str, delimiter: char) -> TableResult<PlateTable> {
    if content.trim().is_empty() {
        return Err(TableError::EmptyFile);
    }

    let delimiter = u8::try_from(delimiter)
        .map_err(|_| TableError::Encoding(format!("unsupported delimiter '{}'", delimiter)))?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(Cell::parse).collect());
    }

    PlateTable::from_grid(grid)
}

/// Parse plate bytes with auto-detection of encoding and delimiter.
pub fn parse_bytes_auto(bytes: &[u8]) -> TableResult<LoadedTable> {
    if bytes.is_empty() {
        return Err(TableError::EmptyFile);
    }

    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = detect_delimiter(&content);
    let table = parse_delimited(&content, delimiter)?;

    Ok(LoadedTable {
        table,
        encoding,
        delimiter: Some(delimiter),
    })
}

/// True if the path looks like a spreadsheet workbook.
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| WORKBOOK_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// Read a plate table from disk, choosing the loader by file extension.
///
/// # Example
/// ```ignore
/// let loaded = read_table("/path/to/plate.xlsx")?;
/// println!("{} columns", loaded.table.column_headers.len());
/// ```
pub fn read_table<P: AsRef<Path>>(path: P) -> TableResult<LoadedTable> {
    let path = path.as_ref();
    if is_workbook(path) {
        let table = workbook::read_workbook(path)?;
        return Ok(LoadedTable {
            table,
            encoding: "workbook".to_string(),
            delimiter: None,
        });
    }

    let bytes = std::fs::read(path)?;
    parse_bytes_auto(&bytes)
}
