//! Worksheet export to `; `-delimited text files.
//!
//! # Output
//!
//! ```text
//! robo_sp3_info/
//! ├── robo_sp3_info.txt   org_pos; new_pos; org_con; sample_vol; buffer_vol
//! ├── org_pos.txt         one value per line, no header
//! ├── new_pos.txt
//! ├── sample_vol.txt
//! └── buffer_vol.txt
//! ```
//!
//! Volumes are rounded to one decimal here and nowhere else. Lines are
//! joined with `\n` without a trailing newline.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ExportError, ExportResult};
use crate::models::DilutionRow;

/// Name of the combined worksheet file.
pub const COMBINED_FILE: &str = "robo_sp3_info.txt";

/// Field separator in the combined file.
pub const SEPARATOR: &str = "; ";

/// A single-column export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    OrgPos,
    NewPos,
    SampleVol,
    BufferVol,
}

impl Column {
    /// Columns written to their own files, in write order.
    pub const SINGLE_FILES: [Column; 4] = [
        Column::OrgPos,
        Column::NewPos,
        Column::SampleVol,
        Column::BufferVol,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::OrgPos => "org_pos",
            Column::NewPos => "new_pos",
            Column::SampleVol => "sample_vol",
            Column::BufferVol => "buffer_vol",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.txt", self.name())
    }

    fn value(self, row: &ExportRow) -> String {
        match self {
            Column::OrgPos => row.org_pos.clone(),
            Column::NewPos => row.new_pos.clone(),
            Column::SampleVol => format_number(row.sample_vol),
            Column::BufferVol => format_number(row.buffer_vol),
        }
    }
}

/// A worksheet row as written: positions as text, volumes rounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub org_pos: String,
    pub new_pos: String,
    pub org_con: f64,
    pub sample_vol: f64,
    pub buffer_vol: f64,
}

impl From<&DilutionRow> for ExportRow {
    fn from(row: &DilutionRow) -> Self {
        Self {
            org_pos: row.org_pos.to_string(),
            new_pos: row.new_pos.to_string(),
            org_con: row.org_con,
            sample_vol: round_volume(row.sample_vol),
            buffer_vol: round_volume(row.buffer_vol),
        }
    }
}

/// Files written by [`export_worksheet`].
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub row_count: usize,
}

/// Round to one decimal place, ties to even.
pub fn round_volume(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Shortest decimal form that round-trips, always with a fractional part
/// (`2.0`, `0.5`, `30.3`).
pub fn format_number(value: f64) -> String {
    format!("{:?}", value)
}

/// Render the combined worksheet with its header line.
pub fn render_combined(rows: &[ExportRow]) -> String {
    let header = ["org_pos", "new_pos", "org_con", "sample_vol", "buffer_vol"].join(SEPARATOR);
    let lines = rows.iter().map(|r| {
        [
            r.org_pos.clone(),
            r.new_pos.clone(),
            format_number(r.org_con),
            format_number(r.sample_vol),
            format_number(r.buffer_vol),
        ]
        .join(SEPARATOR)
    });

    std::iter::once(header)
        .chain(lines)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one column, one value per line.
pub fn render_column(rows: &[ExportRow], column: Column) -> String {
    rows.iter()
        .map(|r| column.value(r))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write the combined file and the four single-column files into
/// `output_dir`, creating it if needed.
pub fn export_worksheet(rows: &[DilutionRow], output_dir: &Path) -> ExportResult<ExportSummary> {
    let rows: Vec<ExportRow> = rows.iter().map(ExportRow::from).collect();

    fs::create_dir_all(output_dir).map_err(|source| ExportError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::with_capacity(1 + Column::SINGLE_FILES.len());
    files.push(write_file(output_dir.join(COMBINED_FILE), &render_combined(&rows))?);

    for column in Column::SINGLE_FILES {
        let path = output_dir.join(column.file_name());
        files.push(write_file(path, &render_column(&rows, column))?);
    }

    Ok(ExportSummary {
        output_dir: output_dir.to_path_buf(),
        files,
        row_count: rows.len(),
    })
}

fn write_file(path: PathBuf, content: &str) -> ExportResult<PathBuf> {
    fs::write(&path, content).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Well;
    use tempfile::tempdir;

    fn row(org: &str, new: &str, con: f64, sample: f64, buffer: f64) -> DilutionRow {
        DilutionRow {
            org_pos: org.parse::<Well>().unwrap(),
            new_pos: new.parse::<Well>().unwrap(),
            org_con: con,
            sample_vol: sample,
            buffer_vol: buffer,
        }
    }

    #[test]
    fn test_round_volume() {
        assert_eq!(round_volume(30.303030303), 30.3);
        assert_eq!(round_volume(2.0), 2.0);
        assert_eq!(round_volume(-0.30303), -0.3);
        assert_eq!(round_volume(2.25), 2.2);
        assert_eq!(round_volume(2.75), 2.8);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2.0");
        assert_eq!(format_number(28.0), "28.0");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(30.3), "30.3");
        assert_eq!(format_number(-0.3), "-0.3");
        assert_eq!(format_number(3.14159), "3.14159");
    }

    #[test]
    fn test_render_combined() {
        let rows: Vec<ExportRow> = [
            row("A1", "A1", 5.0, 2.0, 28.0),
            row("B1", "B1", 0.5, 20.0, 10.0),
        ]
        .iter()
        .map(ExportRow::from)
        .collect();

        assert_eq!(
            render_combined(&rows),
            "org_pos; new_pos; org_con; sample_vol; buffer_vol\n\
             A1; A1; 5.0; 2.0; 28.0\n\
             B1; B1; 0.5; 20.0; 10.0"
        );
    }

    #[test]
    fn test_org_con_not_rounded() {
        let export = ExportRow::from(&row("C3", "A1", 3.0, 10.0 / 3.0, 30.0 - 10.0 / 3.0));
        assert_eq!(export.org_con, 3.0);
        assert_eq!(export.sample_vol, 3.3);
        assert_eq!(export.buffer_vol, 26.7);

        let export = ExportRow::from(&row("C3", "A1", 1.234567, 1.0, 1.0));
        assert_eq!(render_combined(&[export]).lines().nth(1), Some("C3; A1; 1.234567; 1.0; 1.0"));
    }

    #[test]
    fn test_render_column() {
        let rows: Vec<ExportRow> = [
            row("A1", "A1", 5.0, 2.0, 28.0),
            row("C2", "B1", 0.5, 20.0, 10.0),
        ]
        .iter()
        .map(ExportRow::from)
        .collect();

        assert_eq!(render_column(&rows, Column::OrgPos), "A1\nC2");
        assert_eq!(render_column(&rows, Column::NewPos), "A1\nB1");
        assert_eq!(render_column(&rows, Column::SampleVol), "2.0\n20.0");
        assert_eq!(render_column(&rows, Column::BufferVol), "28.0\n10.0");
    }

    #[test]
    fn test_export_writes_five_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("robo_sp3_info");
        let rows = vec![row("A1", "A1", 5.0, 2.0, 28.0)];

        let summary = export_worksheet(&rows, &out).unwrap();

        assert_eq!(summary.files.len(), 5);
        assert_eq!(summary.row_count, 1);
        for name in ["robo_sp3_info.txt", "org_pos.txt", "new_pos.txt", "sample_vol.txt", "buffer_vol.txt"] {
            assert!(out.join(name).is_file(), "missing {name}");
        }
        assert_eq!(fs::read_to_string(out.join("sample_vol.txt")).unwrap(), "2.0");
        assert_eq!(fs::read_to_string(out.join("org_pos.txt")).unwrap(), "A1");
    }

    #[test]
    fn test_export_into_existing_dir() {
        let dir = tempdir().unwrap();
        let rows = vec![row("A1", "A1", 5.0, 2.0, 28.0)];
        export_worksheet(&rows, dir.path()).unwrap();
        export_worksheet(&rows, dir.path()).unwrap();
        assert!(dir.path().join(COMBINED_FILE).is_file());
    }
}
