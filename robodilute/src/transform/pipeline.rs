//! High-level pipeline API: plate file in, dilution worksheet out.
//!
//! Steps, in order:
//! 1. Read the plate table
//! 2. Reshape into populated wells (column-major)
//! 3. Check concentration bounds (low first, then high)
//! 4. Compute sample and buffer volumes
//! 5. Assign destination positions
//! 6. Export the worksheet files
//!
//! Steps 1–5 finish before anything touches the filesystem, so a failing
//! run never creates the output directory.
//!
//! # Example
//!
//! ```rust,ignore
//! use robodilute::{process_plate, RunOptions};
//! use std::path::Path;
//!
//! let run = process_plate(Path::new("plate.xlsx"), &RunOptions::default())?;
//! println!("{} wells", run.rows.len());
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::dilution::compute_volumes;
use super::reshape::reshape;
use crate::config::{DilutionConfig, RunOptions, OUTPUT_DIR_NAME};
use crate::error::PipelineResult;
use crate::export::{export_worksheet, ExportSummary};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::DilutionRow;
use crate::parser::{read_table, LoadedTable, PlateTable};
use crate::plate::{assign_positions, generate_plate_positions};
use crate::validation::check_concentrations;

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct PlateRun {
    /// Worksheet rows in reshape order
    pub rows: Vec<DilutionRow>,

    /// Plate file metadata
    pub table_info: TableInfo,

    /// Written files (`None` on a dry run)
    pub export: Option<ExportSummary>,
}

/// Plate file information
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub encoding: String,
    pub delimiter: Option<char>,
    pub column_headers: Vec<String>,
    pub row_count: usize,
}

impl TableInfo {
    fn from_loaded(loaded: &LoadedTable) -> Self {
        Self {
            encoding: loaded.encoding.clone(),
            delimiter: loaded.delimiter,
            column_headers: loaded.table.column_headers.clone(),
            row_count: loaded.table.rows.len(),
        }
    }
}

/// Directory the worksheet is written to for a given input file.
pub fn output_dir_for(input: &Path, options: &RunOptions) -> PathBuf {
    let parent = options
        .output_parent
        .clone()
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    parent.join(OUTPUT_DIR_NAME)
}

/// Process a plate file end to end.
pub fn process_plate(path: &Path, options: &RunOptions) -> PipelineResult<PlateRun> {
    log_info(format!("📖 Reading plate file: {}", path.display()));
    let loaded = read_table(path)?;
    process_loaded(loaded, &output_dir_for(path, options), options)
}

/// Process an already-loaded table, writing into `output_dir` unless this is
/// a dry run.
pub fn process_loaded(
    loaded: LoadedTable,
    output_dir: &Path,
    options: &RunOptions,
) -> PipelineResult<PlateRun> {
    let table_info = TableInfo::from_loaded(&loaded);
    match loaded.delimiter {
        Some(d) => log_success(format!(
            "Read {} rows (encoding: {}, separator: '{}')",
            table_info.row_count,
            table_info.encoding,
            format_delimiter(d)
        )),
        None => log_success(format!("Read {} rows from workbook", table_info.row_count)),
    }
    log_info_indent(
        format!(
            "{} columns, {} filled cells",
            table_info.column_headers.len(),
            loaded.table.populated_cells()
        ),
        1,
    );

    let rows = build_worksheet(&loaded.table, &options.dilution)?;

    let export = if options.dry_run {
        log_info("(dry run: nothing written)");
        None
    } else {
        log_info(format!("💾 Writing worksheet to {}", output_dir.display()));
        let summary = export_worksheet(&rows, output_dir)?;
        log_success(format!("Wrote {} files", summary.files.len()));
        Some(summary)
    };

    Ok(PlateRun {
        rows,
        table_info,
        export,
    })
}

/// Reshape, validate, compute, and assign destination wells.
///
/// Pure: touches neither the filesystem nor anything outside `table`.
pub fn build_worksheet(
    table: &PlateTable,
    config: &DilutionConfig,
) -> PipelineResult<Vec<DilutionRow>> {
    log_info("🔄 Reshaping plate (columns outer, rows inner)...");
    let entries = reshape(table)?;
    log_success(format!("{} populated wells", entries.len()));

    log_info("✔️  Checking concentrations...");
    check_concentrations(&entries, config)?;
    log_success(format!(
        "All concentrations within [{}, {}] µg/µl",
        config.min_conc, config.max_conc
    ));

    let positions = generate_plate_positions(config.plate_rows, config.plate_cols);
    let assigned = assign_positions(&entries, &positions)?;

    let rows: Vec<DilutionRow> = assigned
        .into_iter()
        .map(|(entry, new_pos)| {
            let volumes = compute_volumes(entry.org_con, config);
            DilutionRow {
                org_pos: entry.org_pos.clone(),
                new_pos,
                org_con: entry.org_con,
                sample_vol: volumes.sample_vol,
                buffer_vol: volumes.buffer_vol,
            }
        })
        .collect();

    warn_negative_buffer(&rows);
    log_success(format!("Assigned {} destination wells", rows.len()));

    Ok(rows)
}

/// Sample volume above the total leaves a negative buffer volume. The
/// worksheet keeps the value; this only flags it.
fn warn_negative_buffer(rows: &[DilutionRow]) {
    let wells: Vec<String> = rows
        .iter()
        .filter(|r| r.buffer_vol < 0.0)
        .map(|r| r.org_pos.to_string())
        .collect();

    if !wells.is_empty() {
        log_warning(format!(
            "{} well(s) need more sample than the total volume (negative buffer):",
            wells.len()
        ));
        log_info_indent(wells.join(", "), 1);
    }
}

/// Format delimiter for display
fn format_delimiter(d: char) -> &'static str {
    match d {
        ';' => ";",
        ',' => ",",
        '\t' => "TAB",
        '|' => "|",
        _ => "?",
    }
}
