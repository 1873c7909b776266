//! # RoboDilute - plate concentrations to dilution worksheets
//!
//! RoboDilute reads a plate layout of sample concentrations (µg/µl), works
//! out how much sample and buffer each well needs to hold 10 µg in 30 µl,
//! packs the samples onto a fresh 96-well plate, and writes the worksheet
//! files a pipetting robot consumes.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌────────────┐
//! │ Plate file  │──▶│ Reshape │──▶│ Validate │──▶│ Dilution │──▶│ Re-index │──▶│  Export    │
//! │ (xlsx/csv)  │   │ (wells) │   │ (bounds) │   │ (µl)     │   │ (A1..H12)│   │ (5 × .txt) │
//! └─────────────┘   └─────────┘   └──────────┘   └──────────┘   └──────────┘   └────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use robodilute::{process_plate, RunOptions};
//! use std::path::Path;
//!
//! let run = process_plate(Path::new("plate.xlsx"), &RunOptions::default()).unwrap();
//! println!("Wrote {} wells", run.rows.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Fixed constants and run options
//! - [`models`] - Domain models (Well, WellEntry, DilutionRow)
//! - [`parser`] - Plate table loading (workbook and delimited text)
//! - [`transform`] - Reshape, dilution math, and pipeline
//! - [`validation`] - Concentration bounds
//! - [`plate`] - Destination plate layout
//! - [`export`] - Worksheet files
//! - [`logs`] - Progress logging
//! - [`app`] - Picker/notifier orchestration

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Reading
pub mod parser;

// Transformation
pub mod plate;
pub mod transform;
pub mod validation;

// Writing
pub mod export;

// Logging
pub mod logs;

// Orchestration
pub mod app;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    ConcentrationError, ExportError, PipelineError, PlateError, ReshapeError, TableError,
};

// =============================================================================
// Re-exports - Config and models
// =============================================================================

pub use config::{
    DilutionConfig, RunOptions, MAX_CONC_LIMIT, MIN_CONC_LIMIT, TARGET_MASS_UG,
    TARGET_TOTAL_VOL_UL,
};
pub use models::{DilutionRow, Well, WellEntry};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    detect_delimiter, detect_encoding, parse_bytes_auto, parse_delimited, read_table, Cell,
    LoadedTable, PlateRow, PlateTable,
};

// =============================================================================
// Re-exports - Pipeline stages
// =============================================================================

pub use export::{export_worksheet, render_column, render_combined, Column, ExportRow, ExportSummary};
pub use plate::{assign_positions, generate_plate_positions};
pub use transform::{
    build_worksheet, compute_volumes, output_dir_for, process_loaded, process_plate, reshape,
    PlateRun, TableInfo,
};
pub use validation::check_concentrations;

// =============================================================================
// Re-exports - Orchestration
// =============================================================================

pub use app::{run_with, ArgPicker, ConsoleNotifier, InputPicker, NoticeKind, Notifier, Outcome};
