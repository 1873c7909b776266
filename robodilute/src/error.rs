//! Error types for the RoboDilute plate pipeline.
//!
//! One enum per stage, plus a top-level [`PipelineError`] that wraps them:
//!
//! - [`TableError`] - Reading the plate file
//! - [`ReshapeError`] - Turning the grid into well entries
//! - [`ConcentrationError`] - Concentration bounds
//! - [`PlateError`] - Destination plate capacity
//! - [`ExportError`] - Writing the worksheet files
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::{MAX_CONC_LIMIT, MIN_CONC_LIMIT};

// =============================================================================
// Table Reading Errors
// =============================================================================

/// Errors while loading the plate table from disk.
#[derive(Debug, Error)]
pub enum TableError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to decode text content.
    #[error("Failed to decode file: {0}")]
    Encoding(String),

    /// Delimited text could not be split into records.
    #[error("Invalid delimited text: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook could not be opened or read.
    #[error("Invalid workbook: {0}")]
    Workbook(String),

    /// Workbook has no worksheet to read.
    #[error("Workbook contains no worksheet")]
    NoWorksheet,

    /// Empty file.
    #[error("Plate file is empty")]
    EmptyFile,

    /// No header row found.
    #[error("No column headers found in plate file")]
    NoHeaders,
}

impl From<calamine::Error> for TableError {
    fn from(err: calamine::Error) -> Self {
        TableError::Workbook(err.to_string())
    }
}

// =============================================================================
// Reshape Errors
// =============================================================================

/// Errors while flattening the grid into well entries.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// First column value is not a row letter.
    #[error("Row {row}: '{label}' is not a plate row label")]
    BadRowLabel { row: usize, label: String },

    /// Column header is not a plate column number.
    #[error("Column header '{0}' is not a plate column number")]
    BadColumnHeader(String),

    /// Cell holds something other than a number.
    #[error("Well {well}: value '{value}' is not numeric")]
    NotNumeric { well: String, value: String },

    /// Cell holds NaN or infinity.
    #[error("Well {well}: concentration is not a finite number")]
    NotFinite { well: String },
}

// =============================================================================
// Concentration Errors
// =============================================================================

/// Concentration bounds violations, each listing every offending well.
#[derive(Debug, Error, PartialEq)]
pub enum ConcentrationError {
    #[error("Concentration too low (< {:?} µg/µl) in wells:\n{}", MIN_CONC_LIMIT, .wells.join(", "))]
    TooLow { wells: Vec<String> },

    #[error("Concentration too high (> {:?} µg/µl) in wells:\n{}", MAX_CONC_LIMIT, .wells.join(", "))]
    TooHigh { wells: Vec<String> },
}

// =============================================================================
// Plate Errors
// =============================================================================

/// Destination plate errors.
#[derive(Debug, Error, PartialEq)]
pub enum PlateError {
    /// More populated wells than destination positions.
    #[error("Too many samples ({count}).")]
    Overflow { count: usize, capacity: usize },
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors while writing the worksheet files.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot create output directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::process_plate`].
/// Every variant is terminal for the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Plate file could not be read.
    #[error("Malformed input: {0}")]
    Table(#[from] TableError),

    /// Grid could not be interpreted as a plate.
    #[error("Malformed input: {0}")]
    Reshape(#[from] ReshapeError),

    /// Concentration out of bounds.
    #[error(transparent)]
    Concentration(#[from] ConcentrationError),

    /// Too many wells for the destination plate.
    #[error(transparent)]
    Plate(#[from] PlateError),

    /// Worksheet could not be written.
    #[error("An error occurred:\n{0}")]
    Export(#[from] ExportError),

    /// Anything else.
    #[error("An error occurred:\n{0}")]
    System(String),
}

impl PipelineError {
    /// Title shown to the user alongside the message.
    pub fn title(&self) -> &'static str {
        match self {
            PipelineError::Table(_) | PipelineError::Reshape(_) => "Malformed Input",
            PipelineError::Concentration(ConcentrationError::TooLow { .. }) => {
                "Lower Concentration Limit Error"
            }
            PipelineError::Concentration(ConcentrationError::TooHigh { .. }) => {
                "Upper Concentration Limit Error"
            }
            PipelineError::Plate(_) => "Plate Overflow",
            PipelineError::Export(_) | PipelineError::System(_) => "System Error",
        }
    }

    /// True for errors caused by the contents of the plate file.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, PipelineError::Table(_) | PipelineError::Reshape(_))
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for table reading.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for reshaping.
pub type ReshapeResult<T> = Result<T, ReshapeError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        let table_err = TableError::EmptyFile;
        let pipeline_err: PipelineError = table_err.into();
        assert!(pipeline_err.to_string().contains("empty"));
        assert!(pipeline_err.is_malformed_input());

        let reshape_err = ReshapeError::BadColumnHeader("Total".into());
        let pipeline_err: PipelineError = reshape_err.into();
        assert!(pipeline_err.to_string().contains("Total"));
        assert_eq!(pipeline_err.title(), "Malformed Input");
    }

    #[test]
    fn test_low_concentration_message() {
        let err = ConcentrationError::TooLow {
            wells: vec!["A1".into(), "C4".into()],
        };
        assert_eq!(
            err.to_string(),
            "Concentration too low (< 0.33 µg/µl) in wells:\nA1, C4"
        );
    }

    #[test]
    fn test_high_concentration_message() {
        let err = ConcentrationError::TooHigh {
            wells: vec!["H12".into()],
        };
        assert_eq!(
            err.to_string(),
            "Concentration too high (> 20.0 µg/µl) in wells:\nH12"
        );
    }

    #[test]
    fn test_titles() {
        let low: PipelineError = ConcentrationError::TooLow { wells: vec![] }.into();
        let high: PipelineError = ConcentrationError::TooHigh { wells: vec![] }.into();
        let overflow: PipelineError = PlateError::Overflow { count: 97, capacity: 96 }.into();
        let system = PipelineError::System("boom".into());

        assert_eq!(low.title(), "Lower Concentration Limit Error");
        assert_eq!(high.title(), "Upper Concentration Limit Error");
        assert_eq!(overflow.title(), "Plate Overflow");
        assert_eq!(overflow.to_string(), "Too many samples (97).");
        assert_eq!(system.title(), "System Error");
        assert_eq!(system.to_string(), "An error occurred:\nboom");
    }
}
