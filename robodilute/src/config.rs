//! Fixed dilution constants and per-run options.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mass of sample to load into each destination well (µg).
pub const TARGET_MASS_UG: f64 = 10.0;

/// Total volume in each destination well (µl).
pub const TARGET_TOTAL_VOL_UL: f64 = 30.0;

/// Lowest accepted source concentration (µg/µl).
pub const MIN_CONC_LIMIT: f64 = 0.33;

/// Highest accepted source concentration (µg/µl).
pub const MAX_CONC_LIMIT: f64 = 20.0;

/// Destination plate rows (A..H).
pub const PLATE_ROWS: usize = 8;

/// Destination plate columns (1..12).
pub const PLATE_COLS: usize = 12;

/// Name of the directory created next to the input file.
pub const OUTPUT_DIR_NAME: &str = "robo_sp3_info";

/// Constants driving the dilution math and plate layout.
///
/// Only [`Default`] is used by the binary; the fields exist so tests can
/// exercise other plate shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DilutionConfig {
    pub target_mass_ug: f64,
    pub target_total_vol_ul: f64,
    pub min_conc: f64,
    pub max_conc: f64,
    pub plate_rows: usize,
    pub plate_cols: usize,
}

impl DilutionConfig {
    /// Number of wells on the destination plate.
    pub fn plate_capacity(&self) -> usize {
        self.plate_rows * self.plate_cols
    }
}

impl Default for DilutionConfig {
    fn default() -> Self {
        Self {
            target_mass_ug: TARGET_MASS_UG,
            target_total_vol_ul: TARGET_TOTAL_VOL_UL,
            min_conc: MIN_CONC_LIMIT,
            max_conc: MAX_CONC_LIMIT,
            plate_rows: PLATE_ROWS,
            plate_cols: PLATE_COLS,
        }
    }
}

/// Options for one pipeline run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunOptions {
    /// Parent directory for `robo_sp3_info/` (default: the input file's directory)
    pub output_parent: Option<PathBuf>,

    /// Compute and validate without writing anything
    pub dry_run: bool,

    /// Dilution constants
    pub dilution: DilutionConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DilutionConfig::default();
        assert_eq!(config.target_mass_ug, 10.0);
        assert_eq!(config.target_total_vol_ul, 30.0);
        assert_eq!(config.plate_capacity(), 96);
    }

    #[test]
    fn test_default_options() {
        let opts = RunOptions::default();
        assert!(opts.output_parent.is_none());
        assert!(!opts.dry_run);
        assert_eq!(opts.dilution, DilutionConfig::default());
    }
}
