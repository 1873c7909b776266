//! Domain models for the plate pipeline.
//!
//! - [`Well`] - A plate position such as `C5`
//! - [`WellEntry`] - A populated source well and its concentration
//! - [`DilutionRow`] - One line of the dilution worksheet

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

static WELL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+)([1-9][0-9]*)$").expect("valid well regex"));

// =============================================================================
// Well
// =============================================================================

/// A well position: row letters followed by a 1-based column number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Well {
    row: String,
    column: u32,
}

impl Well {
    /// Create a well from a row label and column number.
    pub fn new(row: impl Into<String>, column: u32) -> Self {
        Self {
            row: row.into(),
            column,
        }
    }

    pub fn row(&self) -> &str {
        &self.row
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl fmt::Display for Well {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

/// Error returned when a string is not a well position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a well position")]
pub struct ParseWellError(pub String);

impl FromStr for Well {
    type Err = ParseWellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = WELL_PATTERN
            .captures(s)
            .ok_or_else(|| ParseWellError(s.to_string()))?;
        let column = caps[2]
            .parse::<u32>()
            .map_err(|_| ParseWellError(s.to_string()))?;
        Ok(Well::new(&caps[1], column))
    }
}

impl Serialize for Well {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// =============================================================================
// Source entries and worksheet rows
// =============================================================================

/// A populated source well, in reshape order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellEntry {
    pub org_pos: Well,
    pub org_con: f64,
}

impl WellEntry {
    pub fn new(org_pos: Well, org_con: f64) -> Self {
        Self { org_pos, org_con }
    }
}

/// One worksheet line. Volumes are kept at full precision; rounding
/// happens in [`crate::export`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DilutionRow {
    pub org_pos: Well,
    pub new_pos: Well,
    /// Source concentration (µg/µl)
    pub org_con: f64,
    /// Sample volume to aspirate (µl)
    pub sample_vol: f64,
    /// Buffer volume to add (µl)
    pub buffer_vol: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_display() {
        assert_eq!(Well::new("C", 5).to_string(), "C5");
        assert_eq!(Well::new("AA", 12).to_string(), "AA12");
    }

    #[test]
    fn test_well_parse() {
        let well: Well = "H12".parse().unwrap();
        assert_eq!(well.row(), "H");
        assert_eq!(well.column(), 12);
    }

    #[test]
    fn test_well_parse_rejects_garbage() {
        assert!("12".parse::<Well>().is_err());
        assert!("A0".parse::<Well>().is_err());
        assert!("A-1".parse::<Well>().is_err());
        assert!("".parse::<Well>().is_err());
        assert!("A 1".parse::<Well>().is_err());
    }

    #[test]
    fn test_well_serializes_as_string() {
        let entry = WellEntry::new(Well::new("B", 3), 1.5);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["org_pos"], "B3");
        assert_eq!(json["org_con"], 1.5);
    }
}
