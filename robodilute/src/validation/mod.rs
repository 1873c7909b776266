//! Concentration bounds checking.
//!
//! Low concentrations are checked first. If any well is below the minimum
//! the run fails with [`ConcentrationError::TooLow`] and the upper bound is
//! not looked at; only a clean low check proceeds to the high check. Both
//! errors list every offending well, not just the first.

use crate::config::DilutionConfig;
use crate::error::ConcentrationError;
use crate::models::WellEntry;

/// Check every entry against `[min_conc, max_conc]`.
pub fn check_concentrations(
    entries: &[WellEntry],
    config: &DilutionConfig,
) -> Result<(), ConcentrationError> {
    let too_low = wells_where(entries, |c| c < config.min_conc);
    if !too_low.is_empty() {
        return Err(ConcentrationError::TooLow { wells: too_low });
    }

    let too_high = wells_where(entries, |c| c > config.max_conc);
    if !too_high.is_empty() {
        return Err(ConcentrationError::TooHigh { wells: too_high });
    }

    Ok(())
}

fn wells_where(entries: &[WellEntry], pred: impl Fn(f64) -> bool) -> Vec<String> {
    entries
        .iter()
        .filter(|e| pred(e.org_con))
        .map(|e| e.org_pos.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Well;

    fn entry(pos: &str, con: f64) -> WellEntry {
        WellEntry::new(pos.parse::<Well>().unwrap(), con)
    }

    #[test]
    fn test_all_in_bounds() {
        let entries = vec![entry("A1", 0.33), entry("B1", 20.0), entry("C1", 5.0)];
        assert!(check_concentrations(&entries, &DilutionConfig::default()).is_ok());
    }

    #[test]
    fn test_low_lists_every_well() {
        let entries = vec![entry("A1", 0.2), entry("B1", 5.0), entry("C1", 0.1)];
        let err = check_concentrations(&entries, &DilutionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConcentrationError::TooLow {
                wells: vec!["A1".into(), "C1".into()]
            }
        );
    }

    #[test]
    fn test_high_lists_every_well() {
        let entries = vec![entry("A1", 25.0), entry("B1", 5.0), entry("C1", 20.01)];
        let err = check_concentrations(&entries, &DilutionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConcentrationError::TooHigh {
                wells: vec!["A1".into(), "C1".into()]
            }
        );
    }

    #[test]
    fn test_low_short_circuits_high() {
        let entries = vec![entry("A1", 25.0), entry("B1", 0.2)];
        let err = check_concentrations(&entries, &DilutionConfig::default()).unwrap_err();
        assert_eq!(
            err,
            ConcentrationError::TooLow {
                wells: vec!["B1".into()]
            }
        );
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let config = DilutionConfig::default();
        let entries = vec![entry("A1", config.min_conc), entry("B1", config.max_conc)];
        assert!(check_concentrations(&entries, &config).is_ok());
        assert!(check_concentrations(&[], &config).is_ok());
    }
}
