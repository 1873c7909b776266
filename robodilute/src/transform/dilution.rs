//! Per-well dilution volumes.

use crate::config::DilutionConfig;

/// Sample and buffer volumes for one well, at full precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volumes {
    pub sample_vol: f64,
    pub buffer_vol: f64,
}

/// Volumes needed to put `target_mass_ug` into `target_total_vol_ul`.
///
/// `org_con` must be positive; the concentration check guarantees it.
/// The buffer volume is not clamped and goes negative when the sample
/// alone exceeds the total volume.
pub fn compute_volumes(org_con: f64, config: &DilutionConfig) -> Volumes {
    let sample_vol = config.target_mass_ug / org_con;
    Volumes {
        sample_vol,
        buffer_vol: config.target_total_vol_ul - sample_vol,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_wells() {
        let config = DilutionConfig::default();

        let v = compute_volumes(5.0, &config);
        assert_eq!(v.sample_vol, 2.0);
        assert_eq!(v.buffer_vol, 28.0);

        let v = compute_volumes(0.5, &config);
        assert_eq!(v.sample_vol, 20.0);
        assert_eq!(v.buffer_vol, 10.0);
    }

    #[test]
    fn test_volumes_sum_to_total() {
        let config = DilutionConfig::default();
        for con in [0.33, 0.4, 1.0, 3.7, 12.5, 20.0] {
            let v = compute_volumes(con, &config);
            assert_eq!(v.sample_vol, 10.0 / con);
            assert!((v.sample_vol + v.buffer_vol - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_negative_buffer_not_clamped() {
        let v = compute_volumes(0.33, &DilutionConfig::default());
        assert!(v.sample_vol > 30.0);
        assert!(v.buffer_vol < 0.0);
    }
}
