//! Chip-load time model: spindle speed, feed and chip-removal flow from
//! cutting parameters, then time = volume / flow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ChipTimeError {
    #[error("chip flow rate must be > 0 to derive a time (got {0} cm³/min)")]
    ZeroChipFlow(f64),
}

/// Cutting parameters for one tool/material pairing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuttingParameters {
    /// Tool diameter (mm).
    pub diameter: f64,
    /// Tooth count.
    pub teeth: u32,
    /// Cutting speed Vc (m/min).
    pub vc: f64,
    /// Feed per tooth Fz (mm/tooth).
    pub fz: f64,
    /// Axial engagement Ap (mm).
    pub ap: f64,
    /// Radial engagement Ae (mm).
    pub ae: f64,
}

/// Full result of a chip-flow time estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChipTimeEstimate {
    pub rpm: f64,
    pub feed_mm_min: f64,
    pub chip_flow_cm3_min: f64,
    pub time_min: f64,
    pub volume_mm3: f64,
    pub volume_cm3: f64,
}

/// n (rpm) = 1000 · Vc / (π · D). Zero on non-positive inputs.
pub fn spindle_rpm(vc_m_min: f64, diameter_mm: f64) -> f64 {
    if vc_m_min <= 0.0 || diameter_mm <= 0.0 {
        return 0.0;
    }
    (1000.0 * vc_m_min) / (std::f64::consts::PI * diameter_mm)
}

/// Vf (mm/min) = n · Z · Fz. Zero on non-positive inputs.
pub fn feed_rate(rpm: f64, teeth: u32, fz_mm: f64) -> f64 {
    if rpm <= 0.0 || teeth == 0 || fz_mm <= 0.0 {
        return 0.0;
    }
    rpm * teeth as f64 * fz_mm
}

/// Chip-removal flow (mm³/min) = Ap · Ae · Vf. Zero on non-positive
/// engagement.
pub fn chip_flow(ap_mm: f64, ae_mm: f64, feed_mm_min: f64) -> f64 {
    if ap_mm <= 0.0 || ae_mm <= 0.0 {
        return 0.0;
    }
    ap_mm * ae_mm * feed_mm_min
}

/// Estimate machining time by chip-removal flow.
///
/// The natural flow derived from the parameters can be replaced by a
/// positive `chip_flow_override_cm3_min` when the caller knows the
/// achievable removal rate better than the geometric model. Degenerate
/// cutting parameters propagate as zero rpm/feed/flow, and a zero flow at
/// the time step is an error, not a zero time.
pub fn estimate_chip_time(
    params: &CuttingParameters,
    volume_mm3: f64,
    chip_flow_override_cm3_min: Option<f64>,
) -> Result<ChipTimeEstimate, ChipTimeError> {
    let rpm = spindle_rpm(params.vc, params.diameter);
    let feed = feed_rate(rpm, params.teeth, params.fz);

    let mut chip_cm3_min = chip_flow(params.ap, params.ae, feed) / 1000.0;
    if let Some(flow) = chip_flow_override_cm3_min {
        if flow > 0.0 {
            chip_cm3_min = flow;
        }
    }

    if chip_cm3_min <= 0.0 {
        return Err(ChipTimeError::ZeroChipFlow(chip_cm3_min));
    }

    let volume_cm3 = volume_mm3 / 1000.0;
    Ok(ChipTimeEstimate {
        rpm,
        feed_mm_min: feed,
        chip_flow_cm3_min: chip_cm3_min,
        time_min: volume_cm3 / chip_cm3_min,
        volume_mm3,
        volume_cm3,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_params() -> CuttingParameters {
        CuttingParameters {
            diameter: 10.0,
            teeth: 4,
            vc: 150.0,
            fz: 0.05,
            ap: 5.0,
            ae: 4.0,
        }
    }

    #[test]
    fn test_spindle_rpm() {
        let rpm = spindle_rpm(150.0, 10.0);
        assert!((rpm - 4774.648293).abs() < 1e-4);

        assert_eq!(spindle_rpm(0.0, 10.0), 0.0);
        assert_eq!(spindle_rpm(150.0, -1.0), 0.0);
    }

    #[test]
    fn test_feed_rate() {
        let rpm = spindle_rpm(150.0, 10.0);
        let feed = feed_rate(rpm, 4, 0.05);
        assert!((feed - 954.929659).abs() < 1e-4);

        assert_eq!(feed_rate(0.0, 4, 0.05), 0.0);
        assert_eq!(feed_rate(rpm, 0, 0.05), 0.0);
    }

    #[test]
    fn test_reference_estimate() {
        // rpm ≈ 4774.65, feed ≈ 954.93 mm/min, flow ≈ 19.10 cm³/min,
        // time = 100 cm³ / 19.10 ≈ 5.236 min
        let estimate = estimate_chip_time(&reference_params(), 100_000.0, None).unwrap();

        assert!((estimate.rpm - 4774.648293).abs() < 1e-4);
        assert!((estimate.feed_mm_min - 954.929659).abs() < 1e-4);
        assert!((estimate.chip_flow_cm3_min - 19.098593).abs() < 1e-4);
        assert!((estimate.time_min - 5.235988).abs() < 1e-4);
        assert_eq!(estimate.volume_cm3, 100.0);
    }

    #[test]
    fn test_override_replaces_natural_flow() {
        let estimate = estimate_chip_time(&reference_params(), 100_000.0, Some(50.0)).unwrap();
        assert_eq!(estimate.chip_flow_cm3_min, 50.0);
        assert_eq!(estimate.time_min, 2.0);
    }

    #[test]
    fn test_non_positive_override_is_ignored() {
        let estimate = estimate_chip_time(&reference_params(), 100_000.0, Some(0.0)).unwrap();
        assert!((estimate.chip_flow_cm3_min - 19.098593).abs() < 1e-4);
    }

    #[test]
    fn test_zero_flow_fails_loudly() {
        let params = CuttingParameters {
            vc: 0.0,
            ..reference_params()
        };
        let err = estimate_chip_time(&params, 100_000.0, None).unwrap_err();
        assert_eq!(err, ChipTimeError::ZeroChipFlow(0.0));

        // An override cannot rescue itself with a non-positive value
        let err = estimate_chip_time(&params, 100_000.0, Some(-3.0)).unwrap_err();
        assert_eq!(err, ChipTimeError::ZeroChipFlow(0.0));
    }
}
