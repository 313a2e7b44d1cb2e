//! Quick feed-based time models with pass counting.
//!
//! These approximate an operation as an equivalent cut length run at the
//! feed rate, multiplied by the number of depth and radial passes. They
//! trade accuracy for needing nothing but a few scalars, which is what a
//! quoting pass wants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum FeedTimeError {
    #[error("feed rate must be > 0 (got {0} mm/min)")]
    InvalidFeed(f64),
}

/// Result of a pass-based time model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedTimeEstimate {
    pub time_min: f64,
    pub depth_passes: u32,
    pub radial_passes: u32,
    /// Equivalent single-pass cut length (mm).
    pub length_mm: f64,
}

/// Number of depth passes: ceil(|depth| / |ap|), at least one.
pub fn depth_passes(depth_total: f64, ap_max: f64) -> u32 {
    let depth = depth_total.abs();
    let ap = ap_max.abs();
    if ap <= 0.0 {
        return 1;
    }
    ((depth / ap).ceil() as u32).max(1)
}

/// Number of radial passes over an XY allowance: ceil(|xy| / |ae|), at
/// least one.
pub fn radial_passes(xy_allowance: f64, ae_mm: f64) -> u32 {
    let xy = xy_allowance.abs();
    let ae = ae_mm.abs();
    if ae <= 0.0 || xy <= 0.0 {
        return 1;
    }
    ((xy / ae).ceil() as u32).max(1)
}

fn check_feed(feed_mm_min: f64) -> Result<(), FeedTimeError> {
    if feed_mm_min <= 0.0 {
        Err(FeedTimeError::InvalidFeed(feed_mm_min))
    } else {
        Ok(())
    }
}

/// Equivalent cut length for an area swept at radial engagement `ae`.
fn equivalent_length(area_mm2: f64, ae_mm: f64) -> f64 {
    area_mm2 / ae_mm.max(0.001)
}

/// Facing: one radial pass over the area at engagement `ae`.
pub fn facing_time(
    area_mm2: f64,
    depth_total: f64,
    ap_max: f64,
    ae_mm: f64,
    feed_mm_min: f64,
) -> Result<FeedTimeEstimate, FeedTimeError> {
    check_feed(feed_mm_min)?;

    let length = equivalent_length(area_mm2, ae_mm);
    Ok(FeedTimeEstimate {
        time_min: length / feed_mm_min,
        depth_passes: depth_passes(depth_total, ap_max),
        radial_passes: 1,
        length_mm: length,
    })
}

/// Contouring: the profile length run once per depth and radial pass.
pub fn contour_time(
    length_mm: f64,
    depth_total: f64,
    ap_max: f64,
    xy_allowance: f64,
    ae_mm: f64,
    feed_mm_min: f64,
) -> Result<FeedTimeEstimate, FeedTimeError> {
    check_feed(feed_mm_min)?;

    let passes_z = depth_passes(depth_total, ap_max);
    let passes_rad = radial_passes(xy_allowance, ae_mm);
    Ok(FeedTimeEstimate {
        time_min: (length_mm * passes_z as f64 * passes_rad as f64) / feed_mm_min,
        depth_passes: passes_z,
        radial_passes: passes_rad,
        length_mm,
    })
}

/// Pocketing: equivalent length from the pocket area, per depth and
/// radial pass.
pub fn pocket_time(
    area_mm2: f64,
    depth_total: f64,
    ap_max: f64,
    xy_allowance: f64,
    ae_mm: f64,
    feed_mm_min: f64,
) -> Result<FeedTimeEstimate, FeedTimeError> {
    check_feed(feed_mm_min)?;

    let passes_z = depth_passes(depth_total, ap_max);
    let passes_rad = radial_passes(xy_allowance, ae_mm);
    let length = equivalent_length(area_mm2, ae_mm);
    Ok(FeedTimeEstimate {
        time_min: (length * passes_z as f64 * passes_rad as f64) / feed_mm_min,
        depth_passes: passes_z,
        radial_passes: passes_rad,
        length_mm: length,
    })
}
