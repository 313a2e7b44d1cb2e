//! Path time model: reconstruct travel distances from a motion-command
//! sequence and derive time from the caller's feed rates.
//!
//! Arcs (G2/G3) are measured as straight-line chords between endpoints;
//! the consumed commands are endpoint-encoded anyway, so true arc length
//! is not reconstructible here.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum PathTimeError {
    #[error("no motion commands available")]
    MissingPath,

    #[error("cut feed must be > 0 (got {0} mm/min)")]
    InvalidFeed(f64),
}

/// One motion command as consumed from a CAM tool path. Coordinates are
/// optional; an omitted axis keeps its last known value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionCommand {
    /// Motion code such as "G0", "G1", "G2"...
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
}

impl MotionCommand {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            x: None,
            y: None,
            z: None,
        }
    }

    pub fn xy(code: &str, x: f64, y: f64) -> Self {
        Self {
            code: code.to_string(),
            x: Some(x),
            y: Some(y),
            z: None,
        }
    }

    pub fn xyz(code: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            code: code.to_string(),
            x: Some(x),
            y: Some(y),
            z: Some(z),
        }
    }
}

/// One reconstructed travel step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionSegment {
    pub code: String,
    pub distance_mm: f64,
}

/// Cut/rapid travel lengths and times for one tool path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathTimeEstimate {
    pub cut_length_mm: f64,
    pub rapid_length_mm: f64,
    pub cut_time_min: f64,
    pub rapid_time_min: f64,
    pub total_time_min: f64,
}

fn is_cut_code(code: &str) -> bool {
    matches!(code, "G1" | "G01" | "G2" | "G02" | "G3" | "G03")
}

fn is_rapid_code(code: &str) -> bool {
    matches!(code, "G0" | "G00")
}

/// Rebuild travel segments from a command sequence, carrying the last
/// known position forward (starting at the origin). The first command
/// only establishes position; every later one yields a segment. Codes
/// that are neither cut nor rapid still move the reference point.
pub fn extract_segments(commands: &[MotionCommand]) -> Vec<MotionSegment> {
    let mut segments = Vec::new();

    let (mut last_x, mut last_y, mut last_z) = (0.0_f64, 0.0_f64, 0.0_f64);
    let mut first = true;

    for cmd in commands {
        let x = cmd.x.unwrap_or(last_x);
        let y = cmd.y.unwrap_or(last_y);
        let z = cmd.z.unwrap_or(last_z);

        if first {
            first = false;
        } else {
            let (dx, dy, dz) = (x - last_x, y - last_y, z - last_z);
            segments.push(MotionSegment {
                code: cmd.code.to_uppercase(),
                distance_mm: (dx * dx + dy * dy + dz * dz).sqrt(),
            });
        }

        last_x = x;
        last_y = y;
        last_z = z;
    }

    segments
}

/// Estimate machining time from a motion-command sequence.
///
/// Cut time uses `cut_feed_mm_min` over G1/G2/G3 travel. Rapid (G0)
/// travel is only timed when `include_rapids` is set, at
/// `rapid_feed_mm_min` when that is provided and positive, else at the
/// cut feed.
pub fn estimate_path_time(
    commands: &[MotionCommand],
    cut_feed_mm_min: f64,
    rapid_feed_mm_min: Option<f64>,
    include_rapids: bool,
) -> Result<PathTimeEstimate, PathTimeError> {
    if commands.is_empty() {
        return Err(PathTimeError::MissingPath);
    }
    if cut_feed_mm_min <= 0.0 {
        return Err(PathTimeError::InvalidFeed(cut_feed_mm_min));
    }

    let mut cut_length = 0.0;
    let mut rapid_length = 0.0;

    for segment in extract_segments(commands) {
        if is_cut_code(&segment.code) {
            cut_length += segment.distance_mm;
        } else if is_rapid_code(&segment.code) {
            rapid_length += segment.distance_mm;
        }
        // Other codes contribute no distance
    }

    let cut_time = cut_length / cut_feed_mm_min;

    let rapid_time = if include_rapids {
        let effective = match rapid_feed_mm_min {
            Some(feed) if feed > 0.0 => feed,
            _ => cut_feed_mm_min,
        };
        rapid_length / effective
    } else {
        0.0
    };

    Ok(PathTimeEstimate {
        cut_length_mm: cut_length,
        rapid_length_mm: rapid_length,
        cut_time_min: cut_time,
        rapid_time_min: rapid_time,
        total_time_min: cut_time + rapid_time,
    })
}
