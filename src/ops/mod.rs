//! Machining operations and their material-removal volumes.
//!
//! The operation kind is decided once at the boundary (UI or
//! deserialization) and carried as a tagged union from then on; unknown
//! kinds cannot reach the volume model. Each variant carries exactly the
//! fields its formula needs, and a missing or non-positive field is an
//! error, never a silent default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum OperationError {
    #[error("{op}: {field} must be > 0 (got {value})")]
    InvalidData {
        op: &'static str,
        field: &'static str,
        value: f64,
    },
}

/// One classified machining operation. Depths are magnitudes: the sign a
/// UI hands over is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MachiningOperation {
    Facing {
        /// Face area to sweep (mm²).
        area: f64,
        depth: f64,
    },
    Pocket {
        area: f64,
        depth: f64,
    },
    Drilling {
        hole_count: u32,
        hole_diameter: f64,
        depth: f64,
    },
    Slotting {
        length: f64,
        width: f64,
        depth: f64,
    },
    Contouring {
        /// Tool-path length (mm). Tool-width contribution is the caller's
        /// concern.
        length: f64,
        depth: f64,
    },
    Chamfer {
        area: f64,
        chamfer_width: f64,
        depth: f64,
    },
}

impl MachiningOperation {
    pub fn name(&self) -> &'static str {
        match self {
            MachiningOperation::Facing { .. } => "facing",
            MachiningOperation::Pocket { .. } => "pocket",
            MachiningOperation::Drilling { .. } => "drilling",
            MachiningOperation::Slotting { .. } => "slotting",
            MachiningOperation::Contouring { .. } => "contouring",
            MachiningOperation::Chamfer { .. } => "chamfer",
        }
    }
}

fn require_positive(op: &'static str, field: &'static str, value: f64) -> Result<f64, OperationError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(OperationError::InvalidData { op, field, value })
    }
}

/// Material-removal volume in mm³ for one operation.
///
/// Facing/Pocket: area × depth. Drilling: n × π(Ø/2)² × depth.
/// Slotting: length × width × depth. Contouring: length × depth.
/// Chamfer: area × depth × 0.5 (45° triangular approximation).
pub fn compute_volume(op: &MachiningOperation) -> Result<f64, OperationError> {
    let name = op.name();
    match *op {
        MachiningOperation::Facing { area, depth } | MachiningOperation::Pocket { area, depth } => {
            let area = require_positive(name, "area", area)?;
            Ok(area * depth.abs())
        }
        MachiningOperation::Drilling {
            hole_count,
            hole_diameter,
            depth,
        } => {
            if hole_count == 0 {
                return Err(OperationError::InvalidData {
                    op: name,
                    field: "hole_count",
                    value: 0.0,
                });
            }
            let diameter = require_positive(name, "hole_diameter", hole_diameter)?;
            let radius = diameter / 2.0;
            Ok(hole_count as f64 * std::f64::consts::PI * radius * radius * depth.abs())
        }
        MachiningOperation::Slotting {
            length,
            width,
            depth,
        } => {
            let length = require_positive(name, "length", length)?;
            let width = require_positive(name, "width", width)?;
            Ok(length * width * depth.abs())
        }
        MachiningOperation::Contouring { length, depth } => {
            let length = require_positive(name, "length", length)?;
            Ok(length * depth.abs())
        }
        MachiningOperation::Chamfer {
            area,
            chamfer_width,
            depth,
        } => {
            let area = require_positive(name, "area", area)?;
            require_positive(name, "chamfer_width", chamfer_width)?;
            Ok(area * depth.abs() * 0.5)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_facing_and_pocket_volume() {
        let facing = MachiningOperation::Facing {
            area: 200.0,
            depth: 3.0,
        };
        assert_eq!(compute_volume(&facing).unwrap(), 600.0);

        let pocket = MachiningOperation::Pocket {
            area: 150.0,
            depth: 10.0,
        };
        assert_eq!(compute_volume(&pocket).unwrap(), 1500.0);
    }

    #[test]
    fn test_drilling_volume() {
        // 4 holes, Ø10, depth 20: 4 * π * 25 * 20 ≈ 6283.19 mm³
        let op = MachiningOperation::Drilling {
            hole_count: 4,
            hole_diameter: 10.0,
            depth: 20.0,
        };
        let volume = compute_volume(&op).unwrap();
        assert!((volume - 6283.185307).abs() < 1e-4);
    }

    #[test]
    fn test_slotting_and_contouring_volume() {
        let slot = MachiningOperation::Slotting {
            length: 80.0,
            width: 12.0,
            depth: 5.0,
        };
        assert_eq!(compute_volume(&slot).unwrap(), 4800.0);

        let contour = MachiningOperation::Contouring {
            length: 250.0,
            depth: 8.0,
        };
        assert_eq!(compute_volume(&contour).unwrap(), 2000.0);
    }

    #[test]
    fn test_chamfer_volume_triangular() {
        let op = MachiningOperation::Chamfer {
            area: 100.0,
            chamfer_width: 2.0,
            depth: 2.0,
        };
        assert_eq!(compute_volume(&op).unwrap(), 100.0);
    }

    #[test]
    fn test_depth_sign_is_magnitude() {
        let op = MachiningOperation::Facing {
            area: 100.0,
            depth: -5.0,
        };
        assert_eq!(compute_volume(&op).unwrap(), 500.0);
    }

    #[test]
    fn test_missing_data_is_an_error() {
        let op = MachiningOperation::Facing {
            area: 0.0,
            depth: 5.0,
        };
        assert_eq!(
            compute_volume(&op).unwrap_err(),
            OperationError::InvalidData {
                op: "facing",
                field: "area",
                value: 0.0,
            }
        );

        let op = MachiningOperation::Drilling {
            hole_count: 0,
            hole_diameter: 10.0,
            depth: 20.0,
        };
        assert!(compute_volume(&op).is_err());

        let op = MachiningOperation::Slotting {
            length: 80.0,
            width: -1.0,
            depth: 5.0,
        };
        assert!(compute_volume(&op).is_err());
    }

    #[test]
    fn test_unknown_kind_rejected_at_boundary() {
        let err = serde_json::from_str::<MachiningOperation>(
            r#"{ "kind": "engraving", "depth": 1.0 }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("engraving"));
    }

    #[test]
    fn test_kind_decided_once_at_boundary() {
        let op: MachiningOperation = serde_json::from_str(
            r#"{ "kind": "drilling", "hole_count": 4, "hole_diameter": 10.0, "depth": 20.0 }"#,
        )
        .unwrap();
        assert_eq!(op.name(), "drilling");
        assert!(compute_volume(&op).is_ok());
    }
}
