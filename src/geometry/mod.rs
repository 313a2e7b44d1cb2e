//! Geometry boundary: the read-only data the CAD host hands to the core.
//!
//! The core never owns live CAD objects. The host (or a test) snapshots a
//! solid into [`Solid`] — faces with their surface parameters, areas,
//! bounding boxes and edges — and every downstream computation is a pure
//! function of that snapshot.

use cgmath::{InnerSpace, Vector3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const X_AXIS: Vector3<f64> = Vector3 {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};
pub const Y_AXIS: Vector3<f64> = Vector3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};
pub const Z_AXIS: Vector3<f64> = Vector3 {
    x: 0.0,
    y: 0.0,
    z: 1.0,
};

/// Angular tolerance on |dot| - 1 for direction comparisons.
pub const TOL_DIR: f64 = 0.1;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("no usable solid found (empty face list)")]
    MissingSolid,

    #[error("failed to parse solid description: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Axis-aligned bounding box in mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundBox {
    pub min: Vector3<f64>,
    pub max: Vector3<f64>,
}

impl BoundBox {
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        Self { min, max }
    }

    pub fn x_length(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn y_length(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn z_length(&self) -> f64 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> Vector3<f64> {
        (self.min + self.max) * 0.5
    }

    /// Space diagonal of the box.
    pub fn diagonal(&self) -> f64 {
        (self.x_length().powi(2) + self.y_length().powi(2) + self.z_length().powi(2)).sqrt()
    }
}

/// Surface classification of a face, with the parameters the detector needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Surface {
    Plane { normal: Vector3<f64> },
    Cylinder { axis: Vector3<f64>, radius: f64 },
    Other,
}

/// One edge of a face, endpoint-encoded. `length` comes from the host
/// because for arcs the true length differs from the chord.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Vector3<f64>,
    pub end: Vector3<f64>,
    pub length: f64,
}

/// A bounded surface patch of a solid. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    pub surface: Surface,
    /// Area in mm².
    pub area: f64,
    pub bound_box: BoundBox,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Snapshot of a 3D body from the CAD host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub faces: Vec<Face>,
    /// Volume in mm³.
    pub volume: f64,
    pub bound_box: BoundBox,
}

impl Solid {
    /// Parse a JSON part description. A solid with no faces is rejected:
    /// nothing downstream can do anything useful with it.
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        let solid: Solid = serde_json::from_str(json)?;
        if solid.faces.is_empty() {
            return Err(GeometryError::MissingSolid);
        }
        Ok(solid)
    }
}

/// True when the two directions are parallel (either sense) within `tol`
/// on |dot| - 1. Zero-length vectors are parallel to nothing.
pub fn is_parallel(a: Vector3<f64>, b: Vector3<f64>, tol: f64) -> bool {
    if a.magnitude2() == 0.0 || b.magnitude2() == 0.0 {
        return false;
    }
    let an = a.normalize();
    let bn = b.normalize();
    (an.dot(bn).abs() - 1.0).abs() <= tol
}

pub fn is_horizontal(normal: Vector3<f64>, tol: f64) -> bool {
    is_parallel(normal, Z_AXIS, tol)
}

pub fn is_vertical(normal: Vector3<f64>, tol: f64) -> bool {
    is_parallel(normal, X_AXIS, tol) || is_parallel(normal, Y_AXIS, tol)
}

/// Round to a fixed number of decimal places, half away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parallel_exact_and_opposite() {
        assert!(is_parallel(Z_AXIS, Z_AXIS, TOL_DIR));
        assert!(is_parallel(Z_AXIS, -Z_AXIS, TOL_DIR));
        assert!(!is_parallel(Z_AXIS, X_AXIS, TOL_DIR));
    }

    #[test]
    fn test_parallel_within_tolerance() {
        // Slightly tilted normal still counts as vertical-axis parallel
        let tilted = Vector3::new(0.05, 0.0, 1.0);
        assert!(is_parallel(tilted, Z_AXIS, TOL_DIR));

        // 45 degrees is far outside the tolerance
        let diagonal = Vector3::new(1.0, 0.0, 1.0);
        assert!(!is_parallel(diagonal, Z_AXIS, TOL_DIR));
    }

    #[test]
    fn test_zero_vector_never_parallel() {
        let zero = Vector3::new(0.0, 0.0, 0.0);
        assert!(!is_parallel(zero, Z_AXIS, TOL_DIR));
        assert!(!is_parallel(Z_AXIS, zero, TOL_DIR));
    }

    #[test]
    fn test_vertical_matches_both_in_plane_axes() {
        assert!(is_vertical(X_AXIS, TOL_DIR));
        assert!(is_vertical(-Y_AXIS, TOL_DIR));
        assert!(!is_vertical(Z_AXIS, TOL_DIR));
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(10.0004, 3), 10.0);
        assert_eq!(round_to(10.0006, 3), 10.001);
        assert_eq!(round_to(12.34, 1), 12.3);
        // half away from zero
        assert_eq!(round_to(-2.5, 0), -3.0);
    }

    #[test]
    fn test_bound_box_extents() {
        let bb = BoundBox::new(Vector3::new(-5.0, 0.0, -2.0), Vector3::new(5.0, 20.0, 8.0));
        assert_eq!(bb.x_length(), 10.0);
        assert_eq!(bb.y_length(), 20.0);
        assert_eq!(bb.z_length(), 10.0);
        assert_eq!(bb.center(), Vector3::new(0.0, 10.0, 3.0));
    }

    #[test]
    fn test_solid_from_json_rejects_empty() {
        let json = r#"{
            "faces": [],
            "volume": 0.0,
            "bound_box": {
                "min": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "max": { "x": 0.0, "y": 0.0, "z": 0.0 }
            }
        }"#;
        let err = Solid::from_json(json).unwrap_err();
        assert!(matches!(err, GeometryError::MissingSolid));
    }

    #[test]
    fn test_solid_from_json() {
        let json = r#"{
            "faces": [
                {
                    "surface": { "type": "plane", "normal": { "x": 0.0, "y": 0.0, "z": 1.0 } },
                    "area": 100.0,
                    "bound_box": {
                        "min": { "x": 0.0, "y": 0.0, "z": 10.0 },
                        "max": { "x": 10.0, "y": 10.0, "z": 10.0 }
                    }
                }
            ],
            "volume": 1000.0,
            "bound_box": {
                "min": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "max": { "x": 10.0, "y": 10.0, "z": 10.0 }
            }
        }"#;
        let solid = Solid::from_json(json).expect("parse failed");
        assert_eq!(solid.faces.len(), 1);
        assert_eq!(solid.faces[0].area, 100.0);
        assert!(matches!(solid.faces[0].surface, Surface::Plane { .. }));
    }
}
