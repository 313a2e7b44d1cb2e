//! Stock (raw blank) proposal.
//!
//! Given a part, pick a stock family (prismatic block or round bar),
//! compute process margins, and produce the enclosing shape's dimensions
//! and placement. The core only computes the geometric spec; turning it
//! into a drawable CAD object is the host's job.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::geometry::Solid;

/// Stock shape family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockType {
    Block,
    Cylinder,
}

impl std::fmt::Display for StockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockType::Block => write!(f, "Block"),
            StockType::Cylinder => write!(f, "Cylinder"),
        }
    }
}

/// Per-side machining allowances in mm, all non-negative.
///
/// Z is asymmetric by default: more stock below the part than above,
/// reflecting typical fixturing allowance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub x_minus: f64,
    pub x_plus: f64,
    pub y_minus: f64,
    pub y_plus: f64,
    pub z_minus: f64,
    pub z_plus: f64,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            x_minus: 2.5,
            x_plus: 2.5,
            y_minus: 2.5,
            y_plus: 2.5,
            z_minus: 5.0,
            z_plus: 2.0,
        }
    }
}

impl Margins {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            x_minus: self.x_minus * factor,
            x_plus: self.x_plus * factor,
            y_minus: self.y_minus * factor,
            y_plus: self.y_plus * factor,
            z_minus: self.z_minus * factor,
            z_plus: self.z_plus * factor,
        }
    }

    /// Largest of the four lateral margins. Governs round-stock diameter.
    pub fn max_lateral(&self) -> f64 {
        self.x_minus.max(self.x_plus).max(self.y_minus).max(self.y_plus)
    }
}

/// Stock heuristics, overridable per call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockConfig {
    pub default_margins: Margins,
    /// Parts with a bbox diagonal above this (mm) get scaled margins.
    pub large_part_diagonal: f64,
    pub large_part_factor: f64,
    /// Max |Lx-Ly|/max(Lx,Ly) for a footprint to count as near-square.
    pub cylinder_xy_ratio: f64,
    /// Min Lz as a fraction of min(Lx,Ly) for round stock to make sense.
    pub cylinder_min_height_ratio: f64,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            default_margins: Margins::default(),
            large_part_diagonal: 500.0,
            large_part_factor: 1.5,
            cylinder_xy_ratio: 0.10,
            cylinder_min_height_ratio: 0.30,
        }
    }
}

/// Resulting stock dimensions per family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum StockDimensions {
    Block { length: f64, width: f64, height: f64 },
    Cylinder { diameter: f64, height: f64 },
}

/// Proposed raw-stock description around a part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSpec {
    pub stock_type: StockType,
    pub margins: Margins,
    pub orientation: String,
    pub dimensions: StockDimensions,
    /// Block: minimum corner. Cylinder: axis base point.
    pub origin: Vector3<f64>,
}

/// Pick a stock family from the part's bounding box.
///
/// Near-square footprint with proportionate height suggests turned round
/// stock; anything else (including degenerate extents) defaults to a
/// prismatic block.
pub fn choose_type(solid: &Solid) -> StockType {
    choose_type_with(solid, &StockConfig::default())
}

pub fn choose_type_with(solid: &Solid, config: &StockConfig) -> StockType {
    let bb = &solid.bound_box;
    let lx = bb.x_length();
    let ly = bb.y_length();
    let lz = bb.z_length();

    if lx <= 0.0 || ly <= 0.0 || lz <= 0.0 {
        return StockType::Block;
    }

    let ratio_xy = (lx - ly).abs() / lx.max(ly);
    if ratio_xy < config.cylinder_xy_ratio && lz > lx.min(ly) * config.cylinder_min_height_ratio {
        return StockType::Cylinder;
    }

    StockType::Block
}

/// Process margins for a part. Starts from the defaults; large parts
/// (bbox diagonal over the threshold) get all six margins scaled up.
/// A simple linear heuristic, not a physical model.
pub fn compute_margins(solid: &Solid) -> Margins {
    compute_margins_with(solid, &StockConfig::default())
}

pub fn compute_margins_with(solid: &Solid, config: &StockConfig) -> Margins {
    let margins = config.default_margins;
    if solid.bound_box.diagonal() > config.large_part_diagonal {
        margins.scaled(config.large_part_factor)
    } else {
        margins
    }
}

/// Build the enclosing stock spec for the given family and margins.
///
/// Round stock is sized by the worst-case lateral margin on the longest
/// XY extent, which may over-size the non-critical axis; the axis sits on
/// the part's XY bounding-box center with its base at Zmin - z_minus.
pub fn build_enclosure(solid: &Solid, margins: &Margins, stock_type: StockType) -> StockSpec {
    let bb = &solid.bound_box;
    let orientation = default_orientation();

    match stock_type {
        StockType::Cylinder => {
            let diameter = bb.x_length().max(bb.y_length()) + 2.0 * margins.max_lateral();
            let height = bb.z_length() + margins.z_minus + margins.z_plus;
            let center = bb.center();

            StockSpec {
                stock_type,
                margins: *margins,
                orientation,
                dimensions: StockDimensions::Cylinder { diameter, height },
                origin: Vector3::new(center.x, center.y, bb.min.z - margins.z_minus),
            }
        }
        StockType::Block => {
            let length = bb.x_length() + margins.x_minus + margins.x_plus;
            let width = bb.y_length() + margins.y_minus + margins.y_plus;
            let height = bb.z_length() + margins.z_minus + margins.z_plus;

            StockSpec {
                stock_type,
                margins: *margins,
                orientation,
                dimensions: StockDimensions::Block {
                    length,
                    width,
                    height,
                },
                origin: Vector3::new(
                    bb.min.x - margins.x_minus,
                    bb.min.y - margins.y_minus,
                    bb.min.z - margins.z_minus,
                ),
            }
        }
    }
}

/// Auto proposal: heuristic type + auto margins in one call.
pub fn propose(solid: &Solid) -> StockSpec {
    let margins = compute_margins(solid);
    let stock_type = choose_type(solid);
    build_enclosure(solid, &margins, stock_type)
}

/// Placeholder until face analysis can suggest a machining orientation.
fn default_orientation() -> String {
    "Z+ up (default orientation)".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundBox;
    use pretty_assertions::assert_eq;

    fn solid_with_bbox(lx: f64, ly: f64, lz: f64) -> Solid {
        Solid {
            faces: Vec::new(),
            volume: lx * ly * lz,
            bound_box: BoundBox::new(
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(lx, ly, lz),
            ),
        }
    }

    #[test]
    fn test_choose_type_cylinder_for_square_tall_part() {
        // ratio = 2/52 ≈ 0.038 < 0.10 and Lz 30 > 0.3 * 50 = 15
        let solid = solid_with_bbox(50.0, 52.0, 30.0);
        assert_eq!(choose_type(&solid), StockType::Cylinder);
    }

    #[test]
    fn test_choose_type_block_for_flat_part() {
        // Lz 5 < 15: too flat for round stock
        let solid = solid_with_bbox(50.0, 52.0, 5.0);
        assert_eq!(choose_type(&solid), StockType::Block);
    }

    #[test]
    fn test_choose_type_block_for_oblong_part() {
        let solid = solid_with_bbox(120.0, 40.0, 40.0);
        assert_eq!(choose_type(&solid), StockType::Block);
    }

    #[test]
    fn test_choose_type_block_for_degenerate_geometry() {
        let solid = solid_with_bbox(50.0, 50.0, 0.0);
        assert_eq!(choose_type(&solid), StockType::Block);
    }

    #[test]
    fn test_margins_default_for_small_parts() {
        let solid = solid_with_bbox(100.0, 60.0, 20.0);
        assert_eq!(compute_margins(&solid), Margins::default());
    }

    #[test]
    fn test_margins_scaled_for_large_parts() {
        // Diagonal = sqrt(3 * 400²) ≈ 692.8 > 500
        let solid = solid_with_bbox(400.0, 400.0, 400.0);
        let margins = compute_margins(&solid);
        assert_eq!(margins.x_minus, 3.75);
        assert_eq!(margins.x_plus, 3.75);
        assert_eq!(margins.y_minus, 3.75);
        assert_eq!(margins.y_plus, 3.75);
        assert_eq!(margins.z_minus, 7.5);
        assert_eq!(margins.z_plus, 3.0);
    }

    #[test]
    fn test_block_enclosure_dimensions_and_origin() {
        let solid = solid_with_bbox(100.0, 60.0, 20.0);
        let spec = build_enclosure(&solid, &Margins::default(), StockType::Block);

        assert_eq!(
            spec.dimensions,
            StockDimensions::Block {
                length: 105.0,
                width: 65.0,
                height: 27.0,
            }
        );
        assert_eq!(spec.origin, Vector3::new(-2.5, -2.5, -5.0));
        assert_eq!(spec.stock_type, StockType::Block);
    }

    #[test]
    fn test_cylinder_enclosure_dimensions_and_origin() {
        let solid = solid_with_bbox(50.0, 52.0, 30.0);
        let spec = build_enclosure(&solid, &Margins::default(), StockType::Cylinder);

        // Diameter governed by longest XY extent plus twice the worst margin
        assert_eq!(
            spec.dimensions,
            StockDimensions::Cylinder {
                diameter: 57.0,
                height: 37.0,
            }
        );
        // Axis on the part's XY center, base dropped by z_minus
        assert_eq!(spec.origin, Vector3::new(25.0, 26.0, -5.0));
    }

    #[test]
    fn test_cylinder_diameter_uses_worst_lateral_margin() {
        let solid = solid_with_bbox(50.0, 50.0, 30.0);
        let margins = Margins {
            x_plus: 4.0,
            ..Margins::default()
        };
        let spec = build_enclosure(&solid, &margins, StockType::Cylinder);
        assert_eq!(
            spec.dimensions,
            StockDimensions::Cylinder {
                diameter: 58.0,
                height: 37.0,
            }
        );
    }

    #[test]
    fn test_propose_combines_type_and_margins() {
        let solid = solid_with_bbox(50.0, 52.0, 30.0);
        let spec = propose(&solid);
        assert_eq!(spec.stock_type, StockType::Cylinder);
        assert_eq!(spec.margins, Margins::default());
        assert_eq!(spec.orientation, "Z+ up (default orientation)");
    }
}
