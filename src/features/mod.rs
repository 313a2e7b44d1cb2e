//! Milling feature detection.
//!
//! Classifies a solid's faces into horizontal planar regions, vertical
//! flank clusters and cylindrical holes. Detection is a pure function of
//! the face list and never fails: a solid without faces of a given kind
//! simply yields an empty list for that kind.
//!
//! All clustering here is greedy first-fit over the face list in index
//! order, so results are deterministic for a given snapshot. Detected
//! features reference their constituent faces by index into
//! `solid.faces`.

use cgmath::Vector3;
use serde::{Deserialize, Serialize};

use crate::geometry::{is_horizontal, is_parallel, is_vertical, round_to, Solid, Surface, Z_AXIS};

/// Tunable detection thresholds. The defaults are pragmatic values, not
/// physical constants; callers with unusual parts can override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Angular tolerance on |dot| - 1 for all direction tests.
    pub direction_tol: f64,
    /// Cylindrical faces below this area (mm²) are treated as chamfer
    /// fillets around holes and skipped. Known limitation: small precision
    /// holes below the threshold are missed.
    pub min_hole_area: f64,
    /// Max XY distance (mm) between rounded hole centers to merge.
    pub hole_center_tol: f64,
    /// Max radius difference (mm) between candidates to merge.
    pub hole_radius_tol: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            direction_tol: crate::geometry::TOL_DIR,
            min_hole_area: 30.0,
            hole_center_tol: 0.2,
            hole_radius_tol: 0.2,
        }
    }
}

/// Which side of Z=0 a horizontal plane sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneKind {
    OuterTop,
    OuterBottom,
}

impl std::fmt::Display for PlaneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaneKind::OuterTop => write!(f, "outer_top"),
            PlaneKind::OuterBottom => write!(f, "outer_bottom"),
        }
    }
}

/// Horizontal planar region: all member faces share a top Z within the
/// 0.001 mm rounding grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaneFeature {
    /// Indices into `solid.faces`.
    pub faces: Vec<usize>,
    /// Z height, rounded to 0.001 mm.
    pub z: f64,
    /// Sum of member face areas (mm²).
    pub area: f64,
    pub kind: PlaneKind,
}

/// Cluster of vertical planar faces sharing an in-plane normal direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalFlank {
    /// Indices into `solid.faces`.
    pub faces: Vec<usize>,
    /// Normal of the first face assigned to the cluster.
    pub normal: Vector3<f64>,
    /// Sum of member face areas (mm²).
    pub area: f64,
}

/// Hole classification. Only one kind is produced today: the detector
/// does not distinguish through holes from blind ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoleKind {
    BlindFromBottom,
}

impl std::fmt::Display for HoleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoleKind::BlindFromBottom => write!(f, "blind_from_bottom"),
        }
    }
}

/// Group of coaxial cylindrical faces forming one hole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CylindricalHole {
    /// Indices into `solid.faces`.
    pub faces: Vec<usize>,
    /// XY center of the anchor candidate, rounded to 0.1 mm. Z is unset (0).
    pub center: Vector3<f64>,
    /// Radius in mm, rounded to 0.001.
    pub radius: f64,
    /// Top of the merged vertical extent, rounded to 0.001 mm.
    pub ztop: f64,
    /// Bottom of the merged vertical extent, rounded to 0.001 mm.
    pub zbottom: f64,
    pub kind: HoleKind,
}

/// Immutable detection snapshot for one solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MillingFeatures {
    pub planes: Vec<PlaneFeature>,
    pub flanks: Vec<VerticalFlank>,
    pub holes: Vec<CylindricalHole>,
}

/// Detect all milling features with default thresholds.
pub fn detect(solid: &Solid) -> MillingFeatures {
    detect_with(solid, &DetectorConfig::default())
}

/// Detect all milling features with explicit thresholds.
pub fn detect_with(solid: &Solid, config: &DetectorConfig) -> MillingFeatures {
    MillingFeatures {
        planes: detect_horizontal_planes(solid, config),
        flanks: detect_vertical_flanks(solid, config),
        holes: detect_cylindrical_holes(solid, config),
    }
}

/// Bucket horizontal planar faces by top Z rounded to 0.001 mm.
///
/// Buckets appear in first-seen order. Faces whose rounded Z differs are
/// deliberately NOT merged, even when nearly coplanar: a part with many
/// slightly offset faces yields many small features.
pub fn detect_horizontal_planes(solid: &Solid, config: &DetectorConfig) -> Vec<PlaneFeature> {
    // Key = Z in micrometres; linear scan keeps first-seen bucket order.
    let mut buckets: Vec<(i64, PlaneFeature)> = Vec::new();

    for (idx, face) in solid.faces.iter().enumerate() {
        let normal = match face.surface {
            Surface::Plane { normal } => normal,
            _ => continue,
        };
        if !is_horizontal(normal, config.direction_tol) {
            continue;
        }

        let z = round_to(face.bound_box.max.z, 3);
        let key = (z * 1000.0).round() as i64;

        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, plane)) => {
                plane.faces.push(idx);
                plane.area += face.area;
            }
            None => {
                let kind = if z > 0.0 {
                    PlaneKind::OuterTop
                } else {
                    PlaneKind::OuterBottom
                };
                buckets.push((
                    key,
                    PlaneFeature {
                        faces: vec![idx],
                        z,
                        area: face.area,
                        kind,
                    },
                ));
            }
        }
    }

    buckets.into_iter().map(|(_, plane)| plane).collect()
}

/// Cluster vertical planar faces by normal direction, greedy first-fit in
/// face index order: each face joins the first existing cluster whose
/// representative normal is parallel to its own, else starts a new one.
pub fn detect_vertical_flanks(solid: &Solid, config: &DetectorConfig) -> Vec<VerticalFlank> {
    let mut clusters: Vec<VerticalFlank> = Vec::new();

    for (idx, face) in solid.faces.iter().enumerate() {
        let normal = match face.surface {
            Surface::Plane { normal } => normal,
            _ => continue,
        };
        if !is_vertical(normal, config.direction_tol) {
            continue;
        }

        match clusters
            .iter_mut()
            .find(|c| is_parallel(normal, c.normal, config.direction_tol))
        {
            Some(cluster) => {
                cluster.faces.push(idx);
                cluster.area += face.area;
            }
            None => clusters.push(VerticalFlank {
                faces: vec![idx],
                normal,
                area: face.area,
            }),
        }
    }

    clusters
}

/// Raw per-face hole candidate before coaxial merging.
struct HoleCandidate {
    face: usize,
    cx: f64,
    cy: f64,
    radius: f64,
    ztop: f64,
    zbottom: f64,
}

/// Detect vertical cylindrical holes.
///
/// A candidate is a cylindrical face whose axis is parallel to Z and whose
/// area clears the chamfer filter. Candidates are merged in a single
/// greedy pass: the earliest unmerged candidate anchors a group and
/// absorbs every later candidate within center/radius tolerance of it.
pub fn detect_cylindrical_holes(solid: &Solid, config: &DetectorConfig) -> Vec<CylindricalHole> {
    let mut raw: Vec<HoleCandidate> = Vec::new();

    for (idx, face) in solid.faces.iter().enumerate() {
        let (axis, radius) = match face.surface {
            Surface::Cylinder { axis, radius } => (axis, radius),
            _ => continue,
        };
        if !is_parallel(axis, Z_AXIS, config.direction_tol) {
            continue;
        }
        // Chamfer fillets around holes show up as small cylinder slivers.
        if face.area < config.min_hole_area {
            continue;
        }

        let center = face.bound_box.center();
        raw.push(HoleCandidate {
            face: idx,
            cx: round_to(center.x, 1),
            cy: round_to(center.y, 1),
            radius: round_to(radius, 3),
            ztop: round_to(face.bound_box.max.z, 3),
            zbottom: round_to(face.bound_box.min.z, 3),
        });
    }

    let mut holes = Vec::new();
    let mut used = vec![false; raw.len()];

    for i in 0..raw.len() {
        if used[i] {
            continue;
        }
        used[i] = true;

        let anchor = &raw[i];
        let mut faces = vec![anchor.face];
        let mut ztop = anchor.ztop;
        let mut zbottom = anchor.zbottom;

        for j in (i + 1)..raw.len() {
            if used[j] {
                continue;
            }
            let other = &raw[j];
            if (other.cx - anchor.cx).abs() <= config.hole_center_tol
                && (other.cy - anchor.cy).abs() <= config.hole_center_tol
                && (other.radius - anchor.radius).abs() <= config.hole_radius_tol
            {
                used[j] = true;
                faces.push(other.face);
                ztop = ztop.max(other.ztop);
                zbottom = zbottom.min(other.zbottom);
            }
        }

        holes.push(CylindricalHole {
            faces,
            center: Vector3::new(anchor.cx, anchor.cy, 0.0),
            radius: anchor.radius,
            ztop,
            zbottom,
            kind: HoleKind::BlindFromBottom,
        });
    }

    holes
}

/// Entry/exit allowance added to any non-zero contour length (mm).
pub const CONTOUR_LEAD_ALLOWANCE: f64 = 4.0;

/// Tolerance on |Δz| below which an edge counts as horizontal (mm).
pub const CONTOUR_EDGE_Z_TOL: f64 = 0.001;

/// Contour length over the selected faces, for profiling operations.
///
/// Policy: a cylindrical face contributes its circumference 2πR; a planar
/// face contributes its longest horizontal edge (endpoints at the same Z
/// within 0.001 mm), falling back to the longest bounding-box extent when
/// no edge qualifies. A single 4 mm lead-in/lead-out allowance is added to
/// any non-zero total.
pub fn contour_length(solid: &Solid, face_indices: &[usize]) -> f64 {
    let mut total = 0.0;

    for &idx in face_indices {
        let face = match solid.faces.get(idx) {
            Some(face) => face,
            None => continue,
        };

        if let Surface::Cylinder { radius, .. } = face.surface {
            total += 2.0 * std::f64::consts::PI * radius;
            continue;
        }

        let longest_horizontal = face
            .edges
            .iter()
            .filter(|e| (e.start.z - e.end.z).abs() < CONTOUR_EDGE_Z_TOL)
            .map(|e| e.length)
            .fold(0.0, f64::max);

        if longest_horizontal > 0.0 {
            total += longest_horizontal;
        } else {
            let bb = &face.bound_box;
            total += bb.x_length().max(bb.y_length()).max(bb.z_length());
        }
    }

    if total > 0.0 {
        total += CONTOUR_LEAD_ALLOWANCE;
    }
    total
}
