//! Material masses and machining cost.
//!
//! Converts part/stock volumes into masses from a small density table and
//! prices total machining time at an hourly rate.

use serde::{Deserialize, Serialize};

/// Common workshop materials with densities in kg/dm³.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Material {
    Steel,
    Aluminium,
    Stainless,
    CastIron,
    Brass,
}

impl Material {
    pub const ALL: [Material; 5] = [
        Material::Steel,
        Material::Aluminium,
        Material::Stainless,
        Material::CastIron,
        Material::Brass,
    ];

    pub fn density_kg_dm3(&self) -> f64 {
        match self {
            Material::Steel => 7.85,
            Material::Aluminium => 2.70,
            Material::Stainless => 8.00,
            Material::CastIron => 7.00,
            Material::Brass => 8.40,
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Steel => write!(f, "steel"),
            Material::Aluminium => write!(f, "aluminium"),
            Material::Stainless => write!(f, "stainless"),
            Material::CastIron => write!(f, "cast_iron"),
            Material::Brass => write!(f, "brass"),
        }
    }
}

/// Mass in kg from a volume in mm³ and a density in kg/dm³.
/// 1 dm³ = 1e6 mm³.
pub fn mass_kg(volume_mm3: f64, density_kg_dm3: f64) -> f64 {
    volume_mm3 * 1e-6 * density_kg_dm3
}

/// Part/stock/removal masses for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassBreakdown {
    pub part_kg: f64,
    /// Only present when a stock volume was supplied.
    pub stock_kg: Option<f64>,
    /// Stock minus part; only present with a stock volume.
    pub removal_kg: Option<f64>,
}

pub fn mass_breakdown(
    part_volume_mm3: f64,
    stock_volume_mm3: Option<f64>,
    material: Material,
) -> MassBreakdown {
    let density = material.density_kg_dm3();
    let part_kg = mass_kg(part_volume_mm3, density);
    let stock_kg = stock_volume_mm3.map(|v| mass_kg(v, density));
    MassBreakdown {
        part_kg,
        stock_kg,
        removal_kg: stock_kg.map(|s| s - part_kg),
    }
}

/// Machining cost at an hourly shop rate.
pub fn machining_cost(total_hours: f64, hourly_rate: f64) -> f64 {
    hourly_rate * total_hours
}
