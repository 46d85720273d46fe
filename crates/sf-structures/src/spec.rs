//! Structure specification types.

use crate::error::{StructureError, StructureResult};
use serde::{Deserialize, Serialize};

/// Perforated conveyance pipe inside a French-drain trench.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PipeSpec {
    /// Pipe inner diameter (m)
    pub pipe_diameter_m: f64,
    /// Longitudinal gradient (m/m)
    pub pipe_slope: f64,
    /// Manning roughness coefficient
    pub mannings_n: f64,
    /// Fraction of pipe wall area that is perforated, in (0, 1]
    pub perforation_ratio: f64,
}

/// Structure geometry variant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum GeometryKind {
    /// Precast cylindrical soakwell.
    Cylinder { diameter_m: f64, depth_m: f64 },
    /// Gravel-filled linear trench; only the pore volume stores water.
    LinearTrench {
        trench_width_m: f64,
        trench_depth_m: f64,
        length_m: f64,
        /// Aggregate porosity, in (0, 1]
        porosity: f64,
        pipe: PipeSpec,
    },
}

/// Geometry plus soil parameters for one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StructureSpec {
    pub geometry: GeometryKind,
    /// Saturated hydraulic conductivity of the native soil (m/s)
    pub soil_conductivity_m_per_s: f64,
    /// Clogging/biofouling derating factor, >= 1
    pub soil_moderation_factor: f64,
    /// Parallel identical structures sharing the inflow evenly
    #[serde(default = "default_num_units")]
    pub num_units: u32,
}

fn default_num_units() -> u32 {
    1
}

impl StructureSpec {
    pub fn soakwell(diameter_m: f64, depth_m: f64, k_m_per_s: f64, sr: f64) -> Self {
        Self {
            geometry: GeometryKind::Cylinder {
                diameter_m,
                depth_m,
            },
            soil_conductivity_m_per_s: k_m_per_s,
            soil_moderation_factor: sr,
            num_units: 1,
        }
    }

    pub fn with_units(mut self, num_units: u32) -> Self {
        self.num_units = num_units;
        self
    }

    /// Maximum water depth the structure can hold (m).
    pub fn max_depth_m(&self) -> f64 {
        match &self.geometry {
            GeometryKind::Cylinder { depth_m, .. } => *depth_m,
            GeometryKind::LinearTrench { trench_depth_m, .. } => *trench_depth_m,
        }
    }

    /// Check the invariants the physics relies on. Fails fast; the
    /// simulator refuses to step an invalid spec.
    pub fn validate(&self) -> StructureResult<()> {
        match &self.geometry {
            GeometryKind::Cylinder {
                diameter_m,
                depth_m,
            } => {
                require_positive("diameter_m", *diameter_m)?;
                require_positive("depth_m", *depth_m)?;
            }
            GeometryKind::LinearTrench {
                trench_width_m,
                trench_depth_m,
                length_m,
                porosity,
                pipe,
            } => {
                require_positive("trench_width_m", *trench_width_m)?;
                require_positive("trench_depth_m", *trench_depth_m)?;
                require_positive("length_m", *length_m)?;
                require_unit_fraction("porosity", *porosity)?;
                require_positive("pipe_diameter_m", pipe.pipe_diameter_m)?;
                require_positive("pipe_slope", pipe.pipe_slope)?;
                require_positive("mannings_n", pipe.mannings_n)?;
                require_unit_fraction("perforation_ratio", pipe.perforation_ratio)?;
            }
        }
        require_positive("soil_conductivity_m_per_s", self.soil_conductivity_m_per_s)?;
        if !(self.soil_moderation_factor >= 1.0) {
            return Err(StructureError::OutOfRange {
                field: "soil_moderation_factor",
                value: self.soil_moderation_factor,
                expected: "[1, inf)",
            });
        }
        if self.num_units < 1 {
            return Err(StructureError::ZeroUnits);
        }
        Ok(())
    }
}

fn require_positive(field: &'static str, value: f64) -> StructureResult<()> {
    // The negated comparison also rejects NaN
    if !(value > 0.0) || !value.is_finite() {
        return Err(StructureError::NonPositive { field, value });
    }
    Ok(())
}

fn require_unit_fraction(field: &'static str, value: f64) -> StructureResult<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(StructureError::OutOfRange {
            field,
            value,
            expected: "(0, 1]",
        });
    }
    Ok(())
}
