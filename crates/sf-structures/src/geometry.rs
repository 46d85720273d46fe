//! Structure geometry model.
//!
//! Maps a `StructureSpec` and a candidate water depth to the geometric
//! quantities the physics needs. Everything here is per single unit;
//! `num_units` scaling is the simulator's job.

use crate::spec::{GeometryKind, StructureSpec};
use sf_core::units::{Area, Length, Volume, m, m2, m3};

/// Total water volume the structure can store (m³).
///
/// For the trench only the pore volume of the aggregate holds water.
pub fn capacity_volume(spec: &StructureSpec) -> Volume {
    match &spec.geometry {
        GeometryKind::Cylinder {
            diameter_m,
            depth_m,
        } => m3(base_area_m2(*diameter_m) * depth_m),
        GeometryKind::LinearTrench {
            trench_width_m,
            trench_depth_m,
            length_m,
            porosity,
            ..
        } => m3(trench_width_m * trench_depth_m * length_m * porosity),
    }
}

/// Effective storage plan area (m²): the constant area that converts a
/// stored volume to a water depth. For the trench this is the pore plan
/// area (w·L·porosity), so the capacity volume maps exactly to full depth.
pub fn plan_area(spec: &StructureSpec) -> Area {
    match &spec.geometry {
        GeometryKind::Cylinder { diameter_m, .. } => m2(base_area_m2(*diameter_m)),
        GeometryKind::LinearTrench {
            trench_width_m,
            length_m,
            porosity,
            ..
        } => m2(trench_width_m * length_m * porosity),
    }
}

/// Water depth corresponding to a stored volume, clamped to [0, max depth].
pub fn water_depth(spec: &StructureSpec, stored: Volume) -> Length {
    let depth = stored.value / plan_area(spec).value;
    m(depth.clamp(0.0, spec.max_depth_m()))
}

pub fn max_depth(spec: &StructureSpec) -> Length {
    m(spec.max_depth_m())
}

/// Infiltration surface wetted at the given water depth (m²).
///
/// Base/bottom always contributes; side walls contribute up to the current
/// depth, capped at the full-depth value. Non-decreasing in depth.
pub fn wetted_infiltration_area(spec: &StructureSpec, depth: Length) -> Area {
    let d = depth.value.clamp(0.0, spec.max_depth_m());
    match &spec.geometry {
        GeometryKind::Cylinder { diameter_m, .. } => {
            m2(base_area_m2(*diameter_m) + std::f64::consts::PI * diameter_m * d)
        }
        GeometryKind::LinearTrench {
            trench_width_m,
            length_m,
            ..
        } => m2(length_m * (trench_width_m + 2.0 * d)),
    }
}

fn base_area_m2(diameter_m: f64) -> f64 {
    std::f64::consts::PI * (diameter_m / 2.0).powi(2)
}
