//! Infiltration-capacity function.
//!
//! Instantaneous maximum outflow rate the soil can accept at a given water
//! depth. Darcy's law over the wetted area with a lumped moderation factor;
//! the wetted-area form has no singularity at zero depth, unlike the
//! radial-flow formulation, and is the canonical one here.

use crate::geometry::wetted_infiltration_area;
use crate::spec::{PipeSpec, StructureSpec};
use sf_core::constants::G0_MPS2;
use sf_core::units::{Length, VolumeRate, m3ps};

/// Maximum rate (m³/s) the native soil can currently accept, per unit.
///
/// `Q_cap = k / Sr · wetted_infiltration_area(depth)`. At depth 0 only the
/// base/bottom term contributes.
pub fn infiltration_capacity(spec: &StructureSpec, depth: Length) -> VolumeRate {
    let area = wetted_infiltration_area(spec, depth);
    m3ps(spec.soil_conductivity_m_per_s / spec.soil_moderation_factor * area.value)
}

/// Full-pipe conveyance capacity (m³/s) from Manning's equation:
/// `Q = (1/n)·A·R^(2/3)·S^(1/2)` with `R = D/4` for a full circular pipe.
///
/// Constant for the pipe's geometry; reported for diagnostics, never
/// subtracted from storage headroom.
pub fn pipe_conveyance_capacity(pipe: &PipeSpec) -> VolumeRate {
    let area = std::f64::consts::PI * pipe.pipe_diameter_m.powi(2) / 4.0;
    let hydraulic_radius = pipe.pipe_diameter_m / 4.0;
    m3ps(
        (1.0 / pipe.mannings_n)
            * area
            * hydraulic_radius.powf(2.0 / 3.0)
            * pipe.pipe_slope.sqrt(),
    )
}

/// Sharp-edged orifice intake through the pipe perforations (m³/s) at the
/// given driving head, over the full drain length. Diagnostic only.
pub fn perforation_intake_capacity(pipe: &PipeSpec, length_m: f64, head_m: f64) -> VolumeRate {
    const CD: f64 = 0.6;
    if head_m <= 0.0 {
        return m3ps(0.0);
    }
    let perforation_area =
        std::f64::consts::PI * pipe.pipe_diameter_m * pipe.perforation_ratio * length_m;
    m3ps(CD * perforation_area * (2.0 * G0_MPS2 * head_m).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::units::m;

    fn pipe() -> PipeSpec {
        PipeSpec {
            pipe_diameter_m: 0.3,
            pipe_slope: 0.005,
            mannings_n: 0.012,
            perforation_ratio: 0.1,
        }
    }

    #[test]
    fn capacity_at_zero_depth_is_base_term() {
        let spec = StructureSpec::soakwell(2.0, 2.0, 1e-5, 1.0);
        let q = infiltration_capacity(&spec, m(0.0)).value;
        // k * pi * r^2
        assert!((q - 1e-5 * std::f64::consts::PI).abs() < 1e-12);
        assert!(q > 0.0);
    }

    #[test]
    fn moderation_factor_derates_capacity() {
        let base = StructureSpec::soakwell(2.0, 2.0, 1e-5, 1.0);
        let derated = StructureSpec::soakwell(2.0, 2.0, 1e-5, 2.0);
        let q1 = infiltration_capacity(&base, m(1.0)).value;
        let q2 = infiltration_capacity(&derated, m(1.0)).value;
        assert!((q1 / q2 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn manning_reference_value() {
        // 300mm concrete pipe at 0.5% grade: ~0.074 m3/s full-pipe capacity
        let q = pipe_conveyance_capacity(&pipe()).value;
        assert!((q - 0.074).abs() < 0.002, "got {q}");
    }

    #[test]
    fn perforation_intake_zero_at_zero_head() {
        assert_eq!(perforation_intake_capacity(&pipe(), 100.0, 0.0).value, 0.0);
        assert!(perforation_intake_capacity(&pipe(), 100.0, 0.9).value > 0.0);
    }
}
