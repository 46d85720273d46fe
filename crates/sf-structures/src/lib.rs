//! sf-structures: infiltration structure models.
//!
//! Provides the two structure families the simulator serves:
//! - precast cylindrical soakwells
//! - linear gravel-trench French drains with a perforated conveyance pipe
//!
//! The physics differs only in the geometry and capacity formulas, so both
//! are a single tagged variant (`GeometryKind`) consumed by one geometry
//! model and one infiltration-capacity function. All functions here are
//! pure, total, and single-unit; parallel-unit scaling happens at the
//! simulator boundary.

pub mod error;
pub mod geometry;
pub mod infiltration;
pub mod spec;

// Re-exports
pub use error::{StructureError, StructureResult};
pub use spec::{GeometryKind, PipeSpec, StructureSpec};
