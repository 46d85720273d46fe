//! Water-balance simulation for infiltration structures.
//!
//! Provides:
//! - explicit time stepping over a recorded storm hydrograph
//! - capacity-limited outflow with overflow accounting at the clamp boundary
//! - post-storm emptying extension up to a configurable horizon
//! - mass-balance self-check surfaced as a result field
//!
//! The engine is a pure function of (StormSeries, StructureSpec, SimOptions);
//! it keeps no memory of past calls.

pub mod error;
pub mod result;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use result::{
    Emptying, MassBalance, PipeDiagnostics, RunSummary, SimulationResult, StepRecord,
};
pub use sim::{SimOptions, run_simulation};
