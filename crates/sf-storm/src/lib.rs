//! sf-storm: storm hydrograph series.
//!
//! A `StormSeries` is the validated, immutable inflow record the simulator
//! reads: ordered (time, flow-rate) samples in minutes and m³/s. Parsing of
//! on-disk hydrograph formats lives with the callers; this crate only
//! guarantees the invariants the engine relies on.

pub mod error;
pub mod series;

pub use error::{StormError, StormResult};
pub use series::{StormSample, StormSeries};
