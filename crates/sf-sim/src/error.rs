//! Error types for simulation runs.

use sf_storm::StormError;
use sf_structures::StructureError;
use thiserror::Error;

/// Errors encountered before or during a water-balance run.
///
/// Configuration and input errors surface before any stepping occurs and
/// produce no partial result. `NonFinite` mid-run signals a defect in the
/// capacity function or step logic; it aborts the affected run only.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid structure configuration: {0}")]
    Config(#[from] StructureError),

    #[error("Invalid storm input: {0}")]
    Input(#[from] StormError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite {what} at t = {time_min} min")]
    NonFinite { what: &'static str, time_min: f64 },
}

pub type SimResult<T> = Result<T, SimError>;
