//! Error types for storm series construction.

use thiserror::Error;

/// Errors raised when a hydrograph fails entry-point validation.
///
/// The engine never sorts or repairs caller data; a malformed series is
/// rejected here so upstream parsing bugs stay visible.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StormError {
    #[error("Storm series is empty")]
    Empty,

    #[error("Time values must be strictly increasing (sample {index})")]
    TimeNotIncreasing { index: usize },

    #[error("Non-finite {what} at sample {index}")]
    NonFinite { what: &'static str, index: usize },

    #[error("Negative inflow rate at sample {index}")]
    NegativeFlow { index: usize },
}

pub type StormResult<T> = Result<T, StormError>;
