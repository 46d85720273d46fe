//! Error types for structure specifications.

use thiserror::Error;

/// Configuration errors detected before any simulation stepping occurs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StructureError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{field} must be in {expected} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("num_units must be at least 1")]
    ZeroUnits,
}

pub type StructureResult<T> = Result<T, StructureError>;
