use crate::CoreError;

/// Floating point type used throughout the system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Percentage of `part` relative to `whole`; zero when the reference is zero.
pub fn relative_percent(part: Real, whole: Real) -> Real {
    if whole.abs() > 0.0 {
        100.0 * part / whole
    } else {
        0.0
    }
}
