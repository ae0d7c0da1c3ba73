//! # Core Error Types
//!
//! Grid operations are total over finite input. The only failure is a
//! NaN or infinite coordinate, which would otherwise become an unbounded
//! key.

use cubeworld_shared::Vec3;
use thiserror::Error;

/// Errors that can occur in the grid store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A world-space input was NaN or infinite.
    #[error("non-finite {context}: {value}")]
    NonFinite {
        /// What the value was (e.g. "grid coordinate", "delta time").
        context: &'static str,
        /// The offending value.
        value: f32,
    },
}

/// Result type for grid operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Rejects NaN and infinities.
///
/// # Errors
///
/// Returns [`CoreError::NonFinite`] tagged with `context`.
#[inline]
pub fn ensure_finite(context: &'static str, value: f32) -> CoreResult<f32> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CoreError::NonFinite { context, value })
    }
}

/// Rejects a vector with any NaN or infinite component.
///
/// # Errors
///
/// Returns [`CoreError::NonFinite`] carrying the first bad component.
pub fn ensure_finite_vec3(context: &'static str, v: Vec3) -> CoreResult<Vec3> {
    for value in v.to_array() {
        ensure_finite(context, value)?;
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("dt", 0.5), Ok(0.5));
        assert!(matches!(
            ensure_finite("dt", f32::NAN),
            Err(CoreError::NonFinite { context: "dt", .. })
        ));
    }

    #[test]
    fn test_ensure_finite_vec3_reports_bad_component() {
        let err = ensure_finite_vec3("view", Vec3::new(0.0, f32::INFINITY, 1.0)).unwrap_err();
        assert_eq!(
            err,
            CoreError::NonFinite {
                context: "view",
                value: f32::INFINITY
            }
        );
        assert_eq!(err.to_string(), "non-finite view: inf");
    }
}
