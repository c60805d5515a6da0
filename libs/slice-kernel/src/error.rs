//! # Slice Errors
//!
//! Fail-fast error types for the slicing kernel.
//!
//! ## Error Policy
//!
//! - Precondition violations (caller errors) are returned as [`SliceError`]
//! - Geometric degeneracies are recovered locally and reported as
//!   [`Diagnostic`](crate::diagnostics::Diagnostic) values instead
//! - A single layer's degeneracy never aborts a multi-layer run

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during slicing operations.
///
/// ## Example
///
/// ```rust
/// use slice_kernel::{reconstruct, SliceError};
/// use glam::DVec2;
///
/// let points = [DVec2::ZERO, DVec2::X];
/// match reconstruct(&points, 0.0, true) {
///     Err(SliceError::InvalidRadius { radius }) => assert_eq!(radius, 0.0),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SliceError {
    /// A radius that must be positive was zero, negative or not finite.
    #[error("Invalid radius: {radius} (must be positive)")]
    InvalidRadius {
        /// The rejected radius.
        radius: f64,
    },

    /// A scalar parameter was outside its valid range.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Mesh input could not be turned into a topology.
    #[error("Invalid topology: {message}")]
    InvalidTopology {
        /// What was wrong with the input.
        message: String,
    },
}

impl SliceError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for slicing operations.
pub type SliceResult<T> = Result<T, SliceError>;

/// Rejects radii that are not strictly positive and finite.
pub(crate) fn check_radius(radius: f64) -> SliceResult<()> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        Err(SliceError::InvalidRadius { radius })
    }
}

/// Rejects parameters that are not strictly positive and finite.
pub(crate) fn check_positive(name: &'static str, value: f64) -> SliceResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SliceError::InvalidParameter { name, value })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SliceError::InvalidRadius { radius: -1.0 };
        assert!(err.to_string().contains("-1"));

        let err = SliceError::invalid_topology("face 3 references vertex 9");
        assert!(err.to_string().contains("face 3"));
    }

    #[test]
    fn test_check_radius() {
        assert!(check_radius(0.1).is_ok());
        assert!(check_radius(0.0).is_err());
        assert!(check_radius(-2.0).is_err());
        assert!(check_radius(f64::NAN).is_err());
        assert!(check_radius(f64::INFINITY).is_err());
    }

    #[test]
    fn test_check_positive_reports_name() {
        let err = check_positive("layer_thickness", 0.0).unwrap_err();
        assert_eq!(
            err,
            SliceError::InvalidParameter {
                name: "layer_thickness",
                value: 0.0
            }
        );
    }

    /// Errors are Send + Sync so layers can be sliced on worker threads.
    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SliceError>();
    }
}
