//! # Configuration Constants
//!
//! Centralized constants for the layer slicing kernel. Reconstruction
//! tolerances, offset heuristics and sequencing parameters are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Reconstruction**: Circle-intersection engine tuning
//! - **Offset**: Inset/outset heuristics
//! - **Sequencing**: Layer stepping and bridge detection
//!
//! Most reconstruction values come from empirical tuning. They are kept as
//! named constants and collected into [`KernelConfig`] so callers can
//! override any of them per call.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Distance, in unit-circle space, below which two sample points are merged
/// before the circle graph is built (one thousandth of the radius).
///
/// Coincident circles have no defined intersection, so one of them must go.
///
/// # Example
///
/// ```rust
/// use config::constants::{MERGE_EPSILON, EPSILON};
/// assert!(MERGE_EPSILON > EPSILON);
/// ```
pub const MERGE_EPSILON: f64 = 1e-3;

// =============================================================================
// RECONSTRUCTION CONSTANTS
// =============================================================================

/// Fraction of the circle diameter allowed between two consecutive samples.
///
/// A segment of length `l` receives `floor(l / (2 * DENSIFY_THRESHOLD * r))`
/// extra samples. Higher values are faster but leave bigger dangling loops.
///
/// # Example
///
/// ```rust
/// use config::constants::DENSIFY_THRESHOLD;
///
/// let radius = 1.0;
/// let extra = (10.0 / (2.0 * DENSIFY_THRESHOLD * radius)).floor() as usize;
/// assert_eq!(extra, 5);
/// ```
pub const DENSIFY_THRESHOLD: f64 = 0.9;

/// Maximum share of a loop's points that may already belong to accepted loops
/// before the loop is discarded as a duplicate envelope.
///
/// # Example
///
/// ```rust
/// use config::constants::OVERLAP_RATIO;
/// let shared = 1.0;
/// let total = 20.0;
/// assert!(shared / total < OVERLAP_RATIO);
/// ```
pub const OVERLAP_RATIO: f64 = 0.1;

/// Multiple of the import radius within which an uncaptured corner may be
/// inserted back into a reconstructed loop.
///
/// # Example
///
/// ```rust
/// use config::constants::CORNER_INSERT_RATIO;
/// let close = CORNER_INSERT_RATIO * 0.5;
/// assert!(close < 0.5);
/// ```
pub const CORNER_INSERT_RATIO: f64 = 0.85;

/// Multiple of the import radius by which CSG boundary samples are pushed to
/// either side of an edge before membership classification.
///
/// # Example
///
/// ```rust
/// use config::constants::BOUNDARY_SAMPLE_RATIO;
/// assert!(BOUNDARY_SAMPLE_RATIO * 0.2 < 0.01);
/// ```
pub const BOUNDARY_SAMPLE_RATIO: f64 = 0.01;

/// Minimum maximum-span of a kept loop, as a multiple of the radius.
///
/// Anything smaller is the envelope of a single cluster of circles rather
/// than a real boundary.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_SPAN_RATIO;
/// assert!(MIN_SPAN_RATIO > 2.0);
/// ```
pub const MIN_SPAN_RATIO: f64 = 2.01;

/// Circle radius multiplier used when offsetting.
///
/// The circles must overlap a little more than the offset itself; 1.02 is too
/// small and 1.05 is the safe ceiling.
///
/// # Example
///
/// ```rust
/// use config::constants::INTERCIRCLE_MULTIPLIER;
/// assert!(INTERCIRCLE_MULTIPLIER > 1.02 && INTERCIRCLE_MULTIPLIER < 1.05);
/// ```
pub const INTERCIRCLE_MULTIPLIER: f64 = 1.04;

/// Densification radius multiplier used when offsetting.
///
/// # Example
///
/// ```rust
/// use config::constants::{OFFSET_DENSIFY_MULTIPLIER, INTERCIRCLE_MULTIPLIER};
/// assert!(OFFSET_DENSIFY_MULTIPLIER < INTERCIRCLE_MULTIPLIER);
/// ```
pub const OFFSET_DENSIFY_MULTIPLIER: f64 = 1.01;

/// Radius multipliers tried in order when an offset produces no loop.
///
/// # Example
///
/// ```rust
/// use config::constants::RADIUS_RETRY_LADDER;
/// assert_eq!(RADIUS_RETRY_LADDER[0], 1.0);
/// ```
pub const RADIUS_RETRY_LADDER: [f64; 4] = [1.0, 0.55, 0.35, 0.2];

/// Channel width, as a multiple of the radius, inside which a vertex counts as
/// collinear with its neighbours during loop simplification.
///
/// # Example
///
/// ```rust
/// use config::constants::SIMPLIFY_CHANNEL_RATIO;
/// let channel = SIMPLIFY_CHANNEL_RATIO * 0.4;
/// assert!(channel < 0.01);
/// ```
pub const SIMPLIFY_CHANNEL_RATIO: f64 = 0.01;

/// Dot product of the two unit directions away from a point below which the
/// three points count as inline.
///
/// # Example
///
/// ```rust
/// use config::constants::INLINE_DOT_LIMIT;
/// assert!(-1.0 < INLINE_DOT_LIMIT);
/// ```
pub const INLINE_DOT_LIMIT: f64 = -0.999;

/// Lower clamp on the corner dot product when offsetting a vertex, which
/// bounds the miter length of sharp corners.
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_INSET_DOT;
/// let miter = 1.0 / MIN_INSET_DOT;
/// assert_eq!(miter, 2.5);
/// ```
pub const MIN_INSET_DOT: f64 = 0.4;

// =============================================================================
// SEQUENCING CONSTANTS
// =============================================================================

/// Divisor of the zone interval. The zone interval is
/// `layer_thickness / sqrt(vertex_count) / ZONE_INTERVAL_DIVISOR`.
///
/// # Example
///
/// ```rust
/// use config::constants::ZONE_INTERVAL_DIVISOR;
/// let interval = 0.4 / (100.0_f64).sqrt() / ZONE_INTERVAL_DIVISOR;
/// assert!(interval < 1e-4);
/// ```
pub const ZONE_INTERVAL_DIVISOR: f64 = 1000.0;

/// Fraction of the overhang radius the accumulated overhang must reach before
/// a layer counts as a bridge.
///
/// # Example
///
/// ```rust
/// use config::constants::BRIDGE_SPAN_RATIO;
/// assert!(BRIDGE_SPAN_RATIO < 1.0);
/// ```
pub const BRIDGE_SPAN_RATIO: f64 = 0.75;

/// Default import radius (geometric tolerance for reconstruction).
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_IMPORT_RADIUS, DEFAULT_LAYER_THICKNESS};
/// assert!(DEFAULT_IMPORT_RADIUS < DEFAULT_LAYER_THICKNESS);
/// ```
pub const DEFAULT_IMPORT_RADIUS: f64 = 0.05;

/// Default layer thickness.
pub const DEFAULT_LAYER_THICKNESS: f64 = 0.4;

// =============================================================================
// KERNEL CONFIGURATION
// =============================================================================

/// Immutable snapshot of the reconstruction tunables.
///
/// Every field defaults to the matching constant in this module.
///
/// # Examples
/// ```
/// use config::constants::{KernelConfig, OVERLAP_RATIO};
/// let config = KernelConfig::default();
/// assert_eq!(config.overlap_ratio, OVERLAP_RATIO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelConfig {
    /// See [`DENSIFY_THRESHOLD`].
    pub densify_threshold: f64,
    /// See [`OVERLAP_RATIO`].
    pub overlap_ratio: f64,
    /// See [`CORNER_INSERT_RATIO`].
    pub corner_insert_ratio: f64,
    /// See [`BOUNDARY_SAMPLE_RATIO`].
    pub boundary_sample_ratio: f64,
    /// See [`MIN_SPAN_RATIO`].
    pub min_span_ratio: f64,
    /// See [`INTERCIRCLE_MULTIPLIER`].
    pub intercircle_multiplier: f64,
    /// See [`OFFSET_DENSIFY_MULTIPLIER`].
    pub offset_densify_multiplier: f64,
    /// See [`RADIUS_RETRY_LADDER`].
    pub radius_retry_ladder: [f64; 4],
    /// See [`SIMPLIFY_CHANNEL_RATIO`].
    pub simplify_channel_ratio: f64,
}

impl KernelConfig {
    /// Builds a configuration with a custom densify threshold and overlap
    /// ratio, validating both.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let cfg = KernelConfig::new(0.8, 0.2).expect("valid config");
    /// assert_eq!(cfg.densify_threshold, 0.8);
    /// ```
    pub fn new(densify_threshold: f64, overlap_ratio: f64) -> Result<Self, ConfigError> {
        let config = Self {
            densify_threshold,
            overlap_ratio,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks every field is inside its meaningful range.
    ///
    /// # Examples
    /// ```
    /// use config::constants::KernelConfig;
    /// let mut cfg = KernelConfig::default();
    /// cfg.densify_threshold = 1.5;
    /// assert!(cfg.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.densify_threshold > 0.0 && self.densify_threshold < 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "densify_threshold",
                value: self.densify_threshold,
            });
        }
        if !(self.overlap_ratio > 0.0 && self.overlap_ratio <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "overlap_ratio",
                value: self.overlap_ratio,
            });
        }
        if self.intercircle_multiplier < 1.0 {
            return Err(ConfigError::OutOfRange {
                name: "intercircle_multiplier",
                value: self.intercircle_multiplier,
            });
        }
        for multiplier in self.radius_retry_ladder {
            if multiplier <= 0.0 {
                return Err(ConfigError::OutOfRange {
                    name: "radius_retry_ladder",
                    value: multiplier,
                });
            }
        }
        Ok(())
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            densify_threshold: DENSIFY_THRESHOLD,
            overlap_ratio: OVERLAP_RATIO,
            corner_insert_ratio: CORNER_INSERT_RATIO,
            boundary_sample_ratio: BOUNDARY_SAMPLE_RATIO,
            min_span_ratio: MIN_SPAN_RATIO,
            intercircle_multiplier: INTERCIRCLE_MULTIPLIER,
            offset_densify_multiplier: OFFSET_DENSIFY_MULTIPLIER,
            radius_retry_ladder: RADIUS_RETRY_LADDER,
            simplify_channel_ratio: SIMPLIFY_CHANNEL_RATIO,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when a tunable falls outside its meaningful range.
    OutOfRange {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange { name, value } => {
                write!(f, "{name} out of range: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
