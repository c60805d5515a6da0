//! # Query Parameters
//!
//! Scalar inputs of the slicing and sequencing queries. Every tunable has a
//! default taken from [`config::constants`].

use crate::error::{check_positive, check_radius, SliceError, SliceResult};
use config::constants::{KernelConfig, DEFAULT_IMPORT_RADIUS, DEFAULT_LAYER_THICKNESS};

/// Parameters for a single-height slice.
///
/// # Example
///
/// ```rust
/// use slice_kernel::SliceParams;
///
/// let params = SliceParams::new(0.02);
/// assert!(params.assume_manifold);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliceParams {
    /// Radius used by the reconstruction fallback and CSG sampling.
    pub import_radius: f64,
    /// Try the exact edge walk before reconstructing.
    pub assume_manifold: bool,
    /// Reconstruction tunables.
    pub config: KernelConfig,
}

impl Default for SliceParams {
    fn default() -> Self {
        Self::new(DEFAULT_IMPORT_RADIUS)
    }
}

impl SliceParams {
    /// Creates parameters with the given import radius and default tunables.
    pub fn new(import_radius: f64) -> Self {
        Self {
            import_radius,
            assume_manifold: true,
            config: KernelConfig::default(),
        }
    }

    /// Returns a copy with the manifold assumption changed.
    pub fn with_assume_manifold(mut self, assume_manifold: bool) -> Self {
        self.assume_manifold = assume_manifold;
        self
    }

    /// Checks the radius and every tunable.
    pub fn validate(&self) -> SliceResult<()> {
        check_radius(self.import_radius)?;
        self.config
            .validate()
            .map_err(|config::constants::ConfigError::OutOfRange { name, value }| {
                SliceError::InvalidParameter { name, value }
            })
    }
}

/// Parameters for a bottom-to-top layer sequence.
///
/// # Example
///
/// ```rust
/// use slice_kernel::SequenceParams;
///
/// let params = SequenceParams::new(0.4).with_bridge_thickness(0.6);
/// assert_eq!(params.bridge_thickness, Some(0.6));
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SequenceParams {
    /// Distance between consecutive layers.
    pub layer_thickness: f64,
    /// Thickness of the layer after a bridge; `None` disables bridge detection.
    pub bridge_thickness: Option<f64>,
    /// Per-layer slice parameters.
    pub slice: SliceParams,
    /// Slice layers on the rayon pool when bridging is disabled.
    pub parallel: bool,
}

impl Default for SequenceParams {
    fn default() -> Self {
        Self::new(DEFAULT_LAYER_THICKNESS)
    }
}

impl SequenceParams {
    /// Creates parameters with the given layer thickness.
    pub fn new(layer_thickness: f64) -> Self {
        Self {
            layer_thickness,
            bridge_thickness: None,
            slice: SliceParams::default(),
            parallel: false,
        }
    }

    /// Enables bridge detection with the given bridge layer thickness.
    pub fn with_bridge_thickness(mut self, bridge_thickness: f64) -> Self {
        self.bridge_thickness = Some(bridge_thickness);
        self
    }

    /// Replaces the per-layer slice parameters.
    pub fn with_slice(mut self, slice: SliceParams) -> Self {
        self.slice = slice;
        self
    }

    /// Enables or disables parallel slicing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks thicknesses and slice parameters.
    pub fn validate(&self) -> SliceResult<()> {
        check_positive("layer_thickness", self.layer_thickness)?;
        if let Some(bridge_thickness) = self.bridge_thickness {
            check_positive("bridge_thickness", bridge_thickness)?;
        }
        self.slice.validate()
    }
}
