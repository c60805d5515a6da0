//! # Layer Sequencer
//!
//! Cuts a solid into an ordered stack of loop layers from bottom to top.
//!
//! ## Algorithm
//!
//! 1. Bucket every vertex height in a [`ZoneTable`]
//! 2. Step from `bottom + thickness / 2` to `top - thickness / 2`, nudging
//!    each height off occupied buckets
//! 3. With bridging enabled, compare every layer against the one below;
//!    a bridge layer gets a direction and the next step uses the bridge
//!    thickness
//! 4. Trim empty layers from both ends of the stack
//!
//! Without bridging, layers are independent and may be sliced on the rayon
//! pool. The parallel and sequential paths produce identical stacks.

mod bridge;
mod zones;


pub use bridge::bridge_direction;
pub use zones::ZoneTable;

use crate::diagnostics::Diagnostics;
use crate::error::SliceResult;
use crate::geometry::{loops_to_tuples, Loop, Point2};
use crate::params::SequenceParams;
use crate::source::LoopSource;
use config::constants::EPSILON;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// One horizontal layer of the stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoopLayer {
    /// Height of the cutting plane.
    pub z: f64,
    /// Oriented loops, outer boundaries counter-clockwise.
    pub loops: Vec<Loop>,
    /// Unit direction of the bridge spanning this layer, if it is one.
    pub bridge_direction: Option<Point2>,
}

impl LoopLayer {
    /// Creates a layer without a bridge.
    pub fn new(z: f64, loops: Vec<Loop>) -> Self {
        Self {
            z,
            loops,
            bridge_direction: None,
        }
    }

    /// Returns true if the layer holds no loop.
    pub fn is_empty(&self) -> bool {
        self.loops.is_empty()
    }

    /// Plain tuple form for external encoders.
    pub fn to_tuples(&self) -> (f64, Vec<Vec<(f64, f64)>>, Option<(f64, f64)>) {
        (
            self.z,
            loops_to_tuples(&self.loops),
            self.bridge_direction.map(|d| (d.x, d.y)),
        )
    }
}

/// Slices a solid into layers ordered by increasing z.
///
/// Degeneracies of individual layers are recorded in `diagnostics` in layer
/// order and never abort the stack.
///
/// # Errors
///
/// Returns [`SliceError`](crate::SliceError) when `params` are invalid.
///
/// # Example
///
/// ```rust
/// use slice_kernel::{sequence, Diagnostics, Mesh, SequenceParams};
/// use glam::DVec3;
///
/// let cube = Mesh::cuboid(DVec3::splat(-1.0), DVec3::splat(1.0), true).unwrap();
/// let mut diagnostics = Diagnostics::new();
/// let layers = sequence(&cube, &SequenceParams::new(0.4), &mut diagnostics).unwrap();
/// assert_eq!(layers.len(), 5);
/// assert!(layers.windows(2).all(|pair| pair[0].z < pair[1].z));
/// ```
pub fn sequence<S: LoopSource + ?Sized>(
    source: &S,
    params: &SequenceParams,
    diagnostics: &mut Diagnostics,
) -> SliceResult<Vec<LoopLayer>> {
    params.validate()?;
    let Some((bottom, top)) = source.z_bounds() else {
        return Ok(Vec::new());
    };
    let thickness = params.layer_thickness;
    let zones = ZoneTable::from_vertices(&source.vertex_heights(), thickness);
    let half = 0.5 * thickness;
    let first = bottom + half;
    let last = top - half + EPSILON;
    info!(
        bottom,
        top,
        thickness,
        bridging = params.bridge_thickness.is_some(),
        parallel = params.parallel,
        "sequencing layers"
    );

    let mut layers = match params.bridge_thickness {
        Some(bridge_thickness) => {
            bridged_layers(source, params, &zones, first, last, bridge_thickness, diagnostics)?
        }
        None => {
            let mut heights = Vec::new();
            let mut z = first;
            while z <= last {
                heights.push(zones.empty_z(z));
                z += thickness;
            }
            independent_layers(source, params, &heights, diagnostics)?
        }
    };

    let end = layers
        .iter()
        .rposition(|layer| !layer.is_empty())
        .map_or(0, |index| index + 1);
    layers.truncate(end);
    let start = layers
        .iter()
        .position(|layer| !layer.is_empty())
        .unwrap_or(layers.len());
    layers.drain(..start);

    info!(
        layers = layers.len(),
        diagnostics = diagnostics.len(),
        "sequenced layers"
    );
    Ok(layers)
}

/// Layers that do not depend on each other.
fn independent_layers<S: LoopSource + ?Sized>(
    source: &S,
    params: &SequenceParams,
    heights: &[f64],
    diagnostics: &mut Diagnostics,
) -> SliceResult<Vec<LoopLayer>> {
    let cut = |z: f64| {
        let mut local = Diagnostics::new();
        source
            .loops_at(z, &params.slice, &mut local)
            .map(|loops| (LoopLayer::new(z, loops), local))
    };
    let results: Vec<SliceResult<(LoopLayer, Diagnostics)>> = if params.parallel {
        heights.par_iter().map(|&z| cut(z)).collect()
    } else {
        heights.iter().map(|&z| cut(z)).collect()
    };

    let mut layers = Vec::with_capacity(results.len());
    for result in results {
        let (layer, local) = result?;
        diagnostics.extend(local);
        layers.push(layer);
    }
    Ok(layers)
}

/// Layers evaluated in order, each compared against the one below.
fn bridged_layers<S: LoopSource + ?Sized>(
    source: &S,
    params: &SequenceParams,
    zones: &ZoneTable,
    first: f64,
    last: f64,
    bridge_thickness: f64,
    diagnostics: &mut Diagnostics,
) -> SliceResult<Vec<LoopLayer>> {
    let mut layers: Vec<LoopLayer> = Vec::new();
    let mut z = first;
    while z <= last {
        let height = zones.empty_z(z);
        let loops = source.loops_at(height, &params.slice, diagnostics)?;
        let below = layers.last().map_or(&[][..], |layer| &layer.loops[..]);
        let direction = if loops.is_empty() {
            None
        } else {
            bridge_direction(
                below,
                &loops,
                params.layer_thickness,
                &params.slice.config,
            )?
        };
        if let Some(direction) = direction {
            debug!(z = height, x = direction.x, y = direction.y, "bridge layer");
        }
        layers.push(LoopLayer {
            z: height,
            loops,
            bridge_direction: direction,
        });
        z += if direction.is_some() {
            bridge_thickness
        } else {
            params.layer_thickness
        };
    }
    Ok(layers)
}
