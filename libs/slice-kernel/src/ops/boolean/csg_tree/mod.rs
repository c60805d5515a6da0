//! # CSG Tree - Per-Layer Evaluation
//!
//! Represents a solid as a tree of meshes, extruded polygons and boolean
//! combinations. The tree is never evaluated in 3D: every query cuts each
//! leaf at one height and combines the resulting loop sets.
//!
//! ## Example
//!
//! ```rust
//! use slice_kernel::{CsgNode, Diagnostics, Mesh, SliceParams};
//! use glam::DVec3;
//!
//! let outer = Mesh::cuboid(DVec3::splat(-2.0), DVec3::splat(2.0), true).unwrap();
//! let inner = Mesh::cuboid(DVec3::splat(-1.0), DVec3::splat(1.0), true).unwrap();
//! let tree = CsgNode::difference(vec![CsgNode::leaf(outer), CsgNode::leaf(inner)]);
//!
//! let mut diagnostics = Diagnostics::new();
//! let loops = tree.loops_at(0.3, &SliceParams::new(0.05), &mut diagnostics).unwrap();
//! assert_eq!(loops.len(), 2);
//! ```

#[cfg(test)]
mod tests;

use super::{combine_with, CsgOp};
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::SliceResult;
use crate::geometry::{orient_by_nesting, Loop};
use crate::mesh::Mesh;
use crate::ops::slice::slice;
use crate::params::SliceParams;
use crate::source::LoopSource;
use tracing::debug;

/// A node of a CSG tree.
///
/// # Variants
///
/// - `Leaf`: a closed triangle mesh, cut with the plane slicer
/// - `Prism`: polygon loops extruded vertically between two heights
/// - `Combine`: a boolean operation over child nodes
#[derive(Debug, Clone)]
pub enum CsgNode {
    /// A triangle mesh.
    Leaf(Mesh),
    /// Loops extruded from `bottom` to `top`.
    Prism {
        /// Cross section shared by every height of the prism.
        loops: Vec<Loop>,
        /// Lowest z of the extrusion.
        bottom: f64,
        /// Highest z of the extrusion.
        top: f64,
    },
    /// Boolean combination of the children.
    Combine {
        /// Operation applied at each height.
        op: CsgOp,
        /// Operands in order.
        children: Vec<CsgNode>,
    },
}

impl CsgNode {
    /// Creates a mesh leaf.
    pub fn leaf(mesh: Mesh) -> Self {
        CsgNode::Leaf(mesh)
    }

    /// Creates a prism, swapping the heights if they are given upside down.
    pub fn prism(loops: Vec<Loop>, bottom: f64, top: f64) -> Self {
        CsgNode::Prism {
            loops,
            bottom: bottom.min(top),
            top: bottom.max(top),
        }
    }

    /// Creates a combination node.
    pub fn combine(op: CsgOp, children: Vec<CsgNode>) -> Self {
        CsgNode::Combine { op, children }
    }

    /// Union of the children.
    pub fn union(children: Vec<CsgNode>) -> Self {
        Self::combine(CsgOp::Union, children)
    }

    /// Intersection of the children.
    pub fn intersection(children: Vec<CsgNode>) -> Self {
        Self::combine(CsgOp::Intersection, children)
    }

    /// First child minus all the others.
    pub fn difference(children: Vec<CsgNode>) -> Self {
        Self::combine(CsgOp::FirstMinusRest, children)
    }

    /// Total number of vertices across all leaves.
    ///
    /// A prism counts every loop point twice, once per cap.
    pub fn vertex_count(&self) -> usize {
        match self {
            CsgNode::Leaf(mesh) => mesh.vertex_count(),
            CsgNode::Prism { loops, .. } => 2 * loops.iter().map(Vec::len).sum::<usize>(),
            CsgNode::Combine { children, .. } => children.iter().map(CsgNode::vertex_count).sum(),
        }
    }

    /// Height range the node can occupy.
    ///
    /// Intersections are bounded by the overlap of their children and
    /// differences by their minuend.
    pub fn z_bounds(&self) -> Option<(f64, f64)> {
        match self {
            CsgNode::Leaf(mesh) => mesh.z_bounds(),
            CsgNode::Prism { loops, bottom, top } => {
                (!loops.is_empty()).then_some((*bottom, *top))
            }
            CsgNode::Combine { op, children } => {
                let mut bounds = children.iter().map(CsgNode::z_bounds);
                match op {
                    CsgOp::Union => bounds.flatten().reduce(|(lo_a, hi_a), (lo_b, hi_b)| {
                        (lo_a.min(lo_b), hi_a.max(hi_b))
                    }),
                    CsgOp::Intersection => {
                        let (mut lo, mut hi) = bounds.next()??;
                        for child in bounds {
                            let (child_lo, child_hi) = child?;
                            lo = lo.max(child_lo);
                            hi = hi.min(child_hi);
                        }
                        (lo <= hi).then_some((lo, hi))
                    }
                    CsgOp::FirstMinusRest => bounds.next().flatten(),
                    CsgOp::LastMinusRest => bounds.last().flatten(),
                }
            }
        }
    }

    /// Cuts the tree at height `z`.
    ///
    /// A combination without children records an
    /// [`AmbiguousCsgOperand`](DiagnosticKind::AmbiguousCsgOperand) and acts as
    /// an empty operand.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError`](crate::SliceError) when `params` are invalid.
    pub fn loops_at(
        &self,
        z: f64,
        params: &SliceParams,
        diagnostics: &mut Diagnostics,
    ) -> SliceResult<Vec<Loop>> {
        match self {
            CsgNode::Leaf(mesh) => slice(mesh, z, params, diagnostics),
            CsgNode::Prism { loops, bottom, top } => {
                params.validate()?;
                if *bottom <= z && z <= *top {
                    Ok(orient_by_nesting(loops.clone()))
                } else {
                    Ok(Vec::new())
                }
            }
            CsgNode::Combine { op, children } => {
                if children.is_empty() {
                    diagnostics.report(
                        DiagnosticKind::AmbiguousCsgOperand,
                        Some(z),
                        format!("{} without children", op.name()),
                    );
                    return Ok(Vec::new());
                }
                let operands = children
                    .iter()
                    .map(|child| child.loops_at(z, params, diagnostics))
                    .collect::<SliceResult<Vec<_>>>()?;
                debug!(z, op = op.name(), children = operands.len(), "evaluating csg node");
                combine_with(*op, &operands, params.import_radius, &params.config)
            }
        }
    }

    /// Heights of every vertex of every leaf.
    pub fn vertex_heights(&self) -> Vec<f64> {
        let mut heights = Vec::with_capacity(self.vertex_count());
        self.collect_heights(&mut heights);
        heights
    }

    fn collect_heights(&self, heights: &mut Vec<f64>) {
        match self {
            CsgNode::Leaf(mesh) => heights.extend(mesh.vertices().iter().map(|v| v.z)),
            CsgNode::Prism { loops, bottom, top } => {
                for points in loops {
                    heights.extend(points.iter().flat_map(|_| [*bottom, *top]));
                }
            }
            CsgNode::Combine { children, .. } => {
                for child in children {
                    child.collect_heights(heights);
                }
            }
        }
    }
}

impl LoopSource for CsgNode {
    fn z_bounds(&self) -> Option<(f64, f64)> {
        CsgNode::z_bounds(self)
    }

    fn vertex_heights(&self) -> Vec<f64> {
        CsgNode::vertex_heights(self)
    }

    fn loops_at(
        &self,
        z: f64,
        params: &SliceParams,
        diagnostics: &mut Diagnostics,
    ) -> SliceResult<Vec<Loop>> {
        CsgNode::loops_at(self, z, params, diagnostics)
    }
}
