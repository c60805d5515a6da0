//! # Cross-Section Booleans
//!
//! Combines the loop sets of several solids at one height.
//!
//! ## Algorithm
//!
//! Every child's boundary is sampled. Each sample looks a short distance
//! (`boundary_sample_ratio · radius`) to one side of its edge and asks
//! whether that side lies in the other operands:
//!
//! - **Union**: a sample survives when its outer side is outside every other
//!   child
//! - **Intersection**: a sample survives when its inner side is inside every
//!   other child
//! - **Difference**: a sample of the first child survives when its inner side
//!   is outside the rest; a sample of the rest survives when its outer side is
//!   inside the first child and outside the other subtrahends
//!
//! Crossings between boundaries of different children are mandatory corners.
//! The surviving samples and the corners are reconstructed into loops.

pub mod csg_tree;

#[cfg(test)]
mod tests;

use crate::error::{check_radius, SliceResult};
use crate::geometry::{
    clockwise_quarter, is_point_in_filled_region, orient_by_nesting, segment_intersection,
    Loop, Point2,
};
use crate::ops::intercircle::{chord_samples, reconstruct_with};
use config::constants::KernelConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Boolean operation applied to the children of a CSG node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CsgOp {
    /// Region covered by any child.
    Union,
    /// Region covered by every child.
    Intersection,
    /// First child minus all the others.
    FirstMinusRest,
    /// Last child minus all the others.
    LastMinusRest,
}

impl CsgOp {
    /// Returns the operation name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            CsgOp::Union => "union",
            CsgOp::Intersection => "intersection",
            CsgOp::FirstMinusRest => "first_minus_rest",
            CsgOp::LastMinusRest => "last_minus_rest",
        }
    }
}

/// Combines child loop sets with default tunables.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
///
/// # Example
///
/// ```rust
/// use slice_kernel::{combine, CsgOp};
/// use slice_kernel::geometry::area;
/// use glam::DVec2;
///
/// let square = |x: f64| vec![
///     DVec2::new(x, 0.0),
///     DVec2::new(x + 1.0, 0.0),
///     DVec2::new(x + 1.0, 1.0),
///     DVec2::new(x, 1.0),
/// ];
/// let union = combine(CsgOp::Union, &[vec![square(0.0)], vec![square(0.5)]], 0.02).unwrap();
/// assert_eq!(union.len(), 1);
/// assert!((area(&union[0]) - 1.5).abs() < 0.02);
/// ```
pub fn combine(op: CsgOp, children: &[Vec<Loop>], import_radius: f64) -> SliceResult<Vec<Loop>> {
    combine_with(op, children, import_radius, &KernelConfig::default())
}

/// Combines child loop sets.
///
/// Empty children degrade to the identity of the operation: they vanish
/// from a union, empty an intersection, empty a difference when they are the
/// minuend, and vanish from the subtrahends otherwise.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
pub fn combine_with(
    op: CsgOp,
    children: &[Vec<Loop>],
    import_radius: f64,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    check_radius(import_radius)?;
    let mut operands: Vec<Vec<Loop>> = children
        .iter()
        .map(|loops| {
            orient_by_nesting(
                loops
                    .iter()
                    .filter(|points| points.len() > 2)
                    .cloned()
                    .collect(),
            )
        })
        .collect();

    let op = match op {
        CsgOp::LastMinusRest => {
            operands.reverse();
            CsgOp::FirstMinusRest
        }
        other => other,
    };

    let operands: Vec<Vec<Loop>> = match op {
        CsgOp::Union => operands.into_iter().filter(|loops| !loops.is_empty()).collect(),
        CsgOp::Intersection => {
            if operands.is_empty() || operands.iter().any(|loops| loops.is_empty()) {
                debug!(op = op.name(), "empty operand");
                return Ok(Vec::new());
            }
            operands
        }
        _ => {
            let mut iter = operands.into_iter();
            match iter.next() {
                Some(first) if !first.is_empty() => std::iter::once(first)
                    .chain(iter.filter(|loops| !loops.is_empty()))
                    .collect(),
                _ => {
                    debug!(op = op.name(), "empty minuend");
                    return Ok(Vec::new());
                }
            }
        }
    };

    match operands.len() {
        0 => {
            debug!(op = op.name(), "no operands");
            Ok(Vec::new())
        }
        1 => Ok(operands.into_iter().next().unwrap_or_default()),
        _ => combine_operands(op, &operands, import_radius, config),
    }
}

// =============================================================================
// MEMBERSHIP
// =============================================================================

/// Which side of a boundary sample must satisfy which test.
fn keeps(op: CsgOp, operands: &[Vec<Loop>], owner: usize, sample: Point2, inward: Point2) -> bool {
    let inside = |index: usize, point: Point2| is_point_in_filled_region(&operands[index], point);
    let others = || (0..operands.len()).filter(move |&index| index != owner);
    match op {
        CsgOp::Union => {
            let outer = sample - inward;
            others().all(|index| !inside(index, outer))
        }
        CsgOp::Intersection => {
            let inner = sample + inward;
            others().all(|index| inside(index, inner))
        }
        CsgOp::FirstMinusRest | CsgOp::LastMinusRest => {
            if owner == 0 {
                let inner = sample + inward;
                others().all(|index| !inside(index, inner))
            } else {
                let outer = sample - inward;
                others().all(|index| (index == 0) == inside(index, outer))
            }
        }
    }
}

/// Whether a crossing of the boundaries of `a` and `b` survives the other
/// operands.
fn keeps_corner(op: CsgOp, operands: &[Vec<Loop>], a: usize, b: usize, corner: Point2) -> bool {
    (0..operands.len())
        .filter(|&index| index != a && index != b)
        .all(|index| {
            let inside = is_point_in_filled_region(&operands[index], corner);
            match op {
                CsgOp::Union => !inside,
                CsgOp::Intersection => inside,
                CsgOp::FirstMinusRest | CsgOp::LastMinusRest => (index == 0) == inside,
            }
        })
}

// =============================================================================
// SAMPLING
// =============================================================================

/// Left-hand unit normal of a direction, the filled side of an oriented loop.
#[inline]
fn left_normal(direction: Point2) -> Point2 {
    -clockwise_quarter(direction.normalize_or_zero())
}

fn combine_operands(
    op: CsgOp,
    operands: &[Vec<Loop>],
    radius: f64,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    let offset = config.boundary_sample_ratio * radius;
    let mut samples = Vec::new();
    for (owner, loops) in operands.iter().enumerate() {
        for points in loops {
            let n = points.len();
            for index in 0..n {
                let previous = points[(index + n - 1) % n];
                let vertex = points[index];
                let next = points[(index + 1) % n];

                let bisector =
                    (left_normal(vertex - previous) + left_normal(next - vertex)).normalize_or_zero();
                if keeps(op, operands, owner, vertex, bisector * offset) {
                    samples.push(vertex);
                }

                let inward = left_normal(next - vertex) * offset;
                samples.extend(
                    chord_samples(vertex, next, radius, config.densify_threshold)
                        .into_iter()
                        .filter(|&sample| keeps(op, operands, owner, sample, inward)),
                );
            }
        }
    }

    let corners = boundary_crossings(op, operands);
    debug!(
        op = op.name(),
        operands = operands.len(),
        samples = samples.len(),
        corners = corners.len(),
        "combining cross sections"
    );
    reconstruct_with(&samples, &corners, radius, false, config)
}

/// Crossings between boundaries of distinct operands, touching endpoints
/// included.
fn boundary_crossings(op: CsgOp, operands: &[Vec<Loop>]) -> Vec<Point2> {
    let mut corners = Vec::new();
    for a in 0..operands.len() {
        for b in (a + 1)..operands.len() {
            for first in &operands[a] {
                for second in &operands[b] {
                    let (n, m) = (first.len(), second.len());
                    for i in 0..n {
                        let (a0, a1) = (first[i], first[(i + 1) % n]);
                        for j in 0..m {
                            let crossing =
                                segment_intersection(a0, a1, second[j], second[(j + 1) % m]);
                            if let Some(corner) = crossing {
                                if keeps_corner(op, operands, a, b, corner)
                                    && !corners.contains(&corner)
                                {
                                    corners.push(corner);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    corners
}
