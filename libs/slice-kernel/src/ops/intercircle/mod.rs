//! # Circle-Intersection Reconstruction
//!
//! Turns an unordered cloud of boundary samples into closed, correctly wound
//! loops.
//!
//! ## Algorithm
//!
//! 1. **Densify**: boundaries are resampled so neighbouring samples are less
//!    than `2 · threshold · radius` apart and their circles overlap
//! 2. **Circle graph**: each sample is the center of a circle of `radius`;
//!    intersections of overlapping circles that no third circle covers lie on
//!    the envelope of the union
//! 3. **Stitch**: the envelope is walked into closed loops of sample points
//! 4. **Classify**: small loops are dropped and duplicate envelopes rejected
//!    by their overlap with points already claimed
//! 5. **Clean**: collinear and duplicate points are removed, lost corners
//!    re-inserted and self-intersections excised

mod bucket;
mod graph;
mod reconstruct;

pub use reconstruct::{reconstruct, reconstruct_with};

use crate::error::{check_positive, check_radius, SliceResult};
use crate::geometry::{Loop, Point2};
use graph::CircleGraph;

// =============================================================================
// DENSIFY
// =============================================================================

/// Appends the evenly spaced interior points of the segment `begin..end`.
fn push_segment_samples(begin: Point2, end: Point2, radius: f64, threshold: f64, out: &mut Loop) {
    let segment = end - begin;
    let extra = (segment.length() / (2.0 * threshold * radius)).floor() as usize;
    let step = segment / (extra + 1) as f64;
    out.extend((1..=extra).map(|i| begin + step * i as f64));
}

/// Resamples a closed loop so consecutive points are closer than
/// `2 · threshold · radius`.
///
/// Original points are kept; `floor(len / (2 · threshold · radius))` evenly
/// spaced points are inserted into every segment.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive and
/// [`SliceError::InvalidParameter`](crate::SliceError::InvalidParameter) for
/// a threshold that is not positive.
///
/// # Example
///
/// ```rust
/// use slice_kernel::ops::intercircle::densify_loop;
/// use glam::DVec2;
///
/// let triangle = [DVec2::ZERO, DVec2::new(1.0, 0.0), DVec2::new(0.0, 1.0)];
/// let dense = densify_loop(&triangle, 0.1, 0.9).unwrap();
/// assert!(dense.len() > 3);
/// assert_eq!(dense[0], DVec2::ZERO);
/// ```
pub fn densify_loop(points: &[Point2], radius: f64, threshold: f64) -> SliceResult<Loop> {
    check_radius(radius)?;
    check_positive("threshold", threshold)?;
    let n = points.len();
    let mut dense = Vec::with_capacity(n);
    for i in 0..n {
        let begin = points[i];
        dense.push(begin);
        if n > 1 {
            push_segment_samples(begin, points[(i + 1) % n], radius, threshold, &mut dense);
        }
    }
    Ok(dense)
}

/// Resamples an open path; the closing segment is not densified.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
pub fn densify_path(points: &[Point2], radius: f64, threshold: f64) -> SliceResult<Loop> {
    check_radius(radius)?;
    check_positive("threshold", threshold)?;
    let mut dense = Vec::with_capacity(points.len());
    for pair in points.windows(2) {
        dense.push(pair[0]);
        push_segment_samples(pair[0], pair[1], radius, threshold, &mut dense);
    }
    if let Some(&last) = points.last() {
        dense.push(last);
    }
    Ok(dense)
}

/// Interior points of the chord `begin..end` only.
pub(crate) fn chord_samples(begin: Point2, end: Point2, radius: f64, threshold: f64) -> Loop {
    let mut samples = Vec::new();
    push_segment_samples(begin, end, radius, threshold, &mut samples);
    samples
}

// =============================================================================
// CENTER LOOPS
// =============================================================================

/// Closed loops of sample points along the envelope of circles of `radius`.
///
/// No filtering is applied: every envelope component yields one loop, the
/// outer envelope counter-clockwise and inner envelopes clockwise.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
pub fn centers_from_points(points: &[Point2], radius: f64) -> SliceResult<Vec<Loop>> {
    check_radius(radius)?;
    if points.len() < 2 {
        return Ok(Vec::new());
    }
    let graph = CircleGraph::new(points, radius);
    tracing::trace!(
        nodes = graph.node_count(),
        intersections = graph.intersection_count(),
        "built circle graph"
    );
    Ok(graph.into_center_loops())
}
