//! Classification and cleanup of center loops.

use super::centers_from_points;
use crate::error::SliceResult;
use crate::geometry::{
    is_widdershins, maximum_span, orient_by_nesting, remove_self_intersections,
    simplify_loop, sort_by_descending_area, Loop, Point2,
};
use config::constants::{KernelConfig, INLINE_DOT_LIMIT};
use std::collections::HashSet;

/// Bit-exact key of a point, for membership tests on sampled points.
type PointKey = (u64, u64);

#[inline]
fn key(point: Point2) -> PointKey {
    (point.x.to_bits(), point.y.to_bits())
}

/// Reconstructs closed loops from boundary samples with default tunables.
///
/// With `want_interior`, counter-clockwise envelopes are preferred over the
/// clockwise envelopes that run along the same samples. The result is sorted
/// by descending area and oriented by nesting parity.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
///
/// # Example
///
/// ```rust
/// use slice_kernel::reconstruct;
/// use slice_kernel::ops::intercircle::densify_loop;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// let samples = densify_loop(&square, 0.05, 0.9).unwrap();
/// let loops = reconstruct(&samples, 0.05, true).unwrap();
/// assert_eq!(loops.len(), 1);
/// assert_eq!(loops[0].len(), 4);
/// ```
pub fn reconstruct(points: &[Point2], radius: f64, want_interior: bool) -> SliceResult<Vec<Loop>> {
    reconstruct_with(points, &[], radius, want_interior, &KernelConfig::default())
}

/// Reconstructs closed loops from boundary samples and mandatory corners.
///
/// Corners take precedence over nearby samples when merging, and a corner
/// that no loop passes through is inserted where it adds the least perimeter,
/// provided it lies within `corner_insert_ratio · radius` of its neighbour
/// and nearly in line with the neighbouring edge.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
pub fn reconstruct_with(
    points: &[Point2],
    corners: &[Point2],
    radius: f64,
    want_interior: bool,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    let mut samples = Vec::with_capacity(corners.len() + points.len());
    samples.extend_from_slice(corners);
    samples.extend_from_slice(points);
    let centers = centers_from_points(&samples, radius)?;

    let min_span = config.min_span_ratio * radius;
    let candidates: Vec<Loop> = centers
        .into_iter()
        .filter(|points| points.len() > 2 && maximum_span(points) > min_span)
        .collect();

    let (mut first, mut second): (Vec<Loop>, Vec<Loop>) = if want_interior {
        candidates.into_iter().partition(|points| is_widdershins(points))
    } else {
        (candidates, Vec::new())
    };
    sort_by_descending_area(&mut first);
    sort_by_descending_area(&mut second);

    let mut claimed: HashSet<PointKey> = HashSet::new();
    let mut kept = Vec::new();
    for points in first.into_iter().chain(second) {
        if overlap_ratio(&points, &claimed) < config.overlap_ratio {
            claimed.extend(points.iter().map(|&p| key(p)));
            kept.push(points);
        }
    }

    let channel = config.simplify_channel_ratio * radius;
    let mut loops: Vec<Loop> = kept
        .into_iter()
        .map(|points| simplify_loop(&points, channel))
        .collect();

    let close = config.corner_insert_ratio * radius;
    for &corner in corners {
        if claimed.insert(key(corner)) {
            insert_with_least_length(&mut loops, corner, close);
        }
    }

    let loops: Vec<Loop> = loops
        .into_iter()
        .map(|points| remove_self_intersections(&simplify_loop(&points, channel)))
        .filter(|points| points.len() > 2)
        .collect();
    Ok(orient_by_nesting(loops))
}

/// Share of the loop's points already claimed by an accepted loop.
fn overlap_ratio(points: &[Point2], claimed: &HashSet<PointKey>) -> f64 {
    if points.is_empty() {
        return 1.0;
    }
    let overlapping = points.iter().filter(|&&p| claimed.contains(&key(p))).count();
    overlapping as f64 / points.len() as f64
}

// =============================================================================
// CORNER INSERTION
// =============================================================================

/// Inserts `point` into the loop position adding the least perimeter.
fn insert_with_least_length(loops: &mut [Loop], point: Point2, close: f64) {
    let mut shortest = close;
    let mut best: Option<(usize, usize)> = None;
    for (loop_index, points) in loops.iter().enumerate() {
        let n = points.len();
        if n < 3 {
            continue;
        }
        for index in 0..n {
            let before = points[(index + n - 1) % n];
            let after = points[index];
            let additional = point.distance(before) + point.distance(after) - after.distance(before);
            if additional < shortest && is_close_inline(points, point, index, close) {
                shortest = additional;
                best = Some((loop_index, index));
            }
        }
    }
    if let Some((loop_index, index)) = best {
        loops[loop_index].insert(index, point);
    }
}

/// True when `point`, inserted before `index`, continues one of the
/// neighbouring edges nearly straight and sits close to that neighbour.
fn is_close_inline(points: &[Point2], point: Point2, index: usize, close: f64) -> bool {
    let n = points.len();
    let after = points[index];
    let after_end = points[(index + 1) % n];
    let before = points[(index + n - 1) % n];
    let before_end = points[(index + n - 2) % n];
    (point.distance(after) <= close && is_inline(point, after, after_end))
        || (point.distance(before) <= close && is_inline(point, before, before_end))
}

/// True when `center` lies between `begin` and `end` on a nearly straight
/// line.
fn is_inline(begin: Point2, center: Point2, end: Point2) -> bool {
    let to_begin = (begin - center).normalize_or_zero();
    let to_end = (end - center).normalize_or_zero();
    if to_begin == Point2::ZERO || to_end == Point2::ZERO {
        return false;
    }
    to_begin.dot(to_end) < INLINE_DOT_LIMIT
}
