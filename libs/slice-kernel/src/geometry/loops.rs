//! # Loop Queries
//!
//! Area, winding, containment, spans, simplification and crossing tests for
//! [`Loop`] values. Orientation predicates go through `robust::orient2d` so
//! that crossing decisions are exact for the input coordinates.

use super::{Loop, Point2};
use config::constants::EPSILON;
use robust::{orient2d, Coord};
use std::cmp::Ordering;

// =============================================================================
// AREA AND WINDING
// =============================================================================

/// Signed area of a loop, positive when counter-clockwise.
///
/// # Examples
/// ```
/// use slice_kernel::geometry::{signed_area, Point2};
///
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// assert_eq!(signed_area(&square), 1.0);
/// ```
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.perp_dot(b);
    }
    twice * 0.5
}

/// Absolute area of a loop.
pub fn area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Returns true for counter-clockwise loops.
pub fn is_widdershins(points: &[Point2]) -> bool {
    signed_area(points) > 0.0
}

/// Reverses `points` in place if its winding differs from `widdershins`.
pub fn direct_loop(widdershins: bool, points: &mut Loop) {
    if is_widdershins(points) != widdershins {
        points.reverse();
    }
}

/// Directs every loop to the same winding.
pub fn direct_loops(widdershins: bool, loops: &mut [Loop]) {
    for points in loops.iter_mut() {
        direct_loop(widdershins, points);
    }
}

/// Sorts loops from largest to smallest absolute area.
pub fn sort_by_descending_area(loops: &mut [Loop]) {
    loops.sort_by(|a, b| area(b).partial_cmp(&area(a)).unwrap_or(Ordering::Equal));
}

/// Returns the loop with the largest absolute area.
pub fn largest_loop(loops: &[Loop]) -> Option<&Loop> {
    loops
        .iter()
        .max_by(|a, b| area(a).partial_cmp(&area(b)).unwrap_or(Ordering::Equal))
}

// =============================================================================
// EXTENTS
// =============================================================================

/// Left-most point of a loop, ties broken by lower y.
pub fn left_point(points: &[Point2]) -> Option<Point2> {
    points.iter().copied().min_by(|a, b| {
        a.x.partial_cmp(&b.x)
            .unwrap_or(Ordering::Equal)
            .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
    })
}

/// Minimum and maximum corners of the bounding box.
pub fn bounds(points: &[Point2]) -> Option<(Point2, Point2)> {
    let first = *points.first()?;
    Some(
        points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
    )
}

/// Largest side of the bounding box.
pub fn maximum_span(points: &[Point2]) -> f64 {
    match bounds(points) {
        Some((lo, hi)) => {
            let span = hi - lo;
            span.x.max(span.y)
        }
        None => 0.0,
    }
}

/// Length of the closed boundary.
pub fn perimeter(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n)
        .map(|i| points[i].distance(points[(i + 1) % n]))
        .sum()
}

// =============================================================================
// CONTAINMENT
// =============================================================================

/// Crossing-number containment test for a single loop.
///
/// Points exactly on the boundary may report either side.
pub fn is_point_inside_loop(points: &[Point2], point: Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x < point.x {
                inside = !inside;
            }
        }
    }
    inside
}

/// Even-odd containment across a set of loops.
///
/// A point enclosed by an odd number of loops is inside the filled region,
/// which makes winding irrelevant.
pub fn is_point_in_filled_region(loops: &[Loop], point: Point2) -> bool {
    loops
        .iter()
        .filter(|points| is_point_inside_loop(points, point))
        .count()
        % 2
        == 1
}

/// Directs loops by nesting depth: even depth counter-clockwise, odd depth
/// clockwise. Loops are returned largest first.
///
/// # Examples
/// ```
/// use slice_kernel::geometry::{is_widdershins, orient_by_nesting, Point2};
///
/// let square = |s: f64| vec![
///     Point2::new(-s, -s),
///     Point2::new(-s, s),
///     Point2::new(s, s),
///     Point2::new(s, -s),
/// ];
/// let oriented = orient_by_nesting(vec![square(1.0), square(3.0)]);
/// assert!(is_widdershins(&oriented[0]));
/// assert!(!is_widdershins(&oriented[1]));
/// ```
pub fn orient_by_nesting(mut loops: Vec<Loop>) -> Vec<Loop> {
    sort_by_descending_area(&mut loops);
    let depths: Vec<usize> = (0..loops.len())
        .map(|i| nesting_depth(&loops, i))
        .collect();
    for (points, depth) in loops.iter_mut().zip(depths) {
        direct_loop(depth % 2 == 0, points);
    }
    loops
}

/// Number of other loops enclosing the left point of `loops[index]`.
fn nesting_depth(loops: &[Loop], index: usize) -> usize {
    let Some(leftmost) = left_point(&loops[index]) else {
        return 0;
    };
    loops
        .iter()
        .enumerate()
        .filter(|(other, points)| *other != index && is_point_inside_loop(points, leftmost))
        .count()
}

// =============================================================================
// SEGMENTS
// =============================================================================

#[inline]
fn coord(p: Point2) -> Coord<f64> {
    Coord { x: p.x, y: p.y }
}

/// Exact orientation of `c` relative to the directed line `a -> b`.
///
/// Positive when `c` lies to the left.
#[inline]
pub fn orientation(a: Point2, b: Point2, c: Point2) -> f64 {
    orient2d(coord(a), coord(b), coord(c))
}

/// Distance from `point` to the closed segment `a..b`.
pub fn distance_to_segment(point: Point2, a: Point2, b: Point2) -> f64 {
    let ab = b - a;
    let length_squared = ab.length_squared();
    if length_squared <= EPSILON * EPSILON {
        return point.distance(a);
    }
    let t = ((point - a).dot(ab) / length_squared).clamp(0.0, 1.0);
    point.distance(a + ab * t)
}

/// Intersection of two closed segments, touching endpoints included.
///
/// Parallel and collinear segments report no intersection.
pub fn segment_intersection(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> Option<Point2> {
    let r = a1 - a0;
    let s = b1 - b0;
    let denominator = r.perp_dot(s);
    if denominator.abs() <= EPSILON * r.length() * s.length() {
        return None;
    }
    let offset = b0 - a0;
    let t = offset.perp_dot(s) / denominator;
    let u = offset.perp_dot(r) / denominator;
    let range = -EPSILON..=1.0 + EPSILON;
    if range.contains(&t) && range.contains(&u) {
        Some(a0 + r * t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Returns true when the segments cross at a single interior point.
pub fn segments_cross(a0: Point2, a1: Point2, b0: Point2, b1: Point2) -> bool {
    let d1 = orientation(b0, b1, a0);
    let d2 = orientation(b0, b1, a1);
    let d3 = orientation(a0, a1, b0);
    let d4 = orientation(a0, a1, b1);
    opposite(d1, d2) && opposite(d3, d4)
}

#[inline]
fn opposite(a: f64, b: f64) -> bool {
    (a > 0.0 && b < 0.0) || (a < 0.0 && b > 0.0)
}

/// Returns true when the boundaries of `a` and `b` meet.
///
/// Besides proper crossings this catches edges running along each other and
/// loops that touch at a vertex, since nesting alone cannot orient either.
/// Disjoint loops and strictly nested loops do not meet.
pub fn loops_cross(a: &[Point2], b: &[Point2]) -> bool {
    let (Some((a_lo, a_hi)), Some((b_lo, b_hi))) = (bounds(a), bounds(b)) else {
        return false;
    };
    let tolerance = EPSILON * (1.0 + maximum_span(a).max(maximum_span(b)));
    if a_hi.x + tolerance < b_lo.x
        || b_hi.x + tolerance < a_lo.x
        || a_hi.y + tolerance < b_lo.y
        || b_hi.y + tolerance < a_lo.y
    {
        return false;
    }
    let (n, m) = (a.len(), b.len());
    let crossing = (0..n).any(|i| {
        let (a0, a1) = (a[i], a[(i + 1) % n]);
        (0..m).any(|j| segments_cross(a0, a1, b[j], b[(j + 1) % m]))
    });
    crossing
        || touches(a, b, tolerance)
        || touches(b, a, tolerance)
        || straddles(a, b)
        || straddles(b, a)
}

/// Some vertex of `points` lies on the boundary of `around`.
fn touches(points: &[Point2], around: &[Point2], tolerance: f64) -> bool {
    points
        .iter()
        .any(|&p| distance_to_loop(around, p) <= tolerance)
}

/// `points` has vertices both inside and outside `around`.
fn straddles(points: &[Point2], around: &[Point2]) -> bool {
    let inside = points
        .iter()
        .filter(|&&p| is_point_inside_loop(around, p))
        .count();
    inside > 0 && inside < points.len()
}

/// Distance from `point` to the nearest edge of a closed loop.
pub fn distance_to_loop(points: &[Point2], point: Point2) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| distance_to_segment(point, points[i], points[(i + 1) % n]))
        .fold(f64::INFINITY, f64::min)
}

/// First pair of non-adjacent edges that properly cross.
fn first_self_crossing(points: &[Point2]) -> Option<(usize, usize)> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    for i in 0..n {
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_cross(points[i], points[(i + 1) % n], points[j], points[(j + 1) % n]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// Returns true when two non-adjacent edges of the loop cross.
pub fn is_loop_self_intersecting(points: &[Point2]) -> bool {
    first_self_crossing(points).is_some()
}

/// Removes crossings by local excision.
///
/// When the edges on either side of a single edge cross, the shared vertex
/// moves to the crossing and the following vertex is dropped, cutting off the
/// small reversed lobe. Longer-range crossings drop one offending vertex at a
/// time. Stops when the loop is clean or fewer than three points remain.
pub fn remove_self_intersections(points: &[Point2]) -> Loop {
    let mut result = points.to_vec();
    let mut budget = result.len() * 2;
    while result.len() > 3 && budget > 0 {
        budget -= 1;
        let Some((i, j)) = first_self_crossing(&result) else {
            break;
        };
        let n = result.len();
        // index of the first edge when exactly one edge separates the pair
        let lobe_start = if j == i + 2 {
            Some(i)
        } else if i + n - 2 == j {
            Some(j)
        } else {
            None
        };
        match lobe_start {
            Some(a) => {
                let (b, c, d) = ((a + 1) % n, (a + 2) % n, (a + 3) % n);
                if let Some(crossing) =
                    segment_intersection(result[a], result[b], result[c], result[d])
                {
                    result[b] = crossing;
                }
                result.remove(c);
            }
            None => {
                result.remove((i + 1) % n);
            }
        }
    }
    result
}

// =============================================================================
// SIMPLIFICATION
// =============================================================================

/// Removes vertices within `channel` of the chord joining their neighbours,
/// and vertices closer than `channel` to a neighbour.
///
/// Passes never remove two adjacent vertices, so each removal is judged
/// against vertices that survive the pass. Loops never shrink below three
/// points.
///
/// # Examples
/// ```
/// use slice_kernel::geometry::{simplify_loop, Point2};
///
/// let square = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(0.5, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// assert_eq!(simplify_loop(&square, 0.001).len(), 4);
/// ```
pub fn simplify_loop(points: &[Point2], channel: f64) -> Loop {
    let channel = channel.max(EPSILON);
    let mut result = points.to_vec();
    loop {
        let n = result.len();
        if n <= 3 {
            break;
        }
        let mut keep = vec![true; n];
        let mut removed = 0;
        for i in 0..n {
            if n - removed <= 3 {
                break;
            }
            let previous = (i + n - 1) % n;
            let next = (i + 1) % n;
            if !keep[previous] || !keep[next] {
                continue;
            }
            if is_within_channel(result[previous], result[i], result[next], channel) {
                keep[i] = false;
                removed += 1;
            }
        }
        if removed == 0 {
            break;
        }
        result = result
            .into_iter()
            .zip(keep)
            .filter_map(|(p, k)| k.then_some(p))
            .collect();
    }
    result
}

fn is_within_channel(previous: Point2, point: Point2, next: Point2, channel: f64) -> bool {
    point.distance(previous) < channel
        || point.distance(next) < channel
        || distance_to_segment(point, previous, next) < channel
}

// =============================================================================
// TUPLE ADAPTERS
// =============================================================================

/// Converts loops to plain coordinate tuples.
pub fn loops_to_tuples(loops: &[Loop]) -> Vec<Vec<(f64, f64)>> {
    loops
        .iter()
        .map(|points| points.iter().map(|p| (p.x, p.y)).collect())
        .collect()
}

/// Builds loops from plain coordinate tuples.
pub fn loops_from_tuples(loops: &[Vec<(f64, f64)>]) -> Vec<Loop> {
    loops
        .iter()
        .map(|points| points.iter().map(|&(x, y)| Point2::new(x, y)).collect())
        .collect()
}
