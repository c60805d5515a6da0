//! # Loop Offset
//!
//! Insets and outsets loop sets by a signed radius using the circle envelope.
//!
//! ## Algorithm Overview
//!
//! 1. Densify every input loop at `offset_densify_multiplier · |r|`
//! 2. Build center loops from circles of `intercircle_multiplier · |r|`
//! 3. Move every center loop `|r|` to the right of its direction of travel,
//!    so counter-clockwise centers grow and clockwise centers shrink
//! 4. Keep results that still wind like their center loop, are wider than
//!    the minimum span, and lie on the requested side of the filled region
//!
//! ## Sign Convention
//!
//! - Positive radii expand the filled region
//! - Negative radii shrink the filled region
//!
//! Unlike a vertex offset, an inset wider than the region yields nothing
//! instead of an inverted loop.


use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{check_radius, SliceResult};
use crate::geometry::{
    clockwise_quarter, direct_loops, distance_to_segment, is_point_in_filled_region,
    is_widdershins, largest_loop, left_point, maximum_span, orient_by_nesting,
    remove_self_intersections, simplify_loop, Loop, Point2,
};
use crate::ops::intercircle::{centers_from_points, densify_loop, densify_path, reconstruct_with};
use config::constants::{KernelConfig, MIN_INSET_DOT};
use std::f64::consts::TAU;
use tracing::debug;

// =============================================================================
// LOOP SETS
// =============================================================================

/// Offsets a set of loops with default tunables.
///
/// An inset at least as wide as the region returns no loop, and no smaller
/// radius is tried. Use [`largest_offset_loop`] for the retry ladder and the
/// fallback to the input loop.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// when the radius is zero or not finite.
///
/// # Example
///
/// ```rust
/// use slice_kernel::offset;
/// use slice_kernel::geometry::area;
/// use glam::DVec2;
///
/// let square = vec![
///     DVec2::new(-1.0, -1.0),
///     DVec2::new(1.0, -1.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(-1.0, 1.0),
/// ];
/// let inset = offset(&[square], -0.2).unwrap();
/// assert_eq!(inset.len(), 1);
/// assert!(area(&inset[0]) < 4.0);
/// ```
pub fn offset(loops: &[Loop], signed_radius: f64) -> SliceResult<Vec<Loop>> {
    offset_with(loops, signed_radius, &KernelConfig::default())
}

/// Offsets a set of loops, treating them together as one filled region.
///
/// The result is sorted by descending area and oriented by nesting parity.
/// Like [`offset`], it never retries a collapsed inset.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// when the radius is zero or not finite.
pub fn offset_with(
    loops: &[Loop],
    signed_radius: f64,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    let radius = signed_radius.abs();
    check_radius(radius)?;
    let shrink = signed_radius < 0.0;

    let mut samples = Vec::new();
    for points in loops.iter().filter(|points| points.len() > 2) {
        samples.extend(densify_loop(
            points,
            config.offset_densify_multiplier * radius,
            config.densify_threshold,
        )?);
    }

    let arounds = arounds_from_points(&samples, radius, config)?;
    let kept: Vec<Loop> = arounds
        .into_iter()
        .filter(|around| {
            left_point(around)
                .map(|point| is_point_in_filled_region(loops, point) == shrink)
                .unwrap_or(false)
        })
        .collect();
    debug!(
        input = loops.len(),
        output = kept.len(),
        radius = signed_radius,
        "offset loops"
    );
    Ok(orient_by_nesting(kept))
}

/// Offsets a single loop, directing every result like the input loop.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// when the radius is zero or not finite.
pub fn inset_loops_from_loop(
    points: &[Point2],
    signed_radius: f64,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    let widdershins = is_widdershins(points);
    let mut loops = offset_with(&[points.to_vec()], signed_radius, config)?;
    direct_loops(widdershins, &mut loops);
    Ok(loops)
}

/// Largest offset of a loop, retrying at smaller radii.
///
/// The radius is scaled by each multiplier of `radius_retry_ladder` in turn
/// and the first non-empty result wins. When every attempt fails the input
/// loop is returned unchanged and a
/// [`ReconstructionEmpty`](DiagnosticKind::ReconstructionEmpty) diagnostic is
/// recorded.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// when the radius is zero or not finite.
pub fn largest_offset_loop(
    points: &[Point2],
    signed_radius: f64,
    config: &KernelConfig,
    diagnostics: &mut Diagnostics,
) -> SliceResult<Loop> {
    check_radius(signed_radius.abs())?;
    for multiplier in config.radius_retry_ladder {
        let loops = inset_loops_from_loop(points, signed_radius * multiplier, config)?;
        if let Some(largest) = largest_loop(&loops) {
            if multiplier < 1.0 {
                debug!(multiplier, "offset succeeded at reduced radius");
            }
            return Ok(largest.clone());
        }
    }
    diagnostics.report(
        DiagnosticKind::ReconstructionEmpty,
        None,
        format!(
            "no offset of a {}-point loop at radius {signed_radius}",
            points.len()
        ),
    );
    Ok(points.to_vec())
}

// =============================================================================
// PATHS
// =============================================================================

/// Outline of an open path stroked with `radius`, with rounded end caps.
///
/// Samples are taken along both sides of every segment and around every
/// vertex; samples buried inside the stroke are dropped and the rest
/// reconstructed at half the radius.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
///
/// # Example
///
/// ```rust
/// use slice_kernel::ops::offset::outline_path;
/// use slice_kernel::geometry::area;
/// use config::constants::KernelConfig;
/// use glam::DVec2;
///
/// let path = [DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)];
/// let outline = outline_path(&path, 0.5, &KernelConfig::default()).unwrap();
/// assert_eq!(outline.len(), 1);
/// assert!(area(&outline[0]) > 4.0);
/// ```
pub fn outline_path(
    path: &[Point2],
    radius: f64,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    check_radius(radius)?;
    if path.is_empty() {
        return Ok(Vec::new());
    }
    let sample_radius = 0.5 * radius;
    let spacing = config.densify_threshold * sample_radius;

    let mut samples = Vec::new();
    let steps = ((TAU * radius / spacing).ceil() as usize).max(8);
    for &vertex in path {
        samples.extend((0..steps).map(|step| {
            let (sin, cos) = (TAU * step as f64 / steps as f64).sin_cos();
            vertex + Point2::new(cos, sin) * radius
        }));
    }
    for pair in path.windows(2) {
        let direction = (pair[1] - pair[0]).normalize_or_zero();
        if direction == Point2::ZERO {
            continue;
        }
        let right = clockwise_quarter(direction) * radius;
        for side in [right, -right] {
            let edge = [pair[0] + side, pair[1] + side];
            samples.extend(densify_path(
                &edge,
                sample_radius,
                config.densify_threshold,
            )?);
        }
    }

    let buried = radius * (1.0 - 1e-6);
    samples.retain(|&sample| distance_to_path(path, sample) >= buried);
    reconstruct_with(&samples, &[], sample_radius, false, config)
}

fn distance_to_path(path: &[Point2], point: Point2) -> f64 {
    if path.len() == 1 {
        return point.distance(path[0]);
    }
    path.windows(2)
        .map(|pair| distance_to_segment(point, pair[0], pair[1]))
        .fold(f64::INFINITY, f64::min)
}

// =============================================================================
// INSET CONSTRUCTION
// =============================================================================

/// Offset candidates of every center loop built from `samples`.
fn arounds_from_points(
    samples: &[Point2],
    radius: f64,
    config: &KernelConfig,
) -> SliceResult<Vec<Loop>> {
    let centers = centers_from_points(samples, config.intercircle_multiplier * radius)?;
    let min_span = config.min_span_ratio * radius;
    let channel = config.simplify_channel_ratio * radius;
    Ok(centers
        .iter()
        .filter_map(|center| {
            let inset = inset_from_clockwise_loop(center, radius, channel);
            let large_same_direction = inset.len() > 2
                && is_widdershins(&inset) == is_widdershins(center)
                && maximum_span(&inset) > min_span;
            large_same_direction.then_some(inset)
        })
        .collect())
}

/// Moves every vertex `radius` to the right of the direction of travel.
fn inset_from_clockwise_loop(points: &[Point2], radius: f64, channel: f64) -> Loop {
    let n = points.len();
    let mut inset = Vec::with_capacity(n);
    for index in 0..n {
        let begin = points[index];
        let center = points[(index + 1) % n];
        let end = points[(index + 2) % n];
        if let Some(point) = inset_point(begin, center, end, radius) {
            inset.push(point);
        }
    }
    remove_self_intersections(&simplify_loop(&inset, channel))
}

/// Mitred offset of `center` along the averaged right-hand normals.
fn inset_point(begin: Point2, center: Point2, end: Point2, radius: f64) -> Option<Point2> {
    let incoming = clockwise_quarter((center - begin).normalize_or_zero());
    let outgoing = clockwise_quarter((end - center).normalize_or_zero());
    match (incoming == Point2::ZERO, outgoing == Point2::ZERO) {
        (true, true) => None,
        (true, false) => Some(center + outgoing * radius),
        (false, true) => Some(center + incoming * radius),
        (false, false) => {
            let bisector = (incoming + outgoing) * 0.5;
            let dot = incoming.dot(bisector).abs().max(MIN_INSET_DOT);
            Some(center + bisector * (radius / dot))
        }
    }
}
