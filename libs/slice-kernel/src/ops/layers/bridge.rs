//! Bridge detection: the dominant direction of unsupported spans.

use crate::error::{check_radius, SliceResult};
use crate::geometry::{
    complex_mul, complex_sqrt, is_point_in_filled_region, segment_intersection, Loop, Point2,
};
use crate::ops::offset::offset_with;
use config::constants::{KernelConfig, BRIDGE_SPAN_RATIO};

/// Direction of the bridge in `layer` over the loops `below`, if any.
///
/// The loops below are outset by `radius`; every part of a layer segment
/// that falls outside the outset region overhangs. Overhang directions are
/// accumulated with doubled angles so that opposite directions reinforce
/// each other, weighted by their length. The layer is a bridge when the
/// accumulated length reaches `BRIDGE_SPAN_RATIO · radius`; the result is a
/// unit vector with a non-negative x component.
///
/// # Errors
///
/// Returns [`SliceError::InvalidRadius`](crate::SliceError::InvalidRadius)
/// for a radius that is not positive.
pub fn bridge_direction(
    below: &[Loop],
    layer: &[Loop],
    radius: f64,
    config: &KernelConfig,
) -> SliceResult<Option<Point2>> {
    check_radius(radius)?;
    if below.is_empty() {
        return Ok(None);
    }
    let support = offset_with(below, radius, config)?;

    let mut rotation = Point2::ZERO;
    for points in layer {
        let n = points.len();
        for index in 0..n {
            let begin = points[(index + n - 1) % n];
            let end = points[index];
            rotation += overhang_direction(&support, begin, end);
        }
    }

    let length = rotation.length();
    if length < BRIDGE_SPAN_RATIO * radius {
        return Ok(None);
    }
    Ok(Some(complex_sqrt(rotation / length)))
}

/// Doubled-angle sum of the unsupported pieces of one segment.
fn overhang_direction(support: &[Loop], begin: Point2, end: Point2) -> Point2 {
    let segment = end - begin;
    let length_squared = segment.length_squared();
    if length_squared == 0.0 {
        return Point2::ZERO;
    }

    let mut cuts = vec![0.0, 1.0];
    for points in support {
        let m = points.len();
        for j in 0..m {
            if let Some(crossing) = segment_intersection(begin, end, points[j], points[(j + 1) % m]) {
                cuts.push(((crossing - begin).dot(segment) / length_squared).clamp(0.0, 1.0));
            }
        }
    }
    cuts.sort_by(f64::total_cmp);

    let mut direction = Point2::ZERO;
    for pair in cuts.windows(2) {
        if pair[1] - pair[0] <= 0.0 {
            continue;
        }
        let middle = begin + segment * (0.5 * (pair[0] + pair[1]));
        if !is_point_in_filled_region(support, middle) {
            direction += doubled(segment * (pair[1] - pair[0]));
        }
    }
    direction
}

/// Squares a piece as a complex number, keeping its length.
fn doubled(piece: Point2) -> Point2 {
    let length = piece.length();
    if length == 0.0 {
        return Point2::ZERO;
    }
    let piece = if piece.x < 0.0 { -piece } else { piece };
    complex_mul(piece, piece) / length
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Loop {
        vec![
            Point2::new(x0, y0),
            Point2::new(x1, y0),
            Point2::new(x1, y1),
            Point2::new(x0, y1),
        ]
    }

    #[test]
    fn test_supported_layer_is_not_a_bridge() {
        let square = vec![rectangle(0.0, 0.0, 4.0, 4.0)];
        let direction =
            bridge_direction(&square, &square, 0.4, &KernelConfig::default()).unwrap();
        assert_eq!(direction, None);
    }

    #[test]
    fn test_span_between_pillars_runs_along_x() {
        let pillars = vec![rectangle(0.0, 0.0, 1.0, 1.0), rectangle(5.0, 0.0, 6.0, 1.0)];
        let deck = vec![rectangle(0.0, 0.0, 6.0, 1.0)];
        let direction = bridge_direction(&pillars, &deck, 0.4, &KernelConfig::default())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(direction.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(direction.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_span_along_y() {
        let pillars = vec![rectangle(0.0, 0.0, 1.0, 1.0), rectangle(0.0, 5.0, 1.0, 6.0)];
        let deck = vec![rectangle(0.0, 0.0, 1.0, 6.0)];
        let direction = bridge_direction(&pillars, &deck, 0.4, &KernelConfig::default())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(direction.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(direction.y.abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_nothing_below_is_not_a_bridge() {
        let deck = vec![rectangle(0.0, 0.0, 6.0, 1.0)];
        let direction = bridge_direction(&[], &deck, 0.4, &KernelConfig::default()).unwrap();
        assert_eq!(direction, None);
    }

    #[test]
    fn test_doubled_folds_opposite_directions() {
        let east = doubled(Point2::new(2.0, 0.0));
        let west = doubled(Point2::new(-2.0, 0.0));
        assert_eq!(east, west);
        assert_abs_diff_eq!(east.length(), 2.0, epsilon = 1e-12);
    }
}
