//! Tests for loop queries.

use super::*;
use approx::assert_relative_eq;

fn square(min: f64, max: f64) -> Loop {
    vec![
        Point2::new(min, min),
        Point2::new(max, min),
        Point2::new(max, max),
        Point2::new(min, max),
    ]
}

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Loop {
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

// =============================================================================
// AREA AND WINDING
// =============================================================================

#[test]
fn test_signed_area_follows_winding() {
    let mut points = square(0.0, 2.0);
    assert_relative_eq!(signed_area(&points), 4.0);
    assert!(is_widdershins(&points));
    points.reverse();
    assert_relative_eq!(signed_area(&points), -4.0);
    assert_relative_eq!(area(&points), 4.0);
}

#[test]
fn test_degenerate_loops_have_zero_area() {
    assert_eq!(signed_area(&[]), 0.0);
    assert_eq!(signed_area(&[Point2::ZERO, Point2::X]), 0.0);
}

#[test]
fn test_direct_loop_reverses_only_when_needed() {
    let mut points = square(0.0, 1.0);
    direct_loop(true, &mut points);
    assert_eq!(points[1], Point2::new(1.0, 0.0));
    direct_loop(false, &mut points);
    assert!(!is_widdershins(&points));
}

#[test]
fn test_sort_and_largest() {
    let mut loops = vec![square(0.0, 1.0), square(0.0, 3.0), square(0.0, 2.0)];
    assert_relative_eq!(area(largest_loop(&loops).unwrap()), 9.0);
    sort_by_descending_area(&mut loops);
    let areas: Vec<f64> = loops.iter().map(|l| area(l)).collect();
    assert_eq!(areas, vec![9.0, 4.0, 1.0]);
}

// =============================================================================
// EXTENTS
// =============================================================================

#[test]
fn test_spans() {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(3.0, 1.0),
    ];
    assert_eq!(maximum_span(&points), 3.0);
    assert_eq!(left_point(&points), Some(Point2::new(0.0, 0.0)));
    assert_relative_eq!(perimeter(&square(0.0, 1.0)), 4.0);
    assert_eq!(maximum_span(&[]), 0.0);
}

// =============================================================================
// CONTAINMENT
// =============================================================================

#[test]
fn test_point_inside_loop() {
    let points = square(0.0, 2.0);
    assert!(is_point_inside_loop(&points, Point2::new(1.0, 1.0)));
    assert!(!is_point_inside_loop(&points, Point2::new(3.0, 1.0)));
    assert!(!is_point_inside_loop(&points, Point2::new(-0.5, 1.0)));
}

#[test]
fn test_filled_region_uses_parity() {
    let loops = vec![square(-3.0, 3.0), square(-1.0, 1.0)];
    assert!(is_point_in_filled_region(&loops, Point2::new(2.0, 0.0)));
    assert!(!is_point_in_filled_region(&loops, Point2::new(0.0, 0.0)));
    assert!(!is_point_in_filled_region(&loops, Point2::new(4.0, 0.0)));
}

#[test]
fn test_orient_by_nesting_three_levels() {
    let loops = vec![square(-1.0, 1.0), square(-5.0, 5.0), square(-3.0, 3.0)];
    let oriented = orient_by_nesting(loops);
    assert_relative_eq!(area(&oriented[0]), 100.0);
    assert!(is_widdershins(&oriented[0]));
    assert!(!is_widdershins(&oriented[1]));
    assert!(is_widdershins(&oriented[2]));
}

// =============================================================================
// SEGMENTS
// =============================================================================

#[test]
fn test_segment_intersection() {
    let hit = segment_intersection(
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 2.0),
        Point2::new(0.0, 2.0),
        Point2::new(2.0, 0.0),
    )
    .unwrap();
    assert_relative_eq!(hit.x, 1.0);
    assert_relative_eq!(hit.y, 1.0);

    // touching endpoints count
    assert!(segment_intersection(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
    )
    .is_some());

    // parallel never intersects
    assert!(segment_intersection(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 1.0),
        Point2::new(1.0, 1.0),
    )
    .is_none());
}

#[test]
fn test_segments_cross_excludes_touching() {
    assert!(segments_cross(
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 2.0),
        Point2::new(0.0, 2.0),
        Point2::new(2.0, 0.0),
    ));
    assert!(!segments_cross(
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
    ));
}

#[test]
fn test_distance_to_segment_clamps() {
    let a = Point2::new(0.0, 0.0);
    let b = Point2::new(1.0, 0.0);
    assert_relative_eq!(distance_to_segment(Point2::new(0.5, 2.0), a, b), 2.0);
    assert_relative_eq!(distance_to_segment(Point2::new(2.0, 0.0), a, b), 1.0);
}

#[test]
fn test_loops_cross() {
    let a = square(0.0, 2.0);
    let b = square(1.0, 3.0);
    let c = square(5.0, 6.0);
    let inner = square(0.5, 1.5);
    assert!(loops_cross(&a, &b));
    assert!(!loops_cross(&a, &c));
    assert!(!loops_cross(&a, &inner));
}

#[test]
fn test_loops_sharing_edges_meet() {
    // no edge pair crosses properly, the top and bottom edges overlap
    let a = rectangle(0.0, 0.0, 1.0, 1.0);
    let b = rectangle(0.5, 0.0, 1.5, 1.0);
    assert!(loops_cross(&a, &b));
    assert!(loops_cross(&b, &a));

    let beside = rectangle(1.0, 0.0, 2.0, 1.0);
    assert!(loops_cross(&a, &beside));
}

#[test]
fn test_loops_touching_at_corner_meet() {
    let a = square(0.0, 1.0);
    let diagonal = square(1.0, 2.0);
    assert!(loops_cross(&a, &diagonal));
    let apart = square(1.1, 2.0);
    assert!(!loops_cross(&a, &apart));
}

#[test]
fn test_distance_to_loop() {
    let a = square(0.0, 2.0);
    assert_relative_eq!(distance_to_loop(&a, Point2::new(1.0, 0.5)), 0.5);
    assert_relative_eq!(distance_to_loop(&a, Point2::new(3.0, 1.0)), 1.0);
    assert_relative_eq!(distance_to_loop(&a, Point2::new(2.0, 2.0)), 0.0);
}

#[test]
fn test_remove_self_intersections_cuts_lobe() {
    // a square whose bottom edge doubles back over itself near the corner
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(2.0, 0.0),
        Point2::new(2.0, -0.2),
        Point2::new(1.8, 0.2),
        Point2::new(1.8, 2.0),
        Point2::new(0.0, 2.0),
    ];
    assert!(is_loop_self_intersecting(&points));
    let cleaned = remove_self_intersections(&points);
    assert!(!is_loop_self_intersecting(&cleaned));
    assert!(cleaned.len() >= 3);
    assert!(area(&cleaned) > 3.0);
}

#[test]
fn test_clean_loop_is_untouched() {
    let points = square(0.0, 1.0);
    assert_eq!(remove_self_intersections(&points), points);
}

// =============================================================================
// SIMPLIFICATION
// =============================================================================

#[test]
fn test_simplify_drops_collinear_and_duplicates() {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.25, 0.0),
        Point2::new(0.5, 0.0),
        Point2::new(0.75, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(1.0, 1.0),
        Point2::new(1.0, 1.0),
        Point2::new(0.0, 1.0),
    ];
    let simplified = simplify_loop(&points, 0.01);
    assert_eq!(simplified.len(), 4);
    assert_relative_eq!(area(&simplified), 1.0);
}

#[test]
fn test_simplify_keeps_triangles() {
    let points = vec![
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.5, 0.001),
    ];
    assert_eq!(simplify_loop(&points, 0.1).len(), 3);
}

// =============================================================================
// COMPLEX HELPERS
// =============================================================================

#[test]
fn test_complex_helpers() {
    let v = Point2::new(3.0, 4.0);
    let square_root = complex_sqrt(complex_mul(v, v));
    assert_relative_eq!(square_root.x, 3.0, epsilon = 1e-12);
    assert_relative_eq!(square_root.y, 4.0, epsilon = 1e-12);
    assert_eq!(clockwise_quarter(Point2::Y), Point2::X);
}

#[test]
fn test_tuple_adapters() {
    let tuples = vec![vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]];
    let loops = loops_from_tuples(&tuples);
    assert_eq!(loops[0][2], Point2::new(1.0, 1.0));
    assert_eq!(loops_to_tuples(&loops), tuples);
}
