//! Tests for cross-section booleans.

use super::*;
use crate::error::SliceError;
use crate::geometry::{area, is_point_inside_loop, is_widdershins};
use approx::assert_abs_diff_eq;

const RADIUS: f64 = 0.02;

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Loop {
    vec![
        Point2::new(x0, y0),
        Point2::new(x1, y0),
        Point2::new(x1, y1),
        Point2::new(x0, y1),
    ]
}

fn unit_square(x: f64) -> Vec<Loop> {
    vec![rectangle(x, 0.0, x + 1.0, 1.0)]
}

// =============================================================================
// OPERATIONS
// =============================================================================

#[test]
fn test_union_of_overlapping_squares() {
    let union = combine(CsgOp::Union, &[unit_square(0.0), unit_square(0.5)], RADIUS).unwrap();
    assert_eq!(union.len(), 1);
    assert!(is_widdershins(&union[0]));
    assert_abs_diff_eq!(area(&union[0]), 1.5, epsilon = 0.02);
}

#[test]
fn test_union_of_disjoint_squares_keeps_both() {
    let union = combine(CsgOp::Union, &[unit_square(0.0), unit_square(3.0)], RADIUS).unwrap();
    assert_eq!(union.len(), 2);
    for points in &union {
        assert!(is_widdershins(points));
        assert_abs_diff_eq!(area(points), 1.0, epsilon = 0.02);
    }
}

#[test]
fn test_intersection_of_overlapping_squares() {
    let meet =
        combine(CsgOp::Intersection, &[unit_square(0.0), unit_square(0.5)], RADIUS).unwrap();
    assert_eq!(meet.len(), 1);
    assert!(is_widdershins(&meet[0]));
    assert_abs_diff_eq!(area(&meet[0]), 0.5, epsilon = 0.02);
    assert!(is_point_inside_loop(&meet[0], Point2::new(0.75, 0.5)));
}

#[test]
fn test_intersection_of_disjoint_squares_is_empty() {
    let meet =
        combine(CsgOp::Intersection, &[unit_square(0.0), unit_square(3.0)], RADIUS).unwrap();
    assert!(meet.is_empty());
}

#[test]
fn test_first_minus_rest() {
    let rest =
        combine(CsgOp::FirstMinusRest, &[unit_square(0.0), unit_square(0.5)], RADIUS).unwrap();
    assert_eq!(rest.len(), 1);
    assert_abs_diff_eq!(area(&rest[0]), 0.5, epsilon = 0.02);
    assert!(is_point_inside_loop(&rest[0], Point2::new(0.25, 0.5)));
}

#[test]
fn test_last_minus_rest_reverses_operands() {
    let rest =
        combine(CsgOp::LastMinusRest, &[unit_square(0.0), unit_square(0.5)], RADIUS).unwrap();
    assert_eq!(rest.len(), 1);
    assert_abs_diff_eq!(area(&rest[0]), 0.5, epsilon = 0.02);
    assert!(is_point_inside_loop(&rest[0], Point2::new(1.25, 0.5)));
}

#[test]
fn test_difference_cuts_hole() {
    let outer = vec![rectangle(0.0, 0.0, 2.0, 2.0)];
    let inner = vec![rectangle(0.5, 0.5, 1.5, 1.5)];
    let ring = combine(CsgOp::FirstMinusRest, &[outer, inner], RADIUS).unwrap();
    assert_eq!(ring.len(), 2);
    assert!(is_widdershins(&ring[0]));
    assert!(!is_widdershins(&ring[1]));
    assert_abs_diff_eq!(area(&ring[0]), 4.0, epsilon = 0.02);
    assert_abs_diff_eq!(area(&ring[1]), 1.0, epsilon = 0.02);
}

#[test]
fn test_difference_cuts_notch() {
    let outer = vec![rectangle(0.0, 0.0, 2.0, 2.0)];
    let bite = vec![rectangle(1.0, 0.5, 3.0, 1.5)];
    let notched = combine(CsgOp::FirstMinusRest, &[outer, bite], RADIUS).unwrap();
    assert_eq!(notched.len(), 1);
    assert_abs_diff_eq!(area(&notched[0]), 3.0, epsilon = 0.03);
    assert!(!is_point_inside_loop(&notched[0], Point2::new(1.5, 1.0)));
}

// =============================================================================
// EMPTY OPERANDS
// =============================================================================

#[test]
fn test_empty_operands_degrade_to_identity() {
    let square = unit_square(0.0);
    let empty: Vec<Loop> = Vec::new();

    let union = combine(CsgOp::Union, &[empty.clone(), square.clone()], RADIUS).unwrap();
    assert_eq!(union, square);

    let meet = combine(CsgOp::Intersection, &[square.clone(), empty.clone()], RADIUS).unwrap();
    assert!(meet.is_empty());

    let minuend_empty =
        combine(CsgOp::FirstMinusRest, &[empty.clone(), square.clone()], RADIUS).unwrap();
    assert!(minuend_empty.is_empty());

    let nothing_removed =
        combine(CsgOp::FirstMinusRest, &[square.clone(), empty], RADIUS).unwrap();
    assert_eq!(nothing_removed, square);

    assert!(combine(CsgOp::Union, &[], RADIUS).unwrap().is_empty());
}

#[test]
fn test_degenerate_loops_are_ignored() {
    let sliver = vec![vec![Point2::ZERO, Point2::X]];
    let union = combine(CsgOp::Union, &[sliver, unit_square(0.0)], RADIUS).unwrap();
    assert_eq!(union, unit_square(0.0));
}

#[test]
fn test_invalid_radius_rejected() {
    let result = combine(CsgOp::Union, &[unit_square(0.0)], -1.0);
    assert_eq!(result, Err(SliceError::InvalidRadius { radius: -1.0 }));
}

#[test]
fn test_operation_names() {
    assert_eq!(CsgOp::Union.name(), "union");
    assert_eq!(CsgOp::LastMinusRest.name(), "last_minus_rest");
}
