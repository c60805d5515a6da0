//! Tests for CSG tree evaluation.

use super::*;
use crate::geometry::{area, is_widdershins, Point2, Point3};
use approx::assert_abs_diff_eq;

fn cube(min: f64, max: f64) -> CsgNode {
    CsgNode::leaf(Mesh::cuboid(Point3::splat(min), Point3::splat(max), true).unwrap())
}

fn square(min: f64, max: f64) -> Loop {
    vec![
        Point2::new(min, min),
        Point2::new(max, min),
        Point2::new(max, max),
        Point2::new(min, max),
    ]
}

// =============================================================================
// BOUNDS
// =============================================================================

#[test]
fn test_z_bounds_follow_operation() {
    let low = cube(-1.0, 1.0);
    let high = cube(0.0, 3.0);
    assert_eq!(
        CsgNode::union(vec![low.clone(), high.clone()]).z_bounds(),
        Some((-1.0, 3.0))
    );
    assert_eq!(
        CsgNode::intersection(vec![low.clone(), high.clone()]).z_bounds(),
        Some((0.0, 1.0))
    );
    assert_eq!(
        CsgNode::difference(vec![low.clone(), high.clone()]).z_bounds(),
        Some((-1.0, 1.0))
    );
    assert_eq!(
        CsgNode::combine(CsgOp::LastMinusRest, vec![low, high]).z_bounds(),
        Some((0.0, 3.0))
    );
}

#[test]
fn test_disjoint_intersection_has_no_bounds() {
    let tree = CsgNode::intersection(vec![cube(-1.0, 0.0), cube(2.0, 3.0)]);
    assert_eq!(tree.z_bounds(), None);
    assert_eq!(CsgNode::union(Vec::new()).z_bounds(), None);
}

#[test]
fn test_prism_heights_are_ordered() {
    let prism = CsgNode::prism(vec![square(0.0, 1.0)], 2.0, -1.0);
    assert_eq!(prism.z_bounds(), Some((-1.0, 2.0)));
    assert_eq!(prism.vertex_count(), 8);
    let heights = prism.vertex_heights();
    assert_eq!(heights.len(), 8);
    assert_eq!(heights.iter().filter(|&&z| z == 2.0).count(), 4);
}

#[test]
fn test_vertex_count_sums_leaves() {
    let tree = CsgNode::union(vec![cube(-1.0, 1.0), cube(0.0, 3.0)]);
    assert_eq!(tree.vertex_count(), 16);
    assert_eq!(tree.vertex_heights().len(), 16);
}

// =============================================================================
// EVALUATION
// =============================================================================

#[test]
fn test_prism_outside_range_is_empty() {
    let prism = CsgNode::prism(vec![square(0.0, 1.0)], 0.0, 1.0);
    let mut diagnostics = Diagnostics::new();
    let params = SliceParams::new(0.02);
    assert_eq!(prism.loops_at(0.5, &params, &mut diagnostics).unwrap().len(), 1);
    assert!(prism.loops_at(1.5, &params, &mut diagnostics).unwrap().is_empty());
}

#[test]
fn test_mesh_minus_prism_at_height() {
    let tree = CsgNode::difference(vec![
        cube(-2.0, 2.0),
        CsgNode::prism(vec![square(-1.0, 1.0)], -3.0, 3.0),
    ]);
    let mut diagnostics = Diagnostics::new();
    let loops = tree
        .loops_at(0.3, &SliceParams::new(0.05), &mut diagnostics)
        .unwrap();
    assert_eq!(loops.len(), 2);
    assert!(is_widdershins(&loops[0]));
    assert!(!is_widdershins(&loops[1]));
    assert_abs_diff_eq!(area(&loops[0]), 16.0, epsilon = 0.05);
    assert_abs_diff_eq!(area(&loops[1]), 4.0, epsilon = 0.05);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_childless_combination_reports_ambiguity() {
    let tree = CsgNode::union(vec![cube(-1.0, 1.0), CsgNode::intersection(Vec::new())]);
    let mut diagnostics = Diagnostics::new();
    let loops = tree
        .loops_at(0.25, &SliceParams::new(0.05), &mut diagnostics)
        .unwrap();
    assert_eq!(loops.len(), 1);
    assert_abs_diff_eq!(area(&loops[0]), 4.0, epsilon = 1e-9);
    assert!(diagnostics.contains(DiagnosticKind::AmbiguousCsgOperand));
    assert_eq!(diagnostics.iter().next().and_then(|d| d.z), Some(0.25));
}

#[test]
fn test_invalid_params_propagate() {
    let prism = CsgNode::prism(vec![square(0.0, 1.0)], 0.0, 1.0);
    let mut diagnostics = Diagnostics::new();
    assert!(prism
        .loops_at(0.5, &SliceParams::new(0.0), &mut diagnostics)
        .is_err());
}
