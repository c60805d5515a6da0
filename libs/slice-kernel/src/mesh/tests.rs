//! Tests for mesh topology.

use super::*;
use approx::assert_relative_eq;

fn unit_cube() -> Mesh {
    Mesh::cuboid(Point3::splat(-1.0), Point3::splat(1.0), true).unwrap()
}

// =============================================================================
// CONSTRUCTION
// =============================================================================

#[test]
fn test_cube_topology_is_manifold() {
    let cube = unit_cube();
    assert_eq!(cube.vertex_count(), 8);
    assert_eq!(cube.face_count(), 12);
    // 12 box edges plus one diagonal per side
    assert_eq!(cube.edge_count(), 18);
    assert!(cube.is_manifold());
    assert!(cube.non_manifold_edges().is_empty());
}

#[test]
fn test_face_edges_join_face_vertices() {
    let cube = unit_cube();
    for face in cube.faces() {
        for slot in 0..3 {
            let edge = &cube.edges()[face.edges[slot] as usize];
            let a = face.vertices[slot];
            let b = face.vertices[(slot + 1) % 3];
            assert_eq!(edge.vertices, [a.min(b), a.max(b)]);
        }
    }
}

#[test]
fn test_open_mesh_records_boundary_edges() {
    let mesh = Mesh::new(
        vec![Point3::ZERO, Point3::X, Point3::Y],
        vec![[0, 1, 2]],
    )
    .unwrap();
    assert_eq!(mesh.non_manifold_edges().len(), 3);
    assert!(!mesh.is_manifold());
}

#[test]
fn test_rejects_out_of_range_vertex() {
    let result = Mesh::new(vec![Point3::ZERO, Point3::X], vec![[0, 1, 5]]);
    assert!(matches!(result, Err(SliceError::InvalidTopology { .. })));
}

#[test]
fn test_rejects_repeated_vertex() {
    let result = Mesh::new(
        vec![Point3::ZERO, Point3::X, Point3::Y],
        vec![[0, 1, 1]],
    );
    assert!(matches!(result, Err(SliceError::InvalidTopology { .. })));
}

#[test]
fn test_from_tuples() {
    let mesh = Mesh::from_tuples(
        &[(0.0, 0.0, 0.0), (1.0, 0.0, 0.0), (0.0, 1.0, 1.0)],
        &[(0, 1, 2)],
    )
    .unwrap();
    assert_eq!(mesh.vertices()[2], Point3::new(0.0, 1.0, 1.0));
}

#[test]
fn test_degenerate_cuboid_rejected() {
    let result = Mesh::cuboid(Point3::ZERO, Point3::new(1.0, 0.0, 1.0), true);
    assert!(matches!(
        result,
        Err(SliceError::InvalidParameter { name: "size.y", .. })
    ));
}

#[test]
fn test_merged_keeps_shells_apart() {
    let outer = unit_cube();
    let inner = Mesh::cuboid(Point3::splat(-0.5), Point3::splat(0.5), false).unwrap();
    let merged = Mesh::merged(&[outer, inner]);
    assert_eq!(merged.vertex_count(), 16);
    assert_eq!(merged.edge_count(), 36);
    assert!(merged.is_manifold());
}

// =============================================================================
// HEIGHT QUERIES
// =============================================================================

#[test]
fn test_edges_crossing_mid_height() {
    let cube = unit_cube();
    // four vertical edges and four side diagonals
    assert_eq!(cube.edges_crossing(0.0).len(), 8);
    // nothing rises above the top face
    assert!(cube.edges_crossing(1.0).is_empty());
}

#[test]
fn test_edges_crossing_at_vertex_height() {
    let cube = unit_cube();
    // the bottom face lies in the plane, the edges leaving it upward count
    let crossed = cube.edges_crossing(-1.0);
    assert_eq!(crossed.len(), 8);
    for edge in crossed {
        assert_eq!(cube.edge_z_range(edge), (-1.0, 1.0));
    }
}

#[test]
fn test_edge_point_interpolates() {
    let mesh = Mesh::new(
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 4.0, 2.0),
            Point3::new(1.0, 0.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
    .unwrap();
    let edge = mesh
        .edges()
        .iter()
        .position(|e| e.vertices == [0, 1])
        .unwrap() as u32;
    let point = mesh.edge_point_at(edge, 0.5);
    assert_relative_eq!(point.x, 0.5);
    assert_relative_eq!(point.y, 1.0);
    assert_eq!(mesh.edge_z_range(edge), (0.0, 2.0));
}

#[test]
fn test_z_bounds() {
    assert_eq!(unit_cube().z_bounds(), Some((-1.0, 1.0)));
    let empty = Mesh::new(Vec::new(), Vec::new()).unwrap();
    assert_eq!(empty.z_bounds(), None);
    assert!(empty.is_empty());
}

#[test]
fn test_mesh_is_sync() {
    fn assert_sync<T: Send + Sync>() {}
    assert_sync::<Mesh>();
}
