//! # Mesh Topology
//!
//! Triangle mesh with deduplicated edges and face adjacency, the input of the
//! plane slicer.
//!
//! Vertices, edges and faces live in flat arrays and refer to each other by
//! index only. The mesh is immutable once built; the per-edge z extents are
//! computed lazily on first use and cached for the lifetime of the mesh.

mod cuboid;

use crate::error::{SliceError, SliceResult};
use crate::geometry::{Point2, Point3};
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

// =============================================================================
// TOPOLOGY ELEMENTS
// =============================================================================

/// An undirected edge between two vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    /// Vertex indices, lower index first.
    pub vertices: [u32; 2],
    /// Every face that owns this edge.
    pub faces: Vec<u32>,
}

/// A triangle in winding order together with its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    /// Vertex indices in winding order.
    pub vertices: [u32; 3],
    /// Edge indices, `edges[i]` joins `vertices[i]` and `vertices[(i + 1) % 3]`.
    pub edges: [u32; 3],
}

// =============================================================================
// MESH
// =============================================================================

/// A triangle mesh with edge and face adjacency.
///
/// # Example
///
/// ```rust
/// use slice_kernel::Mesh;
/// use glam::DVec3;
///
/// let mesh = Mesh::new(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z],
///     vec![[0, 2, 1], [0, 1, 3], [1, 2, 3], [2, 0, 3]],
/// )
/// .unwrap();
/// assert_eq!(mesh.edge_count(), 6);
/// assert!(mesh.is_manifold());
/// ```
#[derive(Debug)]
pub struct Mesh {
    vertices: Vec<Point3>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    edge_z_ranges: OnceLock<Vec<(f64, f64)>>,
}

impl Clone for Mesh {
    fn clone(&self) -> Self {
        Self {
            vertices: self.vertices.clone(),
            edges: self.edges.clone(),
            faces: self.faces.clone(),
            edge_z_ranges: OnceLock::new(),
        }
    }
}

impl Mesh {
    /// Builds the topology of a raw triangle list.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::InvalidTopology`] when a face references a
    /// vertex that does not exist or repeats a vertex.
    pub fn new(vertices: Vec<Point3>, triangles: Vec<[u32; 3]>) -> SliceResult<Self> {
        let vertex_count = vertices.len();
        for (face_index, triangle) in triangles.iter().enumerate() {
            if let Some(bad) = triangle.iter().find(|&&v| v as usize >= vertex_count) {
                return Err(SliceError::invalid_topology(format!(
                    "face {face_index} references vertex {bad} of {vertex_count}"
                )));
            }
            let [a, b, c] = *triangle;
            if a == b || b == c || c == a {
                return Err(SliceError::invalid_topology(format!(
                    "face {face_index} repeats a vertex: {triangle:?}"
                )));
            }
        }
        Ok(Self::build(vertices, &triangles))
    }

    /// Builds a mesh from plain coordinate tuples.
    ///
    /// # Errors
    ///
    /// Same as [`Mesh::new`].
    pub fn from_tuples(vertices: &[(f64, f64, f64)], faces: &[(u32, u32, u32)]) -> SliceResult<Self> {
        Self::new(
            vertices
                .iter()
                .map(|&(x, y, z)| Point3::new(x, y, z))
                .collect(),
            faces.iter().map(|&(a, b, c)| [a, b, c]).collect(),
        )
    }

    /// Builds the edge table for triangles already known to be valid.
    fn build(vertices: Vec<Point3>, triangles: &[[u32; 3]]) -> Self {
        let mut edge_map: HashMap<[u32; 2], u32> = HashMap::new();
        let mut edges: Vec<Edge> = Vec::new();
        let mut faces = Vec::with_capacity(triangles.len());

        for (face_index, triangle) in triangles.iter().enumerate() {
            let face_index = face_index as u32;
            let mut face_edges = [0u32; 3];
            for (slot, face_edge) in face_edges.iter_mut().enumerate() {
                let a = triangle[slot];
                let b = triangle[(slot + 1) % 3];
                let key = [a.min(b), a.max(b)];
                let edge_index = *edge_map.entry(key).or_insert_with(|| {
                    edges.push(Edge {
                        vertices: key,
                        faces: Vec::with_capacity(2),
                    });
                    (edges.len() - 1) as u32
                });
                edges[edge_index as usize].faces.push(face_index);
                *face_edge = edge_index;
            }
            faces.push(Face {
                vertices: *triangle,
                edges: face_edges,
            });
        }

        let mesh = Self {
            vertices,
            edges,
            faces,
            edge_z_ranges: OnceLock::new(),
        };
        debug!(
            vertices = mesh.vertices.len(),
            edges = mesh.edges.len(),
            faces = mesh.faces.len(),
            non_manifold = mesh.non_manifold_edges().len(),
            "built mesh topology"
        );
        mesh
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Deduplicated edges.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Faces in input order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Indices of edges not owned by exactly two faces.
    pub fn non_manifold_edges(&self) -> Vec<u32> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, edge)| edge.faces.len() != 2)
            .map(|(index, _)| index as u32)
            .collect()
    }

    /// Returns true when every edge is owned by exactly two faces.
    pub fn is_manifold(&self) -> bool {
        self.edges.iter().all(|edge| edge.faces.len() == 2)
    }

    // =========================================================================
    // HEIGHT QUERIES
    // =========================================================================

    /// Lowest and highest vertex z, or `None` for a mesh without vertices.
    pub fn z_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.vertices.iter().map(|v| v.z);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z))))
    }

    /// Cached `(z_min, z_max)` of an edge.
    pub fn edge_z_range(&self, edge: u32) -> (f64, f64) {
        self.edge_z_ranges.get_or_init(|| {
            self.edges
                .iter()
                .map(|edge| {
                    let a = self.vertices[edge.vertices[0] as usize].z;
                    let b = self.vertices[edge.vertices[1] as usize].z;
                    (a.min(b), a.max(b))
                })
                .collect()
        })[edge as usize]
    }

    /// Indices of edges with one endpoint at or below `z` and the other above.
    ///
    /// The half-open test gives every face zero or two crossed edges, so a
    /// plane through a vertex still closes the walk around it.
    pub fn edges_crossing(&self, z: f64) -> Vec<u32> {
        (0..self.edges.len() as u32)
            .filter(|&edge| {
                let (lo, hi) = self.edge_z_range(edge);
                lo <= z && z < hi
            })
            .collect()
    }

    /// Point where an edge meets the plane at `z`, projected onto xy.
    pub fn edge_point_at(&self, edge: u32, z: f64) -> Point2 {
        let [a, b] = self.edges[edge as usize].vertices;
        let a = self.vertices[a as usize];
        let b = self.vertices[b as usize];
        let dz = b.z - a.z;
        if dz == 0.0 {
            return a.truncate();
        }
        let t = (z - a.z) / dz;
        (a + (b - a) * t).truncate()
    }
}

#[cfg(test)]
mod tests;
