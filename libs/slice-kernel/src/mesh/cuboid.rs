//! Axis-aligned box construction.

use super::Mesh;
use crate::error::{SliceError, SliceResult};
use crate::geometry::Point3;

impl Mesh {
    /// Creates an axis-aligned box between two corners.
    ///
    /// With `outward` false every triangle is reversed, which is how the inner
    /// shell of a hollow solid faces.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError::InvalidParameter`] when the box has no volume.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slice_kernel::Mesh;
    /// use glam::DVec3;
    ///
    /// let cube = Mesh::cuboid(DVec3::splat(-1.0), DVec3::splat(1.0), true).unwrap();
    /// assert_eq!(cube.vertex_count(), 8);
    /// assert_eq!(cube.face_count(), 12);
    /// assert_eq!(cube.z_bounds(), Some((-1.0, 1.0)));
    /// ```
    pub fn cuboid(min: Point3, max: Point3, outward: bool) -> SliceResult<Self> {
        let size = max - min;
        for (name, value) in [("size.x", size.x), ("size.y", size.y), ("size.z", size.z)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SliceError::InvalidParameter { name, value });
            }
        }
        let (vertices, triangles) = cuboid_triangles(min, max, outward);
        Ok(Self::build(vertices, &triangles))
    }

    /// Builds one mesh out of several, keeping every shell separate.
    pub fn merged(meshes: &[Mesh]) -> Self {
        let mut vertices = Vec::new();
        let mut triangles = Vec::new();
        for mesh in meshes {
            let base = vertices.len() as u32;
            vertices.extend_from_slice(mesh.vertices());
            triangles.extend(
                mesh.faces()
                    .iter()
                    .map(|face| face.vertices.map(|v| v + base)),
            );
        }
        Self::build(vertices, &triangles)
    }
}

/// Corner positions and counter-clockwise (seen from outside) triangles.
fn cuboid_triangles(min: Point3, max: Point3, outward: bool) -> (Vec<Point3>, Vec<[u32; 3]>) {
    let vertices = vec![
        Point3::new(min.x, min.y, min.z),
        Point3::new(max.x, min.y, min.z),
        Point3::new(max.x, max.y, min.z),
        Point3::new(min.x, max.y, min.z),
        Point3::new(min.x, min.y, max.z),
        Point3::new(max.x, min.y, max.z),
        Point3::new(max.x, max.y, max.z),
        Point3::new(min.x, max.y, max.z),
    ];
    let mut triangles = vec![
        // bottom
        [0, 2, 1],
        [0, 3, 2],
        // top
        [4, 5, 6],
        [4, 6, 7],
        // front
        [0, 1, 5],
        [0, 5, 4],
        // back
        [2, 3, 7],
        [2, 7, 6],
        // left
        [3, 0, 4],
        [3, 4, 7],
        // right
        [1, 2, 6],
        [1, 6, 5],
    ];
    if !outward {
        for triangle in triangles.iter_mut() {
            triangle.swap(1, 2);
        }
    }
    (vertices, triangles)
}
