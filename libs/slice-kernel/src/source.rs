//! # Loop Sources
//!
//! Anything the layer sequencer can cut: a solid with a height range that
//! yields oriented loops at any z.

use crate::diagnostics::Diagnostics;
use crate::error::SliceResult;
use crate::geometry::Loop;
use crate::mesh::Mesh;
use crate::ops::slice::slice;
use crate::params::SliceParams;

/// A solid that can be cut into loops at any height.
///
/// Implementations must be shareable across threads so independent layers
/// can be evaluated in parallel.
pub trait LoopSource: Sync {
    /// Lowest and highest z of the solid, or `None` when it is empty.
    fn z_bounds(&self) -> Option<(f64, f64)>;

    /// Heights of every vertex, used to steer layers away from them.
    fn vertex_heights(&self) -> Vec<f64>;

    /// Oriented loops of the cross section at `z`.
    ///
    /// # Errors
    ///
    /// Returns [`SliceError`](crate::SliceError) when `params` are invalid.
    fn loops_at(
        &self,
        z: f64,
        params: &SliceParams,
        diagnostics: &mut Diagnostics,
    ) -> SliceResult<Vec<Loop>>;
}

impl LoopSource for Mesh {
    fn z_bounds(&self) -> Option<(f64, f64)> {
        Mesh::z_bounds(self)
    }

    fn vertex_heights(&self) -> Vec<f64> {
        self.vertices().iter().map(|vertex| vertex.z).collect()
    }

    fn loops_at(
        &self,
        z: f64,
        params: &SliceParams,
        diagnostics: &mut Diagnostics,
    ) -> SliceResult<Vec<Loop>> {
        slice(self, z, params, diagnostics)
    }
}

impl<T: LoopSource + ?Sized> LoopSource for &T {
    fn z_bounds(&self) -> Option<(f64, f64)> {
        (**self).z_bounds()
    }

    fn vertex_heights(&self) -> Vec<f64> {
        (**self).vertex_heights()
    }

    fn loops_at(
        &self,
        z: f64,
        params: &SliceParams,
        diagnostics: &mut Diagnostics,
    ) -> SliceResult<Vec<Loop>> {
        (**self).loops_at(z, params, diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;

    #[test]
    fn test_mesh_source_heights() {
        let cube = Mesh::cuboid(Point3::splat(-1.0), Point3::splat(1.0), true).unwrap();
        let source: &dyn LoopSource = &cube;
        assert_eq!(source.z_bounds(), Some((-1.0, 1.0)));
        let heights = source.vertex_heights();
        assert_eq!(heights.len(), 8);
        assert!(heights.iter().all(|z| z.abs() == 1.0));
    }

    #[test]
    fn test_mesh_source_slices() {
        let cube = Mesh::cuboid(Point3::splat(-1.0), Point3::splat(1.0), true).unwrap();
        let mut diagnostics = Diagnostics::new();
        let loops = cube
            .loops_at(0.5, &SliceParams::new(0.05), &mut diagnostics)
            .unwrap();
        assert_eq!(loops.len(), 1);
    }
}
