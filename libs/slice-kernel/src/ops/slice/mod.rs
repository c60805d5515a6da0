//! # Plane Slicer
//!
//! Cuts a mesh with the horizontal plane at `z`.
//!
//! ## Strategy
//!
//! 1. **Exact walk** (manifold meshes): crossed edges are chained through
//!    their shared faces into closed loops, then checked for loops that
//!    cross, overlap or touch each other
//! 2. **Fallback**: crossed edge points become corners, chords between edges
//!    of the same face are densified, and the loops are reconstructed
//!
//! An edge counts as crossed when exactly one endpoint lies above the plane,
//! so a plane through a vertex picks up the edges leaving it upward and
//! never the edges lying in the plane.
//!
//! Degeneracies of the exact walk are reported as diagnostics and never abort
//! the slice.


use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::SliceResult;
use crate::geometry::{area, loops_cross, orient_by_nesting, simplify_loop, Loop, Point2};
use config::constants::EPSILON;
use crate::mesh::Mesh;
use crate::ops::intercircle::{chord_samples, reconstruct_with};
use crate::params::SliceParams;
use tracing::debug;

/// Why the exact walk was abandoned.
#[derive(Debug, Clone, PartialEq)]
enum WalkFailure {
    NonManifold { edge: u32, faces: usize },
    Dangling { edges: usize },
    Crossing { first: usize, second: usize },
}

impl WalkFailure {
    fn kind(&self) -> DiagnosticKind {
        match self {
            WalkFailure::NonManifold { .. } => DiagnosticKind::ManifoldViolation,
            WalkFailure::Dangling { .. } => DiagnosticKind::DanglingEdges,
            WalkFailure::Crossing { .. } => DiagnosticKind::SelfIntersectingSlice,
        }
    }

    fn message(&self) -> String {
        match self {
            WalkFailure::NonManifold { edge, faces } => {
                format!("crossed edge {edge} has {faces} faces")
            }
            WalkFailure::Dangling { edges } => format!("open walk of {edges} edges"),
            WalkFailure::Crossing { first, second } => {
                format!("walked loops {first} and {second} meet")
            }
        }
    }
}

/// Slices a mesh at height `z`.
///
/// Returns loops sorted by descending area, oriented by nesting parity.
///
/// # Errors
///
/// Returns [`SliceError`](crate::SliceError) when `params` are invalid.
///
/// # Example
///
/// ```rust
/// use slice_kernel::{slice, Diagnostics, Mesh, SliceParams};
/// use slice_kernel::geometry::{area, is_widdershins};
/// use glam::DVec3;
///
/// let cube = Mesh::cuboid(DVec3::splat(-1.0), DVec3::splat(1.0), true).unwrap();
/// let mut diagnostics = Diagnostics::new();
/// let loops = slice(&cube, 0.0, &SliceParams::new(0.05), &mut diagnostics).unwrap();
/// assert_eq!(loops.len(), 1);
/// assert_eq!(loops[0].len(), 4);
/// assert!(is_widdershins(&loops[0]));
/// assert!((area(&loops[0]) - 4.0).abs() < 1e-9);
/// ```
pub fn slice(
    mesh: &Mesh,
    z: f64,
    params: &SliceParams,
    diagnostics: &mut Diagnostics,
) -> SliceResult<Vec<Loop>> {
    params.validate()?;
    let crossed = mesh.edges_crossing(z);
    if crossed.is_empty() {
        return Ok(Vec::new());
    }

    if params.assume_manifold {
        let channel = params.config.simplify_channel_ratio * params.import_radius;
        match walk_loops(mesh, z, &crossed) {
            Ok(loops) => {
                let loops = loops
                    .into_iter()
                    .map(|points| simplify_loop(&points, channel))
                    .collect();
                return Ok(orient_by_nesting(loops));
            }
            Err(failure) => {
                diagnostics.report(failure.kind(), Some(z), failure.message());
            }
        }
    }

    debug!(z, edges = crossed.len(), "reconstructing slice");
    reconstruct_slice(mesh, z, &crossed, params)
}

// =============================================================================
// EXACT WALK
// =============================================================================

/// Chains crossed edges through shared faces into closed loops.
fn walk_loops(mesh: &Mesh, z: f64, crossed: &[u32]) -> Result<Vec<Loop>, WalkFailure> {
    let edges = mesh.edges();
    if let Some(&edge) = crossed
        .iter()
        .find(|&&edge| edges[edge as usize].faces.len() != 2)
    {
        return Err(WalkFailure::NonManifold {
            edge,
            faces: edges[edge as usize].faces.len(),
        });
    }

    let mut pending = vec![false; edges.len()];
    for &edge in crossed {
        pending[edge as usize] = true;
    }

    let mut loops: Vec<Loop> = Vec::new();
    for &start in crossed {
        if !pending[start as usize] {
            continue;
        }
        pending[start as usize] = false;
        let mut walked = vec![start];
        let mut current = start;
        while let Some(next) = continuation(mesh, current, &pending) {
            pending[next as usize] = false;
            walked.push(next);
            current = next;
        }
        if walked.len() < 3 || !shares_face(mesh, current, start) {
            return Err(WalkFailure::Dangling {
                edges: walked.len(),
            });
        }
        let points: Loop = walked.iter().map(|&edge| mesh.edge_point_at(edge, z)).collect();
        // a plane touching a lowest vertex walks around a single point
        if area(&points) > EPSILON {
            loops.push(points);
        }
    }

    for first in 0..loops.len() {
        for second in (first + 1)..loops.len() {
            if loops_cross(&loops[first], &loops[second]) {
                return Err(WalkFailure::Crossing { first, second });
            }
        }
    }
    Ok(loops)
}

/// A pending edge sharing a face with `edge`.
fn continuation(mesh: &Mesh, edge: u32, pending: &[bool]) -> Option<u32> {
    mesh.edges()[edge as usize]
        .faces
        .iter()
        .flat_map(|&face| mesh.faces()[face as usize].edges)
        .find(|&other| other != edge && pending[other as usize])
}

fn shares_face(mesh: &Mesh, a: u32, b: u32) -> bool {
    let faces = &mesh.edges()[b as usize].faces;
    mesh.edges()[a as usize]
        .faces
        .iter()
        .any(|face| faces.contains(face))
}

// =============================================================================
// RECONSTRUCTION FALLBACK
// =============================================================================

/// Rebuilds the slice from crossed edge points and same-face chords.
fn reconstruct_slice(
    mesh: &Mesh,
    z: f64,
    crossed: &[u32],
    params: &SliceParams,
) -> SliceResult<Vec<Loop>> {
    let mut point_of = vec![None; mesh.edge_count()];
    let mut corners: Vec<Point2> = Vec::with_capacity(crossed.len());
    for &edge in crossed {
        let point = mesh.edge_point_at(edge, z);
        point_of[edge as usize] = Some(point);
        corners.push(point);
    }

    let mut samples = Vec::new();
    for face in mesh.faces() {
        let points: Vec<Point2> = face
            .edges
            .iter()
            .filter_map(|&edge| point_of[edge as usize])
            .collect();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                samples.extend(chord_samples(
                    points[i],
                    points[j],
                    params.import_radius,
                    params.config.densify_threshold,
                ));
            }
        }
    }

    reconstruct_with(
        &samples,
        &corners,
        params.import_radius,
        true,
        &params.config,
    )
}
