//! # Slice Kernel
//!
//! Geometry kernel of a layer-by-layer manufacturing slicer. Turns triangle
//! meshes and CSG trees into stacks of oriented 2D loops.
//!
//! ## Architecture
//!
//! ```text
//! Mesh / CsgNode → slice (edge walk | reconstruction) → combine → sequence → LoopLayer
//! ```
//!
//! ## Algorithms
//!
//! - **Plane slicing**: crossed edges are chained through shared faces; a
//!   mesh that is not cleanly manifold at the cut falls back to reconstruction
//! - **Circle-intersection reconstruction**: boundaries are rebuilt from
//!   point samples as the envelope of equal circles around them
//! - **Offsets**: insets and outsets use the same circle envelope
//! - **Booleans**: per-layer union, intersection and difference of loop sets
//!
//! ## Orientation
//!
//! Every returned loop set is sorted by descending area. Loops at even
//! nesting depth (outer boundaries) run counter-clockwise and loops at odd
//! depth (holes) run clockwise.
//!
//! ## Usage
//!
//! ```rust
//! use slice_kernel::{sequence, Diagnostics, Mesh, SequenceParams};
//! use glam::DVec3;
//!
//! let cube = Mesh::cuboid(DVec3::splat(0.0), DVec3::splat(2.0), true).unwrap();
//! let mut diagnostics = Diagnostics::new();
//! let layers = sequence(&cube, &SequenceParams::new(0.5), &mut diagnostics).unwrap();
//! assert_eq!(layers.len(), 4);
//! ```

pub mod diagnostics;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod params;
pub mod source;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{SliceError, SliceResult};
pub use mesh::Mesh;
pub use ops::{
    combine, combine_with, offset, offset_with, reconstruct, reconstruct_with, sequence, slice,
    CsgNode, CsgOp, LoopLayer,
};
pub use params::{SequenceParams, SliceParams};
pub use source::LoopSource;
