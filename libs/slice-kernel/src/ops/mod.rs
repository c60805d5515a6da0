//! # Kernel Operations
//!
//! Slicing, reconstruction, offsets, booleans and layer sequencing.

pub mod boolean;
pub mod intercircle;
pub mod layers;
pub mod offset;
pub mod slice;

pub use boolean::csg_tree::CsgNode;
pub use boolean::{combine, combine_with, CsgOp};
pub use intercircle::{reconstruct, reconstruct_with};
pub use layers::{sequence, LoopLayer};
pub use offset::{offset, offset_with};
pub use slice::slice;
