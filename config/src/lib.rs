//! # Config Crate
//!
//! Centralized configuration constants for the layer slicing kernel.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, KernelConfig};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 0.00000000001; // 1e-11, smaller than EPSILON (1e-10)
//! assert!(value.abs() < EPSILON);
//!
//! // Override a single reconstruction tunable
//! let config = KernelConfig {
//!     overlap_ratio: 0.2,
//!     ..KernelConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Overridable**: Empirical tunables travel in [`constants::KernelConfig`]
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
