//! Vertex height buckets that keep slice planes off mesh vertices.

use config::constants::ZONE_INTERVAL_DIVISOR;
use std::collections::HashSet;

/// Occupied z buckets of a solid.
///
/// A slice plane through a vertex is degenerate; [`ZoneTable::empty_z`] moves
/// a requested height to the nearest bucket that holds no vertex.
///
/// # Example
///
/// ```rust
/// use slice_kernel::ops::layers::ZoneTable;
///
/// let zones = ZoneTable::from_vertices(&[0.0, 1.0], 0.4);
/// assert_ne!(zones.empty_z(1.0), 1.0);
/// assert_eq!(zones.empty_z(0.5), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTable {
    interval: f64,
    occupied: HashSet<i64>,
}

impl ZoneTable {
    /// Buckets every vertex height at
    /// `layer_thickness / sqrt(vertex count) / ZONE_INTERVAL_DIVISOR`.
    pub fn from_vertices(heights: &[f64], layer_thickness: f64) -> Self {
        let count = heights.len().max(1) as f64;
        let interval = layer_thickness / count.sqrt() / ZONE_INTERVAL_DIVISOR;
        let mut occupied = HashSet::with_capacity(2 * heights.len());
        for &z in heights {
            let zone = z / interval;
            occupied.insert(zone.floor() as i64);
            occupied.insert(zone.ceil() as i64);
        }
        Self { interval, occupied }
    }

    /// Bucket width.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Number of occupied buckets.
    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }

    /// Returns `z` when its bucket is free, otherwise the centre of the
    /// nearest free bucket, searching below before above.
    pub fn empty_z(&self, z: f64) -> f64 {
        let zone = (z / self.interval).round() as i64;
        if !self.occupied.contains(&zone) {
            return z;
        }
        for step in 1..=(self.occupied.len() as i64 + 1) {
            let below = zone - step;
            if !self.occupied.contains(&below) {
                return below as f64 * self.interval;
            }
            let above = zone + step;
            if !self.occupied.contains(&above) {
                return above as f64 * self.interval;
            }
        }
        z
    }
}
