//! # Bucket Grid
//!
//! Spatial hashing of circle nodes for neighbourhood queries.
//!
//! Positions are hashed into square cells; a query visits the 3x3 block of
//! cells around the query point, so any item closer than one cell size to it
//! is always returned. The grid lives for a single reconstruction.

use crate::geometry::Point2;
use std::collections::HashMap;

/// 2D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellCoord {
    x: i64,
    y: i64,
}

impl CellCoord {
    /// Creates a cell coordinate from a position.
    fn from_position(position: Point2, cell_size: f64) -> Self {
        Self {
            x: (position.x / cell_size).floor() as i64,
            y: (position.y / cell_size).floor() as i64,
        }
    }
}

/// Hash grid mapping cells to item indices.
#[derive(Debug, Clone)]
pub(crate) struct BucketGrid {
    grid: HashMap<CellCoord, Vec<usize>>,
    cell_size: f64,
}

impl BucketGrid {
    /// Creates an empty grid with square cells of `cell_size`.
    pub(crate) fn new(cell_size: f64) -> Self {
        Self {
            grid: HashMap::new(),
            cell_size,
        }
    }

    /// Files `index` under the cell containing `position`.
    pub(crate) fn insert(&mut self, position: Point2, index: usize) {
        self.grid
            .entry(CellCoord::from_position(position, self.cell_size))
            .or_default()
            .push(index);
    }

    /// Indices filed in the 3x3 block of cells around `position`.
    pub(crate) fn neighbours(&self, position: Point2) -> impl Iterator<Item = usize> + '_ {
        let center = CellCoord::from_position(position, self.cell_size);
        (-1..=1)
            .flat_map(move |dx| (-1..=1).map(move |dy| (dx, dy)))
            .filter_map(move |(dx, dy)| {
                self.grid.get(&CellCoord {
                    x: center.x + dx,
                    y: center.y + dy,
                })
            })
            .flatten()
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbours_cover_adjacent_cells() {
        let mut grid = BucketGrid::new(1.0);
        grid.insert(Point2::new(0.1, 0.1), 0);
        grid.insert(Point2::new(0.9, 0.9), 1);
        grid.insert(Point2::new(-0.5, 1.5), 2);
        grid.insert(Point2::new(5.0, 5.0), 3);

        let mut found: Vec<usize> = grid.neighbours(Point2::new(0.5, 0.5)).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1, 2]);
    }

    #[test]
    fn test_close_items_always_found() {
        let mut grid = BucketGrid::new(2.0);
        grid.insert(Point2::new(1.99, 0.0), 7);
        let found: Vec<usize> = grid.neighbours(Point2::new(2.01, 0.0)).collect();
        assert_eq!(found, vec![7]);
    }
}
