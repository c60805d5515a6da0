//! # Circle Graph
//!
//! Every sample point becomes the center of a unit circle in radius-scaled
//! space. Pairs of overlapping circles contribute their two intersection
//! points; intersections buried inside a third circle are discarded, leaving
//! only points on the envelope of the union of circles. Walking the envelope
//! intersection to intersection yields closed loops of sample points.

use super::bucket::BucketGrid;
use crate::geometry::{clockwise_quarter, Loop, Point2};
use config::constants::MERGE_EPSILON;

/// Circles are shrunk by this factor so exactly tangent samples never meet.
const CIRCLE_SHRINK: f64 = 1.000001;

// =============================================================================
// GRAPH ELEMENTS
// =============================================================================

/// A sample point and the envelope intersections that leave it.
#[derive(Debug, Clone)]
pub(crate) struct CircleNode {
    /// Point in caller coordinates.
    pub(crate) actual: Point2,
    /// Point divided by the radius.
    pub(crate) divided: Point2,
    /// Intersections whose behind node is this node.
    pub(crate) intersections: Vec<usize>,
}

/// One intersection of the circles of two nodes.
///
/// Walking from `behind` to `ahead`, the intersection lies on the clockwise
/// side of the chord between the two centers.
#[derive(Debug, Clone)]
pub(crate) struct CircleIntersection {
    pub(crate) ahead: usize,
    pub(crate) behind: usize,
    ahead_minus_behind: Point2,
    demichord: Point2,
    position_relative_to_behind: Point2,
    stepped_on: bool,
}

impl CircleIntersection {
    fn new(nodes: &[CircleNode], ahead: usize, behind: usize) -> Option<Self> {
        let ahead_minus_behind = (nodes[ahead].divided - nodes[behind].divided) * 0.5;
        let half_chord_squared = 1.0 - ahead_minus_behind.length_squared();
        let rotated = clockwise_quarter(ahead_minus_behind);
        let rotated_length = rotated.length();
        if half_chord_squared < 0.0 || rotated_length == 0.0 {
            return None;
        }
        let demichord = rotated * (half_chord_squared.sqrt() / rotated_length);
        Some(Self {
            ahead,
            behind,
            ahead_minus_behind,
            demichord,
            position_relative_to_behind: ahead_minus_behind + demichord,
            stepped_on: false,
        })
    }

    fn absolute_position(&self, nodes: &[CircleNode]) -> Point2 {
        nodes[self.behind].divided + self.position_relative_to_behind
    }

    fn is_within_other_circle(&self, nodes: &[CircleNode], grid: &BucketGrid) -> bool {
        let position = self.absolute_position(nodes);
        grid.neighbours(position).any(|index| {
            index != self.ahead
                && index != self.behind
                && nodes[index].divided.distance(position) < 1.0
        })
    }
}

// =============================================================================
// GRAPH
// =============================================================================

/// Circle nodes and their surviving envelope intersections.
#[derive(Debug, Clone)]
pub(crate) struct CircleGraph {
    nodes: Vec<CircleNode>,
    intersections: Vec<CircleIntersection>,
}

impl CircleGraph {
    /// Builds the graph of `points` at `radius`.
    ///
    /// Points closer than [`MERGE_EPSILON`] radii to an earlier point are
    /// dropped, so callers list the points that must survive first.
    pub(crate) fn new(points: &[Point2], radius: f64) -> Self {
        let one_over_radius = CIRCLE_SHRINK / radius;
        let mut nodes: Vec<CircleNode> = Vec::with_capacity(points.len());
        let mut within_grid = BucketGrid::new(1.0);

        for &actual in points {
            let divided = actual * one_over_radius;
            let duplicate = within_grid
                .neighbours(divided)
                .any(|index| nodes[index].divided.distance(divided) < MERGE_EPSILON);
            if duplicate || !divided.is_finite() {
                continue;
            }
            within_grid.insert(divided, nodes.len());
            nodes.push(CircleNode {
                actual,
                divided,
                intersections: Vec::new(),
            });
        }

        let mut intersections = Vec::new();
        let mut pair_grid = BucketGrid::new(2.0);
        for behind in 0..nodes.len() {
            let divided = nodes[behind].divided;
            let ahead_nodes: Vec<usize> = pair_grid
                .neighbours(divided)
                .filter(|&ahead| nodes[ahead].divided.distance(divided) < 2.0)
                .collect();
            for ahead in ahead_nodes {
                for (a, b) in [(ahead, behind), (behind, ahead)] {
                    let Some(intersection) = CircleIntersection::new(&nodes, a, b) else {
                        continue;
                    };
                    if !intersection.is_within_other_circle(&nodes, &within_grid) {
                        nodes[b].intersections.push(intersections.len());
                        intersections.push(intersection);
                    }
                }
            }
            pair_grid.insert(divided, behind);
        }

        Self {
            nodes,
            intersections,
        }
    }

    /// Number of nodes that survived merging.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of envelope intersections.
    pub(crate) fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    /// The unvisited intersection on the ahead node best aligned with the
    /// direction of travel.
    fn next_intersection(&self, current: usize) -> Option<usize> {
        let from = &self.intersections[current];
        let mut best = None;
        let mut largest_dot = f64::NEG_INFINITY;
        for &candidate in &self.nodes[from.ahead].intersections {
            let to = &self.intersections[candidate];
            if to.stepped_on {
                continue;
            }
            let relative_to_midpoint =
                (to.position_relative_to_behind + from.ahead_minus_behind).normalize_or_zero();
            let dot = relative_to_midpoint.dot(from.demichord);
            if dot > largest_dot {
                largest_dot = dot;
                best = Some(candidate);
            }
        }
        best
    }

    /// Walks the envelope into loops of intersection indices.
    fn intersection_loops(&mut self) -> Vec<Vec<usize>> {
        let count = self.intersections.len();
        let mut loops = Vec::new();
        for first in 0..count {
            if self.intersections[first].stepped_on {
                continue;
            }
            let mut path = vec![first];
            let mut current = first;
            // the first intersection stays unvisited so the walk can close on it
            for _ in 0..=count {
                match self.next_intersection(current) {
                    Some(next) if next != first => {
                        self.intersections[next].stepped_on = true;
                        path.push(next);
                        current = next;
                    }
                    _ => break,
                }
            }
            self.intersections[first].stepped_on = true;
            loops.push(path);
        }
        loops
    }

    /// Loops through the sample points on the envelope.
    ///
    /// The outer envelope of a boundary comes out counter-clockwise and the
    /// inner envelope clockwise.
    pub(crate) fn into_center_loops(mut self) -> Vec<Loop> {
        let loops = self.intersection_loops();
        loops
            .into_iter()
            .map(|path| {
                let mut centers: Loop = Vec::with_capacity(path.len());
                for index in path {
                    let center = self.nodes[self.intersections[index].ahead].actual;
                    if centers.last() != Some(&center) {
                        centers.push(center);
                    }
                }
                while centers.len() > 1 && centers.first() == centers.last() {
                    centers.pop();
                }
                centers
            })
            .collect()
    }
}
