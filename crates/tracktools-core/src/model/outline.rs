use super::{LayerId, NetRef, Point};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Closed single-outline filled region derived from a track
///
/// The last vertex connects back to the first; the closing vertex is not
/// repeated. Outlines are always filled with zero stroke width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlinePolygon {
    pub points: Vec<Point>,
    pub layer: LayerId,
    #[serde(default)]
    pub net: NetRef,
}

impl OutlinePolygon {
    pub fn new(points: Vec<Point>, layer: LayerId, net: NetRef) -> Self {
        Self { points, layer, net }
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn distinct_vertex_count(&self) -> usize {
        self.points.iter().collect::<HashSet<_>>().len()
    }

    /// Edges as `(from, to)` pairs including the closing edge
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Signed shoelace area in square board units; sign gives winding
    pub fn signed_area(&self) -> f64 {
        let twice: i128 = self
            .edges()
            .map(|(a, b)| a.x as i128 * b.y as i128 - b.x as i128 * a.y as i128)
            .sum();
        twice as f64 / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn perimeter(&self) -> f64 {
        self.edges().map(|(a, b)| a.distance_to(&b)).sum()
    }
}
