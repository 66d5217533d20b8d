//! Position Accumulator
//!
//! Keeps vias from stacking on top of each other where independently
//! sampled tracks meet, e.g. at a straight/arc junction. A candidate closer
//! than the minimum separation to any accepted position is rejected.
//!
//! The accumulator is owned by the caller and lives for one fence build.
//! It knows nothing about vias already on the board unless the caller
//! seeds it with them.

use tracktools_core::{Coord, Point};

/// Default minimum separation: 0.1 mm in board units
pub const DEFAULT_MIN_SEPARATION: Coord = 100_000;

/// Accepted positions for a single fence build
#[derive(Debug, Clone)]
pub struct PositionAccumulator {
    min_separation: Coord,
    accepted: Vec<Point>,
    seeded: usize,
}

impl PositionAccumulator {
    /// Creates an empty accumulator with the default separation
    pub fn new() -> Self {
        Self::with_min_separation(DEFAULT_MIN_SEPARATION)
    }

    /// Creates an empty accumulator with a custom separation
    pub fn with_min_separation(min_separation: Coord) -> Self {
        debug_assert!(
            min_separation >= 0,
            "min_separation must not be negative, got {min_separation}"
        );
        Self {
            min_separation,
            accepted: Vec::new(),
            seeded: 0,
        }
    }

    /// Pre-loads positions that candidates must also keep clear of.
    ///
    /// Seeds are stored unconditionally and are not reported by
    /// [`Self::accepted`].
    pub fn seed(&mut self, existing: impl IntoIterator<Item = Point>) {
        debug_assert_eq!(
            self.seeded,
            self.accepted.len(),
            "seed before accepting candidates"
        );
        self.accepted.extend(existing);
        self.seeded = self.accepted.len();
    }

    pub fn min_separation(&self) -> Coord {
        self.min_separation
    }

    /// Accepts `point` unless it lies within the minimum separation of a
    /// position already held. Returns whether it was accepted.
    pub fn try_add(&mut self, point: Point) -> bool {
        let limit = self.min_separation as i128 * self.min_separation as i128;
        if self
            .accepted
            .iter()
            .any(|stored| stored.distance_squared_to(&point) < limit)
        {
            return false;
        }
        self.accepted.push(point);
        true
    }

    /// Positions accepted through [`Self::try_add`], in acceptance order
    pub fn accepted(&self) -> &[Point] {
        &self.accepted[self.seeded..]
    }

    pub fn len(&self) -> usize {
        self.accepted.len() - self.seeded
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_points(mut self) -> Vec<Point> {
        self.accepted.split_off(self.seeded)
    }
}

impl Default for PositionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
