use crate::units::Coord;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A board position in internal units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        dx.hypot(dy)
    }

    /// Exact squared distance; `i128` so board-sized deltas never overflow.
    pub fn distance_squared_to(&self, other: &Point) -> i128 {
        let dx = (self.x - other.x) as i128;
        let dy = (self.y - other.y) as i128;
        dx * dx + dy * dy
    }

    /// Point at `radius` from `self` in direction `radians`, rounded half-to-even.
    pub fn polar_rounded(&self, radius: f64, radians: f64) -> Point {
        Point::new(
            self.x + (radius * radians.cos()).round_ties_even() as Coord,
            self.y + (radius * radians.sin()).round_ties_even() as Coord,
        )
    }

    /// Point at `radius` from `self` in direction `radians`, truncated toward zero.
    pub fn polar_truncated(&self, radius: f64, radians: f64) -> Point {
        Point::new(
            self.x + (radius * radians.cos()) as Coord,
            self.y + (radius * radians.sin()) as Coord,
        )
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
