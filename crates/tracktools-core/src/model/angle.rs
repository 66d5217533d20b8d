use serde::{Deserialize, Serialize};

/// An angle stored in degrees.
///
/// Arc start angles and spans come from the host in degrees; the sign of a
/// span gives the sweep direction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { degrees: 0.0 };

    pub const fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    pub fn as_degrees(&self) -> f64 {
        self.degrees
    }

    pub fn as_radians(&self) -> f64 {
        self.degrees.to_radians()
    }

    /// Whole tenths of a degree, rounded half-to-even.
    pub fn as_tenths(&self) -> i64 {
        (self.degrees * 10.0).round_ties_even() as i64
    }

    pub fn abs(&self) -> Angle {
        Angle::from_degrees(self.degrees.abs())
    }
}

impl std::ops::Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_degrees(self.degrees + rhs.degrees)
    }
}
