//! Error handling for TrackTools
//!
//! Error types shared by the geometry pipelines and their hosts:
//! - Geometry errors (degenerate or malformed segments, numeric domain guards)
//! - Parameter errors (via fence preconditions)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::model::Point;
use thiserror::Error;

/// Geometry error type
///
/// Raised per segment. A batch that hits one of these skips the offending
/// segment and keeps going with the rest of the selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Straight segment whose endpoints coincide
    #[error("Zero-length segment at ({}, {})", start.x, start.y)]
    ZeroLengthSegment {
        /// The shared start/end point.
        start: Point,
    },

    /// Arc whose span rounds to zero tenths of a degree
    #[error("Zero-span arc around ({}, {})", center.x, center.y)]
    ZeroSpanArc {
        /// The arc center.
        center: Point,
    },

    /// Outline that would not have three distinct vertices
    #[error("Outline collapsed to {distinct} distinct vertices")]
    CollapsedOutline {
        /// Number of distinct vertices left after rounding.
        distinct: usize,
    },

    /// Arc angle that is not finite, or a span beyond one full turn
    #[error("Arc around ({}, {}) has unusable angles: start {start}°, span {span}°", center.x, center.y)]
    InvalidArcAngle {
        /// The arc center.
        center: Point,
        /// Start angle in degrees.
        start: f64,
        /// Signed span in degrees.
        span: f64,
    },

    /// Inverse cosine argument outside [-1, 1]
    #[error("Inverse cosine argument {argument} outside [-1, 1]")]
    NumericDomain {
        /// The rejected argument.
        argument: f64,
    },
}

impl GeometryError {
    /// Check if this error describes degenerate input geometry
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            GeometryError::ZeroLengthSegment { .. }
                | GeometryError::ZeroSpanArc { .. }
                | GeometryError::CollapsedOutline { .. }
                | GeometryError::InvalidArcAngle { .. }
        )
    }
}

/// Parameter error type
///
/// Preconditions on via fence parameters. These are checked by the
/// configuration surface before any builder runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Via diameter/drill do not satisfy `diameter > drill > 0`
    #[error("Invalid via size: diameter {diameter}, drill {drill} (need diameter > drill > 0)")]
    InvalidViaSize {
        /// Via pad diameter in board units.
        diameter: i64,
        /// Via drill diameter in board units.
        drill: i64,
    },

    /// Start and end layer are the same
    #[error("Via layer pair uses the same layer twice: {layer}")]
    SameLayerPair {
        /// The duplicated layer id.
        layer: u8,
    },

    /// Generic invalid value
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}
