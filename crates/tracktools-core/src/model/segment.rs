use super::{Angle, ItemId, LayerId, NetRef, Point};
use crate::error::GeometryError;
use crate::units::Coord;
use serde::{Deserialize, Serialize};

/// Straight copper track between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StraightSegment {
    pub start: Point,
    pub end: Point,
    pub width: Coord,
    pub layer: LayerId,
    #[serde(default)]
    pub net: NetRef,
}

impl StraightSegment {
    pub fn new(start: Point, end: Point, width: Coord, layer: LayerId, net: NetRef) -> Self {
        debug_assert!(width > 0, "track width must be positive, got {width}");
        Self {
            start,
            end,
            width,
            layer,
            net,
        }
    }

    /// `end - start`
    pub fn delta(&self) -> Point {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }

    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Unit perpendicular `(sin, cos)` ratios of the segment direction.
    ///
    /// `sin = -dy / length`, `cos = dx / length`; `None` for a zero-length segment.
    pub fn perpendicular_ratios(&self) -> Option<(f64, f64)> {
        if self.is_degenerate() {
            return None;
        }
        let length = self.length();
        let d = self.delta();
        Some((-(d.y as f64) / length, d.x as f64 / length))
    }
}

/// Circular-arc copper track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSegment {
    pub center: Point,
    pub radius: Coord,
    pub width: Coord,
    pub start_angle: Angle,
    /// Signed sweep; negative spans run clockwise in board coordinates.
    pub angular_span: Angle,
    pub layer: LayerId,
    #[serde(default)]
    pub net: NetRef,
}

impl ArcSegment {
    pub fn new(
        center: Point,
        radius: Coord,
        width: Coord,
        start_angle: Angle,
        angular_span: Angle,
        layer: LayerId,
        net: NetRef,
    ) -> Self {
        debug_assert!(radius > 0, "arc radius must be positive, got {radius}");
        debug_assert!(width > 0, "track width must be positive, got {width}");
        Self {
            center,
            radius,
            width,
            start_angle,
            angular_span,
            layer,
            net,
        }
    }

    pub fn end_angle(&self) -> Angle {
        self.start_angle + self.angular_span
    }

    pub fn start_point(&self) -> Point {
        self.center
            .polar_rounded(self.radius as f64, self.start_angle.as_radians())
    }

    pub fn end_point(&self) -> Point {
        self.center
            .polar_rounded(self.radius as f64, self.end_angle().as_radians())
    }

    /// Centerline length
    pub fn length(&self) -> f64 {
        self.radius as f64 * self.angular_span.as_radians().abs()
    }

    /// True when the span rounds to zero tenths of a degree
    pub fn is_degenerate(&self) -> bool {
        self.angular_span.as_tenths() == 0
    }

    /// Both angles must be finite and the span at most one full turn.
    ///
    /// Board files are not checked on load, so every builder runs this
    /// before sweeping the arc.
    pub fn check_angles(&self) -> Result<(), GeometryError> {
        let start = self.start_angle.as_degrees();
        let span = self.angular_span.as_degrees();
        if start.is_finite() && span.is_finite() && span.abs() <= 360.0 {
            Ok(())
        } else {
            Err(GeometryError::InvalidArcAngle {
                center: self.center,
                start,
                span,
            })
        }
    }
}

/// A track segment of either shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Straight(StraightSegment),
    Arc(ArcSegment),
}

impl Segment {
    pub fn width(&self) -> Coord {
        match self {
            Segment::Straight(s) => s.width,
            Segment::Arc(a) => a.width,
        }
    }

    pub fn layer(&self) -> LayerId {
        match self {
            Segment::Straight(s) => s.layer,
            Segment::Arc(a) => a.layer,
        }
    }

    pub fn net(&self) -> &NetRef {
        match self {
            Segment::Straight(s) => &s.net,
            Segment::Arc(a) => &a.net,
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Segment::Straight(s) => s.length(),
            Segment::Arc(a) => a.length(),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Segment::Straight(_) => "track",
            Segment::Arc(_) => "arc",
        }
    }
}

impl From<StraightSegment> for Segment {
    fn from(segment: StraightSegment) -> Self {
        Segment::Straight(segment)
    }
}

impl From<ArcSegment> for Segment {
    fn from(segment: ArcSegment) -> Self {
        Segment::Arc(segment)
    }
}

/// A segment as it lives on the board, with its document identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: ItemId,
    pub segment: Segment,
}

impl Track {
    pub fn new(segment: impl Into<Segment>) -> Self {
        Self {
            id: ItemId::new(),
            segment: segment.into(),
        }
    }
}
