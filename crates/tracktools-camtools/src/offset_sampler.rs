//! Offset Sampler
//!
//! Produces candidate via centers running parallel to a track at a fixed
//! perpendicular offset. Station counts are derived from the via diameter:
//! one station per whole diameter of track length, and on arcs an angular
//! step whose chord is one diameter.
//!
//! Straight tracks yield two bands (one per side); arcs yield an inner and
//! an outer band. The inner band is dropped when the offset exceeds the arc
//! radius, since clearance cannot be kept inside such a tight bend.

use tracing::{debug, trace};
use tracktools_core::{ArcSegment, Coord, GeometryError, Point, Segment, StraightSegment};

/// Number of stations along a straight track of `length`
///
/// `1 + floor(length / via_diameter)`; a non-positive diameter yields one
/// station rather than dividing by zero.
pub fn straight_station_count(length: f64, via_diameter: Coord) -> usize {
    if via_diameter <= 0 || !length.is_finite() || length <= 0.0 {
        return 1;
    }
    1 + (length / via_diameter as f64).floor() as usize
}

/// Largest angular step (radians) at `radius` keeping consecutive via
/// centers within `via_diameter` of each other.
///
/// This is the law-of-cosines chord angle `acos(1 - d² / (2r²))`. The domain
/// is checked on exact integers before the inverse cosine runs, so an
/// argument outside `[-1, 1]` comes back as [`GeometryError::NumericDomain`].
pub fn max_angular_step(radius: Coord, via_diameter: Coord) -> Result<f64, GeometryError> {
    let d2 = via_diameter as i128 * via_diameter as i128;
    let r2 = radius as i128 * radius as i128;

    if r2 == 0 || d2 > 4 * r2 {
        let argument = if r2 == 0 {
            f64::NEG_INFINITY
        } else {
            1.0 - d2 as f64 / (2 * r2) as f64
        };
        return Err(GeometryError::NumericDomain { argument });
    }

    let argument = (1.0 - d2 as f64 / (2 * r2) as f64).clamp(-1.0, 1.0);
    let step = argument.acos();
    if step > 0.0 {
        Ok(step)
    } else {
        Err(GeometryError::NumericDomain { argument })
    }
}

/// Number of stations along an arc band of `radius` sweeping `span_radians`
///
/// Falls back to a single station whenever [`max_angular_step`] rejects
/// the radius/diameter pair.
pub fn arc_station_count(radius: Coord, span_radians: f64, via_diameter: Coord) -> usize {
    match max_angular_step(radius, via_diameter) {
        Ok(step) => 1 + (span_radians.abs() / step).floor() as usize,
        Err(error) => {
            trace!(radius, via_diameter, %error, "Clamping arc band to one station");
            1
        }
    }
}

/// Which band a candidate was sampled on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    /// Straight track, `start - offset` side
    Minus,
    /// Straight track, `start + offset` side
    Plus,
    /// Arc, `radius - offset`
    Inner,
    /// Arc, `radius + offset`
    Outer,
}

/// A candidate via center
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub position: Point,
    pub band: Band,
}

/// Samples candidate positions alongside a track
#[derive(Debug, Clone, Copy)]
pub struct OffsetSampler {
    via_diameter: Coord,
}

impl OffsetSampler {
    /// Create a sampler whose maximum separation is one via diameter
    pub fn new(via_diameter: Coord) -> Self {
        debug_assert!(
            via_diameter > 0,
            "via_diameter must be positive, got {via_diameter}"
        );
        Self { via_diameter }
    }

    pub fn via_diameter(&self) -> Coord {
        self.via_diameter
    }

    /// Sample candidates at `offset` from the track centerline.
    ///
    /// Straight tracks emit, per station, the minus-side point then the
    /// plus-side point. Arcs emit the whole inner band, then the outer band.
    pub fn sample(&self, segment: &Segment, offset: Coord) -> Result<Vec<Candidate>, GeometryError> {
        match segment {
            Segment::Straight(s) => self.sample_straight(s, offset),
            Segment::Arc(a) => self.sample_arc(a, offset),
        }
    }

    /// Positions only, in sampling order
    pub fn sample_points(&self, segment: &Segment, offset: Coord) -> Result<Vec<Point>, GeometryError> {
        Ok(self
            .sample(segment, offset)?
            .into_iter()
            .map(|c| c.position)
            .collect())
    }

    fn sample_straight(
        &self,
        segment: &StraightSegment,
        offset: Coord,
    ) -> Result<Vec<Candidate>, GeometryError> {
        let (sin_ratio, cos_ratio) =
            segment
                .perpendicular_ratios()
                .ok_or(GeometryError::ZeroLengthSegment {
                    start: segment.start,
                })?;

        // Truncated toward zero, like the via placement it feeds
        let shift = Point::new(
            (offset as f64 * sin_ratio) as Coord,
            (offset as f64 * cos_ratio) as Coord,
        );

        let stations = straight_station_count(segment.length(), self.via_diameter);
        let delta = segment.delta();
        debug!(
            length = segment.length(),
            stations, offset, "Sampling straight track"
        );

        let mut candidates = Vec::with_capacity(stations * 2);
        for k in 0..stations {
            let station = if stations == 1 {
                segment.start
            } else {
                segment.start + interpolate(delta, k, stations - 1)
            };
            candidates.push(Candidate {
                position: station - shift,
                band: Band::Minus,
            });
            candidates.push(Candidate {
                position: station + shift,
                band: Band::Plus,
            });
        }
        Ok(candidates)
    }

    fn sample_arc(&self, arc: &ArcSegment, offset: Coord) -> Result<Vec<Candidate>, GeometryError> {
        arc.check_angles()?;
        // Spans under a tenth of a degree still get one station per band
        if arc.angular_span.as_degrees() == 0.0 {
            return Err(GeometryError::ZeroSpanArc { center: arc.center });
        }

        let mut candidates = Vec::new();
        if offset <= arc.radius {
            self.sample_arc_band(arc, arc.radius - offset, Band::Inner, &mut candidates);
        } else {
            debug!(
                radius = arc.radius,
                offset, "Arc too tight for an inner band, sampling outer band only"
            );
        }
        self.sample_arc_band(arc, arc.radius + offset, Band::Outer, &mut candidates);
        Ok(candidates)
    }

    fn sample_arc_band(&self, arc: &ArcSegment, radius: Coord, band: Band, out: &mut Vec<Candidate>) {
        let start = arc.start_angle.as_radians();
        let span = arc.angular_span.as_radians();
        let stations = arc_station_count(radius, span, self.via_diameter);
        debug!(radius, stations, ?band, "Sampling arc band");

        out.reserve(stations);
        for k in 0..stations {
            let angle = if stations == 1 {
                start
            } else {
                start + k as f64 * span / (stations - 1) as f64
            };
            out.push(Candidate {
                position: arc.center.polar_truncated(radius as f64, angle),
                band,
            });
        }
    }
}

/// `k * delta / divisor`, componentwise with truncating integer division
fn interpolate(delta: Point, k: usize, divisor: usize) -> Point {
    let k = k as i128;
    let divisor = divisor as i128;
    Point::new(
        (k * delta.x as i128 / divisor) as Coord,
        (k * delta.y as i128 / divisor) as Coord,
    )
}
