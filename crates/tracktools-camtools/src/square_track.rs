//! Square Track Generator
//!
//! Replaces round-capped tracks with filled polygons whose ends are cut
//! square. Straight tracks become a four-vertex rectangle; arcs become a
//! constant-width band sampled every tenth of a degree.

use crate::report::SkippedSegment;
use serde::Serialize;
use tracing::{debug, info};
use tracktools_core::{
    ArcSegment, Coord, GeometryError, ItemId, OutlinePolygon, Point, Segment, StraightSegment,
    Track,
};

/// Build the square-ended outline of a single segment
pub fn build_outline(segment: &Segment) -> Result<OutlinePolygon, GeometryError> {
    let outline = match segment {
        Segment::Straight(s) => straight_outline(s)?,
        Segment::Arc(a) => arc_outline(a)?,
    };

    let distinct = outline.distinct_vertex_count();
    if distinct < 3 {
        return Err(GeometryError::CollapsedOutline { distinct });
    }
    Ok(outline)
}

fn straight_outline(segment: &StraightSegment) -> Result<OutlinePolygon, GeometryError> {
    let (sin_ratio, cos_ratio) =
        segment
            .perpendicular_ratios()
            .ok_or(GeometryError::ZeroLengthSegment {
                start: segment.start,
            })?;

    let half_width = segment.width as f64 / 2.0;
    let offset = Point::new(
        (half_width * sin_ratio).round_ties_even() as Coord,
        (half_width * cos_ratio).round_ties_even() as Coord,
    );

    let points = vec![
        segment.start - offset,
        segment.start + offset,
        segment.end + offset,
        segment.end - offset,
    ];
    Ok(OutlinePolygon::new(
        points,
        segment.layer,
        segment.net.clone(),
    ))
}

fn arc_outline(arc: &ArcSegment) -> Result<OutlinePolygon, GeometryError> {
    arc.check_angles()?;
    if arc.is_degenerate() {
        return Err(GeometryError::ZeroSpanArc { center: arc.center });
    }
    let span = arc.angular_span.as_tenths();
    let mut start = arc.start_angle.as_tenths();
    if !(-3600..=3600).contains(&start) {
        start = start.rem_euclid(3600);
    }
    let step = span.signum();

    let half_width = arc.width as f64 / 2.0;
    let inner = arc.radius as f64 - half_width;
    let outer = arc.radius as f64 + half_width;

    // Inclusive sweep of tenths from start to start + span
    let sweep: Vec<i64> = (0..=span.abs()).map(|i| start + i * step).collect();

    let mut points = Vec::with_capacity(sweep.len() * 2);
    points.extend(
        sweep
            .iter()
            .map(|&t| arc.center.polar_rounded(inner, tenths_to_radians(t))),
    );
    points.extend(
        sweep
            .iter()
            .rev()
            .map(|&t| arc.center.polar_rounded(outer, tenths_to_radians(t))),
    );

    Ok(OutlinePolygon::new(points, arc.layer, arc.net.clone()))
}

fn tenths_to_radians(tenths: i64) -> f64 {
    (tenths as f64 / 10.0).to_radians()
}

/// One track to delete and the polygon that takes its place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Replacement {
    pub track: ItemId,
    pub outline: OutlinePolygon,
}

/// Result of squaring a selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SquareTrackPlan {
    pub replacements: Vec<Replacement>,
    pub skipped: Vec<SkippedSegment>,
}

impl SquareTrackPlan {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Generator for square-ended track outlines
#[derive(Debug, Default, Clone, Copy)]
pub struct SquareTrackGenerator;

impl SquareTrackGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Plan the replacement of every track in the selection.
    ///
    /// Degenerate tracks are skipped and reported; the rest of the
    /// selection is still converted.
    pub fn plan(&self, tracks: &[Track]) -> SquareTrackPlan {
        let mut plan = SquareTrackPlan::default();

        for track in tracks {
            match build_outline(&track.segment) {
                Ok(outline) => {
                    debug!(
                        track = %track.id,
                        kind = track.segment.kind_name(),
                        vertices = outline.vertex_count(),
                        "Built square outline"
                    );
                    plan.replacements.push(Replacement {
                        track: track.id,
                        outline,
                    });
                }
                Err(error) => plan
                    .skipped
                    .push(SkippedSegment::record(track.id, error, "Square track")),
            }
        }

        info!(
            converted = plan.replacements.len(),
            skipped = plan.skipped.len(),
            "Square track plan ready"
        );
        plan
    }
}
