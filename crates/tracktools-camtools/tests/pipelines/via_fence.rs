use tracktools_camtools::{FenceParameters, PositionAccumulator, ViaFenceGenerator};
use tracktools_core::{
    from_mm, Angle, ArcSegment, GeometryError, LayerId, NetRef, Point, StraightSegment, Track,
    ViaType,
};

fn params() -> FenceParameters {
    FenceParameters {
        via_diameter: from_mm(0.6),
        via_drill: from_mm(0.3),
        track_to_via_clearance: from_mm(0.1),
        via_type: ViaType::Through,
        start_layer: LayerId::F_CU,
        end_layer: LayerId::B_CU,
        net: NetRef::from("GND"),
        freely_floating_net: false,
        remove_unconnected_annular_ring: true,
    }
}

fn straight_mm(x0: f64, y0: f64, x1: f64, y1: f64) -> Track {
    Track::new(StraightSegment::new(
        Point::new(from_mm(x0), from_mm(y0)),
        Point::new(from_mm(x1), from_mm(y1)),
        from_mm(0.2),
        LayerId::F_CU,
        NetRef::from("SIG"),
    ))
}

#[test]
fn test_fence_along_straight_track() {
    let track = straight_mm(0.0, 0.0, 10.0, 0.0);
    let plan = ViaFenceGenerator::new(params()).build(&[track.clone()]);

    // 17 stations on each side, 0.625 mm apart
    assert_eq!(plan.candidate_count, 34);
    assert_eq!(plan.vias.len(), 34);
    assert_eq!(plan.deselect, vec![track.id]);
    assert!(plan.skipped.is_empty());

    assert_eq!(plan.vias[0].position, Point::new(0, -from_mm(0.5)));
    assert_eq!(plan.vias[1].position, Point::new(0, from_mm(0.5)));
    assert_eq!(plan.vias[33].position, Point::new(from_mm(10.0), from_mm(0.5)));
    for via in &plan.vias {
        assert_eq!(via.position.y.abs(), from_mm(0.5));
        assert_eq!(via.diameter, from_mm(0.6));
        assert_eq!(via.drill_diameter, from_mm(0.3));
        assert_eq!(via.net.name(), "GND");
        assert_eq!(via.via_type, ViaType::Through);
        assert!(via.remove_unconnected_annular_ring);
    }
}

#[test]
fn test_junction_duplicates_are_dropped() {
    // Straight track ending where a quarter arc begins
    let straight = straight_mm(-10.0, 0.0, 0.0, 0.0);
    let arc = Track::new(ArcSegment::new(
        Point::new(0, from_mm(5.0)),
        from_mm(5.0),
        from_mm(0.2),
        Angle::from_degrees(-90.0),
        Angle::from_degrees(90.0),
        LayerId::F_CU,
        NetRef::from("SIG"),
    ));

    let plan = ViaFenceGenerator::new(params()).build(&[straight, arc]);

    // Both arc bands start on top of the straight track's last station
    assert_eq!(plan.rejected_count(), 2);
    let at_junction = plan
        .vias
        .iter()
        .filter(|v| v.position == Point::new(0, from_mm(0.5)))
        .count();
    assert_eq!(at_junction, 1);
}

#[test]
fn test_shared_accumulator_spans_calls() {
    let generator = ViaFenceGenerator::new(params());
    let track = straight_mm(0.0, 0.0, 5.0, 0.0);

    let mut accumulator = PositionAccumulator::new();
    let first = generator.build_with(&[track.clone()], &mut accumulator);
    let second = generator.build_with(&[track], &mut accumulator);

    assert!(!first.vias.is_empty());
    assert!(second.vias.is_empty());
    assert_eq!(second.rejected_count(), second.candidate_count);
    assert_eq!(accumulator.len(), first.vias.len());
}

#[test]
fn test_fresh_build_does_not_remember_previous_runs() {
    let generator = ViaFenceGenerator::new(params());
    let tracks = [straight_mm(0.0, 0.0, 5.0, 5.0)];
    assert_eq!(generator.build(&tracks), generator.build(&tracks));
}

#[test]
fn test_seeded_positions_suppress_candidates() {
    let generator = ViaFenceGenerator::new(params());
    let track = straight_mm(0.0, 0.0, 10.0, 0.0);

    let mut accumulator = PositionAccumulator::new();
    accumulator.seed([Point::new(0, from_mm(0.5))]);
    let plan = generator.build_with(&[track], &mut accumulator);

    assert_eq!(plan.candidate_count, 34);
    assert_eq!(plan.vias.len(), 33);
    assert!(plan
        .vias
        .iter()
        .all(|v| v.position != Point::new(0, from_mm(0.5))));
}

#[test]
fn test_degenerate_track_is_reported_not_fatal() {
    let good = straight_mm(0.0, 0.0, 2.0, 0.0);
    let zero = straight_mm(1.0, 1.0, 1.0, 1.0);
    let flat_arc = Track::new(ArcSegment::new(
        Point::new(0, 0),
        from_mm(3.0),
        from_mm(0.2),
        Angle::from_degrees(10.0),
        Angle::ZERO,
        LayerId::F_CU,
        NetRef::unconnected(),
    ));

    let plan = ViaFenceGenerator::new(params()).build(&[zero.clone(), good, flat_arc.clone()]);

    assert_eq!(plan.deselect.len(), 3);
    assert_eq!(plan.skipped_count(), 2);
    assert_eq!(plan.skipped[0].track, zero.id);
    assert!(matches!(plan.skipped[0].error, GeometryError::ZeroLengthSegment { .. }));
    assert_eq!(plan.skipped[1].track, flat_arc.id);
    assert!(matches!(plan.skipped[1].error, GeometryError::ZeroSpanArc { .. }));
    // 2 mm / 0.6 mm -> 4 stations per side
    assert_eq!(plan.vias.len(), 8);
}

#[test]
fn test_tight_arc_fences_outside_only() {
    let arc = Track::new(ArcSegment::new(
        Point::new(0, 0),
        from_mm(0.3),
        from_mm(0.2),
        Angle::ZERO,
        Angle::from_degrees(180.0),
        LayerId::F_CU,
        NetRef::unconnected(),
    ));
    let plan = ViaFenceGenerator::new(params()).build(&[arc]);

    assert!(!plan.vias.is_empty());
    for via in &plan.vias {
        let r = via.position.distance_to(&Point::new(0, 0));
        assert!((r - from_mm(0.8) as f64).abs() <= 2.0, "radius {r}");
    }
}

#[test]
fn test_empty_selection() {
    let plan = ViaFenceGenerator::new(params()).build(&[]);
    assert!(plan.vias.is_empty());
    assert!(plan.deselect.is_empty());
    assert_eq!(plan.candidate_count, 0);
}

#[test]
fn test_short_arc_between_tracks_is_fenced() {
    let lead_in = straight_mm(-2.0, 0.0, 0.0, 0.0);
    let kink = Track::new(ArcSegment::new(
        Point::new(0, from_mm(10.0)),
        from_mm(10.0),
        from_mm(0.2),
        Angle::from_degrees(-90.0),
        Angle::from_degrees(0.04),
        LayerId::F_CU,
        NetRef::from("SIG"),
    ));

    let plan = ViaFenceGenerator::new(params()).build(&[lead_in, kink.clone()]);

    assert!(plan.skipped.is_empty());
    assert!(plan.deselect.contains(&kink.id));
    // One station per band, both on top of the lead-in's end stations
    assert_eq!(plan.candidate_count, 2 * 4 + 2);
    assert_eq!(plan.rejected_count(), 2);
}

#[test]
fn test_runaway_arc_span_is_skipped() {
    let runaway = Track::new(ArcSegment::new(
        Point::new(0, 0),
        from_mm(5.0),
        from_mm(0.2),
        Angle::ZERO,
        Angle::from_degrees(-1e300),
        LayerId::F_CU,
        NetRef::from("SIG"),
    ));
    let good = straight_mm(0.0, 0.0, 2.0, 0.0);

    let plan = ViaFenceGenerator::new(params()).build(&[runaway.clone(), good]);

    assert_eq!(plan.skipped.len(), 1);
    assert_eq!(plan.skipped[0].track, runaway.id);
    assert!(matches!(
        plan.skipped[0].error,
        GeometryError::InvalidArcAngle { .. }
    ));
    assert_eq!(plan.vias.len(), 8);
}
