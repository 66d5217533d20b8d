use tracktools_camtools::square_track::{build_outline, SquareTrackGenerator};
use tracktools_core::{
    from_mm, Angle, ArcSegment, GeometryError, LayerId, NetRef, Point, StraightSegment, Track,
};

fn straight(start: Point, end: Point, width: i64) -> StraightSegment {
    StraightSegment::new(start, end, width, LayerId::F_CU, NetRef::from("SIG"))
}

#[test]
fn test_reference_rectangle() {
    let outline = build_outline(&straight(Point::new(0, 0), Point::new(10_000, 0), 200).into())
        .expect("outline");
    assert_eq!(outline.vertex_count(), 4);
    assert_eq!(
        outline.points,
        vec![
            Point::new(0, -100),
            Point::new(0, 100),
            Point::new(10_000, 100),
            Point::new(10_000, -100),
        ]
    );
    assert_eq!(outline.area(), 10_000.0 * 200.0);
}

#[test]
fn test_diagonal_edges() {
    let seg = straight(Point::new(0, 0), Point::new(from_mm(3.0), from_mm(4.0)), from_mm(0.25));
    let outline = build_outline(&seg.clone().into()).unwrap();
    let p = &outline.points;

    // Long edges are translated copies of the centerline
    assert_eq!(p[1].distance_to(&p[2]), seg.length());
    assert_eq!(p[3].distance_to(&p[0]), seg.length());
    // Short edges span the full width
    assert!((p[0].distance_to(&p[1]) - from_mm(0.25) as f64).abs() <= 1.5);
}

#[test]
fn test_quarter_arc_vertex_count() {
    let arc = ArcSegment::new(
        Point::new(from_mm(20.0), from_mm(20.0)),
        from_mm(5.0),
        from_mm(0.5),
        Angle::from_degrees(45.0),
        Angle::from_degrees(90.0),
        LayerId::inner(1),
        NetRef::from("CLK"),
    );
    let outline = build_outline(&arc.into()).unwrap();
    assert_eq!(outline.vertex_count(), 2 * 901);
    assert_eq!(outline.layer, LayerId::inner(1));
    assert_eq!(outline.net.name(), "CLK");
}

#[test]
fn test_arc_band_radii() {
    let center = Point::new(0, 0);
    let arc = ArcSegment::new(
        center,
        from_mm(5.0),
        from_mm(0.5),
        Angle::from_degrees(0.0),
        Angle::from_degrees(-30.0),
        LayerId::F_CU,
        NetRef::unconnected(),
    );
    let outline = build_outline(&arc.into()).unwrap();
    let (inner, outer) = outline.points.split_at(301);
    for p in inner {
        assert!((p.distance_to(&center) - from_mm(4.75) as f64).abs() <= 1.0);
    }
    for p in outer {
        assert!((p.distance_to(&center) - from_mm(5.25) as f64).abs() <= 1.0);
    }
}

#[test]
fn test_outline_is_stable_across_runs() {
    let arc = ArcSegment::new(
        Point::new(123, -456),
        from_mm(2.0),
        from_mm(0.3),
        Angle::from_degrees(17.3),
        Angle::from_degrees(133.7),
        LayerId::F_CU,
        NetRef::unconnected(),
    );
    let first = build_outline(&arc.clone().into()).unwrap();
    let second = build_outline(&arc.into()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.area(), second.area());
    assert!(first.area() > 0.0);
}

#[test]
fn test_plan_skips_degenerate_tracks_only() {
    let good_a = Track::new(straight(Point::new(0, 0), Point::new(1_000, 0), 200));
    let degenerate = Track::new(straight(Point::new(5, 5), Point::new(5, 5), 200));
    let good_b = Track::new(straight(Point::new(0, 0), Point::new(0, 1_000), 200));

    let plan = SquareTrackGenerator::new().plan(&[good_a.clone(), degenerate.clone(), good_b.clone()]);

    assert_eq!(plan.replacements.len(), 2);
    assert_eq!(plan.replacements[0].track, good_a.id);
    assert_eq!(plan.replacements[1].track, good_b.id);
    assert_eq!(plan.skipped_count(), 1);
    assert_eq!(plan.skipped[0].track, degenerate.id);
    assert!(matches!(
        plan.skipped[0].error,
        GeometryError::ZeroLengthSegment { .. }
    ));
}

#[test]
fn test_plan_serializes_skip_reason() {
    let degenerate = Track::new(straight(Point::new(5, 5), Point::new(5, 5), 200));
    let plan = SquareTrackGenerator::new().plan(&[degenerate]);
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["skipped"][0]["error"], "Zero-length segment at (5, 5)");
}

#[test]
fn test_plan_skips_arc_with_runaway_span() {
    let runaway = Track::new(ArcSegment::new(
        Point::new(0, 0),
        from_mm(5.0),
        from_mm(0.2),
        Angle::ZERO,
        Angle::from_degrees(-1e300),
        LayerId::F_CU,
        NetRef::from("SIG"),
    ));
    let good = Track::new(straight(Point::new(0, 0), Point::new(1_000, 0), 200));

    let plan = SquareTrackGenerator::new().plan(&[runaway.clone(), good.clone()]);

    assert_eq!(plan.replacements.len(), 1);
    assert_eq!(plan.replacements[0].track, good.id);
    assert_eq!(plan.skipped[0].track, runaway.id);
    assert!(matches!(
        plan.skipped[0].error,
        GeometryError::InvalidArcAngle { .. }
    ));
}
