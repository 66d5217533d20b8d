use proptest::prelude::*;
use tracktools_core::{
    Angle, ArcSegment, GeometryError, LayerId, NetRef, Point, Segment, StraightSegment, Track,
};

fn straight(start: Point, end: Point) -> StraightSegment {
    StraightSegment::new(start, end, 200, LayerId::F_CU, NetRef::from("SIG"))
}

#[test]
fn test_straight_length_and_perpendicular() {
    let seg = straight(Point::new(0, 0), Point::new(3000, 4000));
    assert_eq!(seg.length(), 5000.0);

    let (sin, cos) = seg.perpendicular_ratios().unwrap();
    assert!((sin + 0.8).abs() < 1e-12);
    assert!((cos - 0.6).abs() < 1e-12);
}

#[test]
fn test_zero_length_has_no_perpendicular() {
    let seg = straight(Point::new(5, 5), Point::new(5, 5));
    assert!(seg.is_degenerate());
    assert!(seg.perpendicular_ratios().is_none());
}

#[test]
fn test_arc_endpoints() {
    let arc = ArcSegment::new(
        Point::new(1000, 1000),
        500,
        100,
        Angle::from_degrees(0.0),
        Angle::from_degrees(90.0),
        LayerId::B_CU,
        NetRef::unconnected(),
    );
    assert_eq!(arc.start_point(), Point::new(1500, 1000));
    assert_eq!(arc.end_point(), Point::new(1000, 1500));
    assert!((arc.length() - 500.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    assert!(!arc.is_degenerate());
}

#[test]
fn test_arc_span_below_a_tenth_is_degenerate() {
    let arc = ArcSegment::new(
        Point::new(0, 0),
        500,
        100,
        Angle::from_degrees(10.0),
        Angle::from_degrees(0.04),
        LayerId::F_CU,
        NetRef::unconnected(),
    );
    assert!(arc.is_degenerate());
}

#[test]
fn test_arc_angle_checks() {
    let mut arc = ArcSegment::new(
        Point::new(0, 0),
        500,
        100,
        Angle::from_degrees(-90.0),
        Angle::from_degrees(-360.0),
        LayerId::F_CU,
        NetRef::unconnected(),
    );
    assert!(arc.check_angles().is_ok());

    arc.angular_span = Angle::from_degrees(-360.1);
    assert_eq!(
        arc.check_angles(),
        Err(GeometryError::InvalidArcAngle {
            center: Point::new(0, 0),
            start: -90.0,
            span: -360.1,
        })
    );

    arc.angular_span = Angle::from_degrees(45.0);
    arc.start_angle = Angle::from_degrees(f64::NEG_INFINITY);
    assert!(arc.check_angles().is_err());
}

#[test]
fn test_arc_with_bad_span_deserializes_and_fails_the_check() {
    let json = r#"{
        "center": {"x": 0, "y": 0},
        "radius": 500,
        "width": 100,
        "start_angle": 0.0,
        "angular_span": -1e300,
        "layer": 0
    }"#;
    let arc: ArcSegment = serde_json::from_str(json).unwrap();
    assert!(matches!(
        arc.check_angles(),
        Err(GeometryError::InvalidArcAngle { .. })
    ));
}

#[test]
fn test_segment_accessors_and_serde_tag() {
    let track = Track::new(straight(Point::new(0, 0), Point::new(100, 0)));
    assert_eq!(track.segment.width(), 200);
    assert_eq!(track.segment.layer(), LayerId::F_CU);
    assert_eq!(track.segment.net().name(), "SIG");
    assert_eq!(track.segment.kind_name(), "track");

    let json = serde_json::to_value(&track.segment).unwrap();
    assert_eq!(json["kind"], "straight");
    let back: Segment = serde_json::from_value(json).unwrap();
    assert_eq!(back, track.segment);
}

proptest! {
    #[test]
    fn prop_perpendicular_is_unit_and_orthogonal(
        x0 in -1_000_000i64..1_000_000,
        y0 in -1_000_000i64..1_000_000,
        dx in -1_000_000i64..1_000_000,
        dy in -1_000_000i64..1_000_000,
    ) {
        prop_assume!(dx != 0 || dy != 0);
        let seg = straight(Point::new(x0, y0), Point::new(x0 + dx, y0 + dy));
        let (sin, cos) = seg.perpendicular_ratios().unwrap();
        prop_assert!((sin.hypot(cos) - 1.0).abs() < 1e-9);
        let dot = sin * dx as f64 + cos * dy as f64;
        prop_assert!(dot.abs() / seg.length() < 1e-9);
    }
}
