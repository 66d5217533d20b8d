use tracktools_board::{
    fence_selected_tracks, square_selected_tracks, Board, DedupSeed, EditHistory, FenceOptions,
};
use tracktools_camtools::FenceParameters;
use tracktools_core::{
    from_mm, Angle, ArcSegment, LayerId, NetRef, Point, StraightSegment, ViaType,
};

fn straight(x0: f64, y0: f64, x1: f64, y1: f64) -> StraightSegment {
    StraightSegment::new(
        Point::new(from_mm(x0), from_mm(y0)),
        Point::new(from_mm(x1), from_mm(y1)),
        from_mm(0.2),
        LayerId::F_CU,
        NetRef::from("RF"),
    )
}

fn params() -> FenceParameters {
    FenceParameters {
        via_diameter: from_mm(0.6),
        via_drill: from_mm(0.3),
        track_to_via_clearance: from_mm(0.1),
        via_type: ViaType::Through,
        start_layer: LayerId::F_CU,
        end_layer: LayerId::B_CU,
        net: NetRef::from("GND"),
        freely_floating_net: true,
        remove_unconnected_annular_ring: false,
    }
}

#[test]
fn test_square_replaces_selected_tracks_only() {
    let mut board = Board::new();
    let selected = board.add_track(straight(0.0, 0.0, 10.0, 0.0));
    let untouched = board.add_track(straight(0.0, 5.0, 10.0, 5.0));
    board.set_selected(selected, true).unwrap();

    let report = square_selected_tracks(&mut board).unwrap();

    assert_eq!(report.removed, vec![selected]);
    assert_eq!(report.created.len(), 1);
    assert_eq!(board.tracks.len(), 1);
    assert_eq!(board.tracks[0].id(), untouched);

    let polygon = &board.polygons[0];
    assert_eq!(polygon.id, report.created[0]);
    assert_eq!(polygon.outline.layer, LayerId::F_CU);
    assert_eq!(polygon.outline.net.name(), "RF");
    assert_eq!(polygon.outline.vertex_count(), 4);
}

#[test]
fn test_square_leaves_degenerate_track_selected() {
    let mut board = Board::new();
    let good = board.add_track(straight(0.0, 0.0, 1.0, 0.0));
    let zero = board.add_track(straight(2.0, 2.0, 2.0, 2.0));
    board.select_all_tracks();

    let report = square_selected_tracks(&mut board).unwrap();

    assert_eq!(report.removed, vec![good]);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].track, zero);
    assert!(board.track(zero).is_some_and(|t| t.selected));
    assert!(report.summary().ends_with("1 skipped"));
}

#[test]
fn test_square_arc_and_undo() {
    let mut board = Board::new();
    board.add_track(ArcSegment::new(
        Point::new(0, 0),
        from_mm(3.0),
        from_mm(0.3),
        Angle::ZERO,
        Angle::from_degrees(180.0),
        LayerId::B_CU,
        NetRef::unconnected(),
    ));
    board.select_all_tracks();
    let before = board.clone();

    let mut history = EditHistory::new();
    let report = square_selected_tracks(&mut board).unwrap();
    history.record(report.action, report.undo);
    assert_eq!(board.polygons[0].outline.vertex_count(), 2 * 1801);

    history.undo(&mut board).unwrap();
    assert_eq!(board, before);
}

#[test]
fn test_fence_deselects_and_adds_vias() {
    let mut board = Board::new();
    let id = board.add_track(straight(0.0, 0.0, 10.0, 0.0));
    board.set_selected(id, true).unwrap();

    let report = fence_selected_tracks(&mut board, &params(), FenceOptions::default()).unwrap();

    assert_eq!(report.created.len(), 34);
    assert_eq!(board.vias.len(), 34);
    assert!(!board.has_selection());
    assert!(board.vias.iter().all(|v| v.via.net.name() == "GND"));
}

#[test]
fn test_refence_twice_stacks_vias_by_default() {
    let mut board = Board::new();
    let id = board.add_track(straight(0.0, 0.0, 5.0, 0.0));

    board.set_selected(id, true).unwrap();
    let first = fence_selected_tracks(&mut board, &params(), FenceOptions::default()).unwrap();
    board.set_selected(id, true).unwrap();
    let second = fence_selected_tracks(&mut board, &params(), FenceOptions::default()).unwrap();

    assert_eq!(first.created.len(), second.created.len());
    assert_eq!(board.vias.len(), 2 * first.created.len());
}

#[test]
fn test_existing_vias_seed_blocks_second_row() {
    let mut board = Board::new();
    let id = board.add_track(straight(0.0, 0.0, 5.0, 0.0));
    let options = FenceOptions {
        seed: DedupSeed::ExistingVias,
        ..FenceOptions::default()
    };

    board.set_selected(id, true).unwrap();
    let first = fence_selected_tracks(&mut board, &params(), options).unwrap();
    board.set_selected(id, true).unwrap();
    let second = fence_selected_tracks(&mut board, &params(), options).unwrap();

    assert!(second.created.is_empty());
    assert_eq!(second.rejected_candidates, first.created.len());
    assert_eq!(board.vias.len(), first.created.len());
}

#[test]
fn test_fence_rejects_invalid_parameters() {
    let mut board = Board::new();
    let id = board.add_track(straight(0.0, 0.0, 5.0, 0.0));
    board.set_selected(id, true).unwrap();

    let mut bad = params();
    bad.end_layer = LayerId::F_CU;
    assert!(fence_selected_tracks(&mut board, &bad, FenceOptions::default()).is_err());
    assert!(board.vias.is_empty());
    assert!(board.has_selection());
}
