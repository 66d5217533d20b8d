use tempfile::tempdir;
use tracktools_board::{Board, BoardError, Zone};
use tracktools_core::{
    from_mm, ItemId, LayerId, NetRef, Point, StraightSegment, ViaPreset,
};

#[test]
fn test_board_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");

    let mut board = Board::with_copper_layers(4);
    let id = board.add_track(StraightSegment::new(
        Point::new(0, 0),
        Point::new(from_mm(5.0), from_mm(5.0)),
        from_mm(0.25),
        LayerId::inner(1),
        NetRef::from("SIG"),
    ));
    board.set_selected(id, true).unwrap();
    board.zones.push(Zone {
        id: ItemId::new(),
        net: NetRef::from("GND"),
        layer: LayerId::B_CU,
        local_clearance: from_mm(0.3),
        outline: vec![Point::new(0, 0), Point::new(10, 0), Point::new(10, 10)],
    });
    board.via_presets = vec![ViaPreset::new(0, 0), ViaPreset::new(from_mm(0.8), from_mm(0.4))];

    board.save_to_file(&path).unwrap();
    let loaded = Board::load_from_file(&path).unwrap();
    assert_eq!(loaded, board);
    assert!(loaded.has_selection());
}

#[test]
fn test_minimal_board_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(
        &path,
        r#"{
            "copper_layers": [0, 2],
            "tracks": [{
                "track": {
                    "id": "6f1c1d5e-6b7a-4a43-9a53-3c5e0f6a2b11",
                    "segment": {
                        "kind": "straight",
                        "start": {"x": 0, "y": 0},
                        "end": {"x": 1000000, "y": 0},
                        "width": 200000,
                        "layer": 0
                    }
                },
                "selected": true
            }]
        }"#,
    )
    .unwrap();

    let board = Board::load_from_file(&path).unwrap();
    assert_eq!(board.selected_tracks().len(), 1);
    assert!(board.selected_tracks()[0].segment.net().is_unconnected());
    assert!(board.vias.is_empty());
}

#[test]
fn test_malformed_board_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Board::load_from_file(&path),
        Err(BoardError::Json(_))
    ));
    assert!(matches!(
        Board::load_from_file(&dir.path().join("missing.json")),
        Err(BoardError::Io(_))
    ));
}
