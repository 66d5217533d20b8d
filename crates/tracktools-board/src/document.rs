//! Board document
//!
//! A minimal PCB document: copper layers, tracks with a selection flag,
//! filled polygons, vias, zones and via size presets. Stored as JSON.

use crate::error::{BoardError, BoardResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use tracktools_core::{
    Coord, ItemId, LayerId, NetRef, OutlinePolygon, Point, Segment, Track, ViaPreset, ViaSpec,
};
use tracktools_settings::{FenceDialogContext, ZoneClearance};

/// A track on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardTrack {
    pub track: Track,
    #[serde(default)]
    pub selected: bool,
}

impl BoardTrack {
    pub fn id(&self) -> ItemId {
        self.track.id
    }
}

/// A filled, zero-stroke polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilledPolygon {
    pub id: ItemId,
    pub outline: OutlinePolygon,
}

impl FilledPolygon {
    pub fn new(outline: OutlinePolygon) -> Self {
        Self {
            id: ItemId::new(),
            outline,
        }
    }
}

/// A via on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardVia {
    pub id: ItemId,
    pub via: ViaSpec,
}

impl BoardVia {
    pub fn new(via: ViaSpec) -> Self {
        Self {
            id: ItemId::new(),
            via,
        }
    }
}

/// A copper zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ItemId,
    #[serde(default)]
    pub net: NetRef,
    pub layer: LayerId,
    /// Zone-specific clearance in board units
    #[serde(default)]
    pub local_clearance: Coord,
    #[serde(default)]
    pub outline: Vec<Point>,
}

/// Any item an edit can add or remove
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardItem {
    Track(BoardTrack),
    Polygon(FilledPolygon),
    Via(BoardVia),
}

impl BoardItem {
    pub fn id(&self) -> ItemId {
        match self {
            Self::Track(t) => t.id(),
            Self::Polygon(p) => p.id,
            Self::Via(v) => v.id,
        }
    }
}

/// In-memory board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Board {
    /// Enabled copper layers, front first and back last
    pub copper_layers: Vec<LayerId>,
    pub tracks: Vec<BoardTrack>,
    pub polygons: Vec<FilledPolygon>,
    pub vias: Vec<BoardVia>,
    pub zones: Vec<Zone>,
    pub via_presets: Vec<ViaPreset>,
}

impl Board {
    /// Empty two-layer board
    pub fn new() -> Self {
        Self::with_copper_layers(2)
    }

    /// Empty board with `count` copper layers (at least two)
    pub fn with_copper_layers(count: usize) -> Self {
        let inner = count.saturating_sub(2).min(u8::MAX as usize / 2 - 1);
        let mut copper_layers = vec![LayerId::F_CU];
        copper_layers.extend((1..=inner as u8).map(LayerId::inner));
        copper_layers.push(LayerId::B_CU);
        Self {
            copper_layers,
            ..Self::default()
        }
    }

    pub fn load_from_file(path: &Path) -> BoardResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let board: Self = serde_json::from_str(&content)?;
        debug!(
            path = %path.display(),
            tracks = board.tracks.len(),
            vias = board.vias.len(),
            "Loaded board"
        );
        Ok(board)
    }

    pub fn save_to_file(&self, path: &Path) -> BoardResult<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "Saved board");
        Ok(())
    }

    /// Adds an unselected track and returns its id
    pub fn add_track(&mut self, segment: impl Into<Segment>) -> ItemId {
        let track = Track::new(segment);
        let id = track.id;
        self.tracks.push(BoardTrack {
            track,
            selected: false,
        });
        id
    }

    pub fn track(&self, id: ItemId) -> Option<&BoardTrack> {
        self.tracks.iter().find(|t| t.id() == id)
    }

    pub(crate) fn track_mut(&mut self, id: ItemId) -> Option<&mut BoardTrack> {
        self.tracks.iter_mut().find(|t| t.id() == id)
    }

    pub fn set_selected(&mut self, id: ItemId, selected: bool) -> BoardResult<()> {
        if let Some(track) = self.track_mut(id) {
            track.selected = selected;
            return Ok(());
        }
        if self.contains(id) {
            Err(BoardError::NotATrack(id))
        } else {
            Err(BoardError::UnknownItem(id))
        }
    }

    pub fn select_all_tracks(&mut self) {
        for track in &mut self.tracks {
            track.selected = true;
        }
    }

    /// Selected tracks in board order
    pub fn selected_tracks(&self) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.selected)
            .map(|t| t.track.clone())
            .collect()
    }

    pub fn has_selection(&self) -> bool {
        self.tracks.iter().any(|t| t.selected)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.tracks.iter().any(|t| t.id() == id)
            || self.polygons.iter().any(|p| p.id == id)
            || self.vias.iter().any(|v| v.id == id)
    }

    /// Tracks, polygons and vias
    pub fn item_count(&self) -> usize {
        self.tracks.len() + self.polygons.len() + self.vias.len()
    }

    pub fn via_positions(&self) -> impl Iterator<Item = Point> + '_ {
        self.vias.iter().map(|v| v.via.position)
    }

    /// Facts the fence dialog is built from
    pub fn fence_dialog_context(&self) -> FenceDialogContext {
        FenceDialogContext {
            copper_layers: self.copper_layers.clone(),
            zones: self
                .zones
                .iter()
                .map(|z| ZoneClearance {
                    net: z.net.clone(),
                    clearance: z.local_clearance,
                })
                .collect(),
            via_presets: self.via_presets.clone(),
            has_selection: self.has_selection(),
        }
    }

    pub(crate) fn take_item(&mut self, id: ItemId) -> Option<BoardItem> {
        if let Some(i) = self.tracks.iter().position(|t| t.id() == id) {
            return Some(BoardItem::Track(self.tracks.remove(i)));
        }
        if let Some(i) = self.polygons.iter().position(|p| p.id == id) {
            return Some(BoardItem::Polygon(self.polygons.remove(i)));
        }
        if let Some(i) = self.vias.iter().position(|v| v.id == id) {
            return Some(BoardItem::Via(self.vias.remove(i)));
        }
        None
    }

    pub(crate) fn insert_item(&mut self, item: BoardItem) {
        match item {
            BoardItem::Track(t) => self.tracks.push(t),
            BoardItem::Polygon(p) => self.polygons.push(p),
            BoardItem::Via(v) => self.vias.push(v),
        }
    }
}
