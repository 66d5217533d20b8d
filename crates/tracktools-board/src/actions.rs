//! Board actions
//!
//! Each action reads the selected tracks, asks a generator for a plan and
//! commits the plan as a single [`BoardEdit`].

use crate::document::{Board, BoardItem, BoardVia, FilledPolygon};
use crate::edit::BoardEdit;
use crate::error::BoardResult;
use tracing::{info, warn};
use tracktools_camtools::{
    FenceParameters, PositionAccumulator, SkippedSegment, SquareTrackGenerator, ViaFenceGenerator,
    DEFAULT_MIN_SEPARATION,
};
use tracktools_core::{Coord, ItemId};
use tracktools_settings::FenceSettings;

/// What the fence deduplication starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupSeed {
    /// Only vias placed by this build are considered
    #[default]
    Empty,
    /// Vias already on the board also block new ones
    ExistingVias,
}

/// Options for [`fence_selected_tracks`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceOptions {
    pub seed: DedupSeed,
    pub min_separation: Coord,
}

impl Default for FenceOptions {
    fn default() -> Self {
        Self {
            seed: DedupSeed::Empty,
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }
}

impl From<&FenceSettings> for FenceOptions {
    fn from(settings: &FenceSettings) -> Self {
        Self {
            seed: if settings.avoid_existing_vias {
                DedupSeed::ExistingVias
            } else {
                DedupSeed::Empty
            },
            min_separation: settings.min_separation(),
        }
    }
}

/// Outcome of a board action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub action: &'static str,
    pub created: Vec<ItemId>,
    pub removed: Vec<ItemId>,
    pub skipped: Vec<SkippedSegment>,
    /// Fence candidates dropped as too close to another via
    pub rejected_candidates: usize,
    /// Edit that reverts the action
    pub undo: BoardEdit,
}

impl ActionReport {
    pub fn summary(&self) -> String {
        let mut text = format!(
            "{}: {} created, {} removed",
            self.action,
            self.created.len(),
            self.removed.len()
        );
        if self.rejected_candidates > 0 {
            text.push_str(&format!(", {} merged", self.rejected_candidates));
        }
        if !self.skipped.is_empty() {
            text.push_str(&format!(", {} skipped", self.skipped.len()));
        }
        text
    }
}

/// Replace every selected track with a square-ended filled polygon.
///
/// Degenerate tracks stay on the board, still selected.
pub fn square_selected_tracks(board: &mut Board) -> BoardResult<ActionReport> {
    let selected = board.selected_tracks();
    let plan = SquareTrackGenerator::new().plan(&selected);

    let mut edit = BoardEdit::new();
    for replacement in plan.replacements {
        edit.remove.push(replacement.track);
        edit.add
            .push(BoardItem::Polygon(FilledPolygon::new(replacement.outline)));
    }
    let created = edit.added_ids();
    let removed = edit.remove.clone();
    let undo = board.apply(edit)?;

    let report = ActionReport {
        action: "Square track",
        created,
        removed,
        skipped: plan.skipped,
        rejected_candidates: 0,
        undo,
    };
    log_report(&report);
    Ok(report)
}

/// Surround every selected track with a via fence.
///
/// Processed tracks are deselected, including ones that were skipped.
pub fn fence_selected_tracks(
    board: &mut Board,
    params: &FenceParameters,
    options: FenceOptions,
) -> BoardResult<ActionReport> {
    params.validate()?;
    let selected = board.selected_tracks();

    let mut accumulator = PositionAccumulator::with_min_separation(options.min_separation);
    if options.seed == DedupSeed::ExistingVias {
        accumulator.seed(board.via_positions());
    }
    let plan = ViaFenceGenerator::new(params.clone()).build_with(&selected, &mut accumulator);
    let rejected_candidates = plan.rejected_count();

    let edit = BoardEdit {
        select: plan.deselect.iter().map(|&id| (id, false)).collect(),
        remove: Vec::new(),
        add: plan
            .vias
            .into_iter()
            .map(|via| BoardItem::Via(BoardVia::new(via)))
            .collect(),
    };
    let created = edit.added_ids();
    let undo = board.apply(edit)?;

    let report = ActionReport {
        action: "Via fence",
        created,
        removed: Vec::new(),
        skipped: plan.skipped,
        rejected_candidates,
        undo,
    };
    log_report(&report);
    Ok(report)
}

fn log_report(report: &ActionReport) {
    if report.skipped.is_empty() {
        info!("{}", report.summary());
    } else {
        warn!("{}", report.summary());
    }
}
