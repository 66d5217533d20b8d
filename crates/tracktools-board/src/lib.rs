//! # TrackTools Board
//!
//! A reference host for the track pipelines: an in-memory board document,
//! atomic edits with undo, and the "square selected tracks" and "fence
//! selected tracks" actions.

pub mod actions;
pub mod document;
pub mod edit;
pub mod error;

pub use actions::{
    fence_selected_tracks, square_selected_tracks, ActionReport, DedupSeed, FenceOptions,
};
pub use document::{Board, BoardItem, BoardTrack, BoardVia, FilledPolygon, Zone};
pub use edit::{BoardEdit, EditHistory};
pub use error::{BoardError, BoardResult};
