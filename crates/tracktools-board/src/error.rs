//! Error types for board documents and edits.

use std::io;
use thiserror::Error;
use tracktools_core::{ItemId, ParameterError};

/// Errors that can occur while loading or editing a board
#[derive(Error, Debug)]
pub enum BoardError {
    /// An edit referred to an item that is not on the board.
    #[error("Unknown board item {0}")]
    UnknownItem(ItemId),

    /// An edit would create a second item with the same id.
    #[error("Duplicate board item {0}")]
    DuplicateItem(ItemId),

    /// A selection change targeted something other than a track.
    #[error("Board item {0} is not a track")]
    NotATrack(ItemId),

    /// An edit both changes the selection of and removes the same item.
    #[error("Board item {0} is both reselected and removed")]
    ConflictingEdit(ItemId),

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type BoardResult<T> = Result<T, BoardError>;
