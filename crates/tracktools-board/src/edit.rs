//! Atomic board edits with undo
//!
//! A [`BoardEdit`] is checked in full before anything is touched, so it
//! either applies completely or leaves the board as it was. Applying an
//! edit returns its inverse.

use crate::document::{Board, BoardItem};
use crate::error::{BoardError, BoardResult};
use std::collections::HashSet;
use tracing::debug;
use tracktools_core::ItemId;

/// A set of changes applied to a board in one step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardEdit {
    /// Track selection flags to set, applied first
    pub select: Vec<(ItemId, bool)>,
    /// Items to delete, applied second
    pub remove: Vec<ItemId>,
    /// Items to insert, applied last
    pub add: Vec<BoardItem>,
}

impl BoardEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.select.is_empty() && self.remove.is_empty() && self.add.is_empty()
    }

    /// Ids of the items this edit inserts
    pub fn added_ids(&self) -> Vec<ItemId> {
        self.add.iter().map(BoardItem::id).collect()
    }
}

impl Board {
    /// Apply `edit` atomically and return the edit that undoes it
    pub fn apply(&mut self, edit: BoardEdit) -> BoardResult<BoardEdit> {
        self.check_edit(&edit)?;

        let mut inverse = BoardEdit::new();
        for &(id, selected) in &edit.select {
            if let Some(track) = self.track_mut(id) {
                inverse.select.push((id, track.selected));
                track.selected = selected;
            }
        }
        // Restore in reverse so repeated ids end at their original flag
        inverse.select.reverse();

        for &id in &edit.remove {
            if let Some(item) = self.take_item(id) {
                inverse.add.push(item);
            }
        }
        for item in edit.add {
            inverse.remove.push(item.id());
            self.insert_item(item);
        }

        debug!(
            selected = edit.select.len(),
            removed = inverse.add.len(),
            added = inverse.remove.len(),
            "Applied board edit"
        );
        Ok(inverse)
    }

    fn check_edit(&self, edit: &BoardEdit) -> BoardResult<()> {
        let mut removed = HashSet::new();
        for &id in &edit.remove {
            if !self.contains(id) {
                return Err(BoardError::UnknownItem(id));
            }
            if !removed.insert(id) {
                return Err(BoardError::DuplicateItem(id));
            }
        }

        for &(id, _) in &edit.select {
            if self.track(id).is_none() {
                return Err(if self.contains(id) {
                    BoardError::NotATrack(id)
                } else {
                    BoardError::UnknownItem(id)
                });
            }
            if removed.contains(&id) {
                return Err(BoardError::ConflictingEdit(id));
            }
        }

        let mut added = HashSet::new();
        for item in &edit.add {
            let id = item.id();
            let occupied = self.contains(id) && !removed.contains(&id);
            if occupied || !added.insert(id) {
                return Err(BoardError::DuplicateItem(id));
            }
        }
        Ok(())
    }
}

struct HistoryEntry {
    name: String,
    inverse: BoardEdit,
}

/// Undo/redo stacks of applied edits
#[derive(Default)]
pub struct EditHistory {
    undo: Vec<HistoryEntry>,
    redo: Vec<HistoryEntry>,
}

impl EditHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `edit` to `board` and remember how to undo it
    pub fn apply(
        &mut self,
        board: &mut Board,
        name: impl Into<String>,
        edit: BoardEdit,
    ) -> BoardResult<()> {
        let inverse = board.apply(edit)?;
        self.record(name, inverse);
        Ok(())
    }

    /// Remember an inverse produced by an edit applied elsewhere
    pub fn record(&mut self, name: impl Into<String>, inverse: BoardEdit) {
        self.undo.push(HistoryEntry {
            name: name.into(),
            inverse,
        });
        self.redo.clear();
    }

    /// Undo the latest edit, returning its name
    pub fn undo(&mut self, board: &mut Board) -> BoardResult<Option<String>> {
        Self::step(board, &mut self.undo, &mut self.redo)
    }

    /// Redo the latest undone edit, returning its name
    pub fn redo(&mut self, board: &mut Board) -> BoardResult<Option<String>> {
        Self::step(board, &mut self.redo, &mut self.undo)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_name(&self) -> Option<&str> {
        self.undo.last().map(|e| e.name.as_str())
    }

    fn step(
        board: &mut Board,
        from: &mut Vec<HistoryEntry>,
        to: &mut Vec<HistoryEntry>,
    ) -> BoardResult<Option<String>> {
        let Some(entry) = from.pop() else {
            return Ok(None);
        };
        match board.apply(entry.inverse.clone()) {
            Ok(inverse) => {
                to.push(HistoryEntry {
                    name: entry.name.clone(),
                    inverse,
                });
                Ok(Some(entry.name))
            }
            Err(e) => {
                from.push(entry);
                Err(e)
            }
        }
    }
}
