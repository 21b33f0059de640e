use std::collections::VecDeque;

use super::{HistoryResult, UndoEntry};
use crate::error::{HistoryError, UndoCaptureError};
use crate::image::PixelBuffer;

/// Default number of entries kept on the undo stack
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Undo/redo stacks of committed edits.
///
/// Pushing a new entry clears the redo stack. When the undo stack grows past
/// `limit`, the oldest entries are evicted.
#[derive(Debug)]
pub struct History {
    /// Entries that can be undone, oldest first
    undo_stack: VecDeque<UndoEntry>,
    /// Entries that can be redone, most recently undone last
    redo_stack: Vec<UndoEntry>,
    limit: usize,
    /// Largest single entry accepted, in bytes
    max_entry_bytes: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
            max_entry_bytes: None,
        }
    }

    pub fn with_entry_budget(mut self, max_entry_bytes: Option<usize>) -> Self {
        self.max_entry_bytes = max_entry_bytes;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a committed edit.
    ///
    /// Entries over the byte budget are refused; the canvas keeps the edit
    /// either way.
    pub fn push(&mut self, entry: UndoEntry) -> Result<(), UndoCaptureError> {
        if let Some(budget) = self.max_entry_bytes {
            let bytes = entry.byte_len();
            if bytes > budget {
                return Err(UndoCaptureError::EntryTooLarge { bytes, budget });
            }
        }

        log::debug!("History push: {} ({})", entry.label(), entry.id());
        self.undo_stack.push_back(entry);
        self.redo_stack.clear();
        self.evict();
        Ok(())
    }

    /// Undo the most recent edit on `canvas`
    pub fn undo(&mut self, canvas: &mut PixelBuffer) -> HistoryResult {
        let entry = self.undo_stack.pop_back().ok_or(HistoryError::NothingToUndo)?;
        if let Err(err) = entry.revert(canvas) {
            self.undo_stack.push_back(entry);
            return Err(err);
        }
        log::debug!("Undo: {} ({})", entry.label(), entry.id());
        self.redo_stack.push(entry);
        Ok(())
    }

    /// Redo the most recently undone edit on `canvas`
    pub fn redo(&mut self, canvas: &mut PixelBuffer) -> HistoryResult {
        let entry = self.redo_stack.pop().ok_or(HistoryError::NothingToRedo)?;
        if let Err(err) = entry.apply(canvas) {
            self.redo_stack.push(entry);
            return Err(err);
        }
        log::debug!("Redo: {} ({})", entry.label(), entry.id());
        self.undo_stack.push_back(entry);
        Ok(())
    }

    /// Returns true if there are entries that can be undone
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Returns true if there are entries that can be redone
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// The entry the next `undo` would revert
    pub fn last(&self) -> Option<&UndoEntry> {
        self.undo_stack.back()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn evict(&mut self) {
        while self.undo_stack.len() > self.limit {
            if let Some(old) = self.undo_stack.pop_front() {
                log::debug!("History evicted: {} ({})", old.label(), old.id());
            }
        }
    }
}
