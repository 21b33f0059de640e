use uuid::Uuid;

use super::HistoryResult;
use crate::error::HistoryError;
use crate::image::{PixelBuffer, PixelChange};

/// Identifies one history entry, so hosts can correlate notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(Uuid);

impl EntryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What an entry needs to move the canvas between its two states
#[derive(Clone, PartialEq)]
pub enum Delta {
    /// Full copies of the buffer before and after the edit
    Image {
        before: PixelBuffer,
        after: PixelBuffer,
    },
    /// Only the pixels that changed, for edits touching little of the buffer
    Pixels {
        size: (u32, u32),
        changes: Vec<PixelChange>,
    },
}

impl std::fmt::Debug for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delta::Image { before, .. } => f
                .debug_struct("Image")
                .field("size", &before.size())
                .finish_non_exhaustive(),
            Delta::Pixels { size, changes } => f
                .debug_struct("Pixels")
                .field("size", size)
                .field("changes", &changes.len())
                .finish(),
        }
    }
}

/// One committed, reversible edit. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct UndoEntry {
    id: EntryId,
    label: &'static str,
    delta: Delta,
}

impl UndoEntry {
    /// Entry holding whole-buffer copies of both states
    pub fn snapshot(label: &'static str, before: PixelBuffer, after: PixelBuffer) -> Self {
        Self {
            id: EntryId::new(),
            label,
            delta: Delta::Image { before, after },
        }
    }

    /// Entry holding only the changed pixels between `before` and `after`
    pub fn pixel_delta(label: &'static str, before: &PixelBuffer, after: &PixelBuffer) -> Self {
        Self {
            id: EntryId::new(),
            label,
            delta: Delta::Pixels {
                size: after.size(),
                changes: after.diff(before),
            },
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Name of the instrument that produced the edit
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn delta(&self) -> &Delta {
        &self.delta
    }

    /// True when applying the entry in either direction would change nothing
    pub fn is_empty(&self) -> bool {
        match &self.delta {
            Delta::Image { before, after } => before == after,
            Delta::Pixels { changes, .. } => changes.is_empty(),
        }
    }

    /// Approximate heap footprint, checked against the history budget
    pub fn byte_len(&self) -> usize {
        match &self.delta {
            Delta::Image { before, after } => before.byte_len() + after.byte_len(),
            Delta::Pixels { changes, .. } => changes.len() * std::mem::size_of::<PixelChange>(),
        }
    }

    /// Put `canvas` back into its pre-edit state
    pub fn revert(&self, canvas: &mut PixelBuffer) -> HistoryResult {
        self.check_size(canvas)?;
        match &self.delta {
            Delta::Image { before, .. } => canvas.restore_from(before),
            Delta::Pixels { changes, .. } => {
                for change in changes.iter().rev() {
                    canvas.put(change.point, change.before);
                }
            }
        }
        Ok(())
    }

    /// Put `canvas` into the post-edit state again
    pub fn apply(&self, canvas: &mut PixelBuffer) -> HistoryResult {
        self.check_size(canvas)?;
        match &self.delta {
            Delta::Image { after, .. } => canvas.restore_from(after),
            Delta::Pixels { changes, .. } => {
                for change in changes {
                    canvas.put(change.point, change.after);
                }
            }
        }
        Ok(())
    }

    fn check_size(&self, canvas: &PixelBuffer) -> HistoryResult {
        let expected = match &self.delta {
            Delta::Image { before, .. } => before.size(),
            Delta::Pixels { size, .. } => *size,
        };
        if expected != canvas.size() {
            return Err(HistoryError::SizeMismatch {
                expected,
                actual: canvas.size(),
            });
        }
        Ok(())
    }
}
