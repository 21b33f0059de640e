mod entry;
mod history;

pub use entry::{Delta, EntryId, UndoEntry};
pub use history::{DEFAULT_HISTORY_LIMIT, History};

use crate::error::HistoryError;

/// Result type for history traversal
pub type HistoryResult = Result<(), HistoryError>;
