use std::path::PathBuf;
use thiserror::Error;

/// A named cursor resource could not be turned into a usable cursor.
///
/// Raised when an instrument is constructed, so the host can fall back to a
/// default cursor instead of showing a blank one.
#[derive(Debug, Error)]
pub enum ResourceLoadError {
    #[error("Cursor resource not found: {id}")]
    NotFound { id: String },

    #[error("Failed to read cursor resource {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode cursor resource {id}: {source}")]
    Decode {
        id: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Cursor resource {id} has no pixels")]
    Empty { id: String },
}

/// The pre-gesture state could not be captured, so the edit is not undoable.
///
/// The visible edit is kept; this is only reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UndoCaptureError {
    #[error("Out of memory while capturing {bytes} bytes of undo state")]
    OutOfMemory { bytes: usize },

    #[error("Undo entry of {bytes} bytes exceeds the history budget of {budget} bytes")]
    EntryTooLarge { bytes: usize, budget: usize },
}

/// A pointer event arrived that does not fit the current gesture phase.
///
/// Instruments recover from these on their own; the value only travels to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GestureError {
    #[error("Press received while a gesture is already active")]
    PressWhileActive,

    #[error("Release received without an active gesture")]
    ReleaseWhileIdle,
}

/// Errors from walking the undo/redo history
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,

    #[error("Undo entry was recorded for a {expected:?} buffer but the canvas is {actual:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// Errors that can occur while loading or saving the editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to (de)serialize config: {0}")]
    Serialization(#[from] serde_json::Error),
}
