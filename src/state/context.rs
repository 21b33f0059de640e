//! The editor-side collaborator that instruments edit through.
//!
//! `EditorContext` owns the committed pixel buffer, the active selection, the
//! palette and the undo/redo history. Instruments receive it by `&mut` for
//! the duration of one pointer event and never keep a reference to it.
//!
//! # Example
//!
//! ```rust,no_run
//! use pattern_paint::state::EditorContext;
//! use pattern_paint::image::PixelBuffer;
//! use image::Rgba;
//!
//! let mut ctx = EditorContext::new(PixelBuffer::new(16, 16, Rgba([255, 255, 255, 255])));
//! // ... route pointer events to the active instrument ...
//! if let Err(e) = ctx.undo() {
//!     println!("Undo failed: {}", e);
//! }
//! ```
use image::Rgba;

use crate::command::{History, HistoryResult, UndoEntry};
use crate::config::EditorConfig;
use crate::error::UndoCaptureError;
use crate::geometry::{Point, Rect};
use crate::image::{Color, PixelBuffer};

/// Colors bound to the primary and secondary pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgba([0, 0, 0, 255]),
            secondary: Rgba([255, 255, 255, 255]),
        }
    }
}

#[derive(Debug)]
pub struct EditorContext {
    canvas: PixelBuffer,
    selection: Option<Rect>,
    pub palette: Palette,
    history: History,
    capture_limit: Option<usize>,
}

impl EditorContext {
    /// Creates a context around `canvas` with no selection and an empty history.
    pub fn new(canvas: PixelBuffer) -> Self {
        Self {
            canvas,
            selection: None,
            palette: Palette::default(),
            history: History::default(),
            capture_limit: None,
        }
    }

    /// Creates a context using the history limits and colors from `config`.
    pub fn with_config(canvas: PixelBuffer, config: &EditorConfig) -> Self {
        Self {
            canvas,
            selection: None,
            palette: Palette {
                primary: Rgba(config.primary_color),
                secondary: Rgba(config.secondary_color),
            },
            history: History::new(config.history_limit).with_entry_budget(config.max_entry_bytes),
            capture_limit: config.max_capture_bytes,
        }
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PixelBuffer {
        &mut self.canvas
    }

    /// Copy the canvas for undo capture.
    ///
    /// Fails with [`UndoCaptureError::OutOfMemory`] when the allocation fails
    /// or the canvas is larger than the configured capture limit.
    pub fn capture_canvas(&self) -> Result<PixelBuffer, UndoCaptureError> {
        let bytes = self.canvas.byte_len();
        if self.capture_limit.is_some_and(|limit| bytes > limit) {
            return Err(UndoCaptureError::OutOfMemory { bytes });
        }
        self.canvas.try_snapshot()
    }

    /// The selection, if any, restricted to the canvas. Edits are clipped to it.
    pub fn selection(&self) -> Option<Rect> {
        self.selection
    }

    /// Replace the selection. Rects outside the canvas clear it.
    pub fn set_selection(&mut self, selection: Option<Rect>) {
        self.selection = selection.and_then(|rect| {
            self.canvas
                .bounds()
                .and_then(|bounds| bounds.intersect(&rect))
        });
    }

    /// Write a pixel, clipped to the selection
    pub fn paint_pixel(&mut self, p: Point, color: Color) -> bool {
        self.canvas.put_clipped(p, color, self.selection)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Record a finished edit on the history
    pub fn push_undo(&mut self, entry: UndoEntry) -> Result<(), UndoCaptureError> {
        self.history.push(entry)
    }

    pub fn undo(&mut self) -> HistoryResult {
        self.history.undo(&mut self.canvas)
    }

    pub fn redo(&mut self) -> HistoryResult {
        self.history.redo(&mut self.canvas)
    }
}
