#![warn(clippy::all, rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod image;
pub mod input;
pub mod state;
pub mod tools;

pub use command::{History, UndoEntry};
pub use config::EditorConfig;
pub use cursor::{Cursor, CursorProvider};
pub use error::{ResourceLoadError, UndoCaptureError};
pub use geometry::{Point, Rect};
pub use crate::image::{Color, PixelBuffer};
pub use input::{PointerEvent, PointerEventKind};
pub use state::EditorContext;
pub use tools::{CustomCursorInstrument, Instrument, Painter, ToolKind, ToolType, Toolbox};
