use egui::{Modifiers, PointerButton};

use crate::command::UndoEntry;
use crate::cursor::{Cursor, CursorProvider};
use crate::error::{ResourceLoadError, UndoCaptureError};
use crate::geometry::Point;
use crate::image::{Color, PixelBuffer};
use crate::input::{PointerEvent, PointerEventKind};
use crate::state::{EditorContext, Palette};

/// Host-facing interface of every instrument.
///
/// The host routes each pointer event over the canvas to the active
/// instrument along with the editor context and the image-space position.
/// A gesture is one press, any number of moves, and one release; a committed
/// gesture always leaves exactly one undo decision behind.
pub trait Instrument: Send {
    /// Return the name of the instrument
    fn name(&self) -> &'static str;

    /// Begin a gesture at `point`.
    ///
    /// Fails only when a gesture implicitly closed by this press could not be
    /// made undoable; the new gesture starts regardless.
    fn on_press(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError>;

    /// Update the preview during a gesture. Outside a gesture this only tracks
    /// the hover position and never touches the canvas.
    fn on_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext, point: Point);

    /// Finish the gesture, committing its edit and recording undo state.
    ///
    /// An error means the edit stayed on the canvas but could not be recorded.
    fn on_release(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError>;

    /// Abandon the current gesture without committing, e.g. on focus loss.
    fn cancel(&mut self, ctx: &mut EditorContext);

    /// The cursor to show while this instrument is active
    fn cursor(&self) -> &Cursor;

    /// Whether the host should composite a live preview for this instrument
    fn show_preview(&self) -> bool {
        true
    }

    fn is_gesture_active(&self) -> bool;

    /// Last position seen by this instrument, with or without a gesture
    fn hover_point(&self) -> Option<Point>;

    /// Route an event to the matching handler by its kind
    fn handle_event(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError> {
        match event.kind {
            PointerEventKind::Press => self.on_press(event, ctx, point),
            PointerEventKind::Move => {
                self.on_move(event, ctx, point);
                Ok(())
            }
            PointerEventKind::Release => self.on_release(event, ctx, point),
        }
    }
}

/// Anchor points and pointer details of the gesture in progress.
///
/// Passed to [`Painter::paint`] as the only per-gesture input, so drawing is a
/// function of these points, the painter's settings and the context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gesture {
    /// Where the press happened
    pub origin: Point,
    /// Start of the shape (or of the current segment, for freehand painters)
    pub start: Point,
    /// Latest pointer position
    pub end: Point,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl Gesture {
    pub fn new(point: Point, event: &PointerEvent) -> Self {
        Self {
            origin: point,
            start: point,
            end: point,
            button: event.button,
            modifiers: event.modifiers,
        }
    }

    /// Palette color bound to the button that started the gesture
    pub fn color(&self, palette: &Palette) -> Color {
        if self.button == PointerButton::Secondary {
            palette.secondary
        } else {
            palette.primary
        }
    }
}

/// How intermediate frames of a gesture are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewMode {
    /// Restore the press-time snapshot, then draw the whole shape again
    Restore,
    /// Draw only the newest segment on top of what is there, freehand style
    Accumulate,
    /// Call `paint` on every event without touching the canvas first
    Direct,
}

/// What to do with a press that arrives while a gesture is still active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressPolicy {
    /// Drop the press and keep the current gesture going
    Ignore,
    /// Commit the current gesture at its last position, then start a new one
    Restart,
}

/// Geometry of one concrete instrument.
///
/// Implementors only describe what a gesture draws; the press/move/release
/// state machine, preview restoration and undo capture live in
/// [`CustomCursorInstrument`].
pub trait Painter: Send {
    fn name(&self) -> &'static str;

    /// Draw the gesture into the context, clipped to the selection.
    fn paint(&self, gesture: &Gesture, ctx: &mut EditorContext);

    fn preview_mode(&self) -> PreviewMode {
        PreviewMode::Restore
    }

    fn press_policy(&self) -> PressPolicy {
        PressPolicy::Restart
    }

    fn show_preview(&self) -> bool {
        true
    }

    /// Whether gestures write pixels. Painters that only read the canvas
    /// return `false`: no snapshot is taken at press and
    /// [`make_undo_command`](Painter::make_undo_command) is never called.
    fn captures_canvas(&self) -> bool {
        true
    }

    /// Build the history entry for a finished gesture.
    ///
    /// `before` is the canvas as it was at press time. Any entry returned must
    /// restore exactly that canvas when reverted. The default records the
    /// whole buffer and always produces an entry, even for gestures that
    /// changed nothing.
    fn make_undo_command(
        &self,
        before: PixelBuffer,
        ctx: &EditorContext,
    ) -> Result<Option<UndoEntry>, UndoCaptureError> {
        let after = ctx.capture_canvas()?;
        Ok(Some(UndoEntry::snapshot(self.name(), before, after)))
    }
}

mod instrument;
pub use instrument::CustomCursorInstrument;

mod color_picker;
mod fill;
mod line;
mod pencil;
mod rectangle;
mod selection;
mod toolbox;

pub use color_picker::ColorPicker;
pub use fill::Fill;
pub use line::Line;
pub use pencil::Pencil;
pub use rectangle::Rectangle;
pub use selection::RectSelection;
pub use toolbox::Toolbox;

/// The instruments an editor can switch between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Pencil,
    Line,
    Rectangle,
    Fill,
    ColorPicker,
    Selection,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Pencil,
        ToolKind::Line,
        ToolKind::Rectangle,
        ToolKind::Fill,
        ToolKind::ColorPicker,
        ToolKind::Selection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pencil => "Pencil",
            Self::Line => "Line",
            Self::Rectangle => "Rectangle",
            Self::Fill => "Fill",
            Self::ColorPicker => "ColorPicker",
            Self::Selection => "Selection",
        }
    }

    /// Identifier of the cursor resource this instrument loads
    pub fn cursor_resource(self) -> &'static str {
        match self {
            Self::Pencil => "pencil.png",
            Self::Line => "line.png",
            Self::Rectangle => "rectangle.png",
            Self::Fill => "fill.png",
            Self::ColorPicker => "picker.png",
            Self::Selection => "selection.png",
        }
    }
}

/// Enum representing all available instruments.
/// This allows us to avoid using Box<dyn Instrument> for the built-in set.
pub enum ToolType {
    Pencil(CustomCursorInstrument<Pencil>),
    Line(CustomCursorInstrument<Line>),
    Rectangle(CustomCursorInstrument<Rectangle>),
    Fill(CustomCursorInstrument<Fill>),
    ColorPicker(CustomCursorInstrument<ColorPicker>),
    Selection(CustomCursorInstrument<RectSelection>),
}

macro_rules! each_tool {
    ($value:expr, $tool:ident => $body:expr) => {
        match $value {
            ToolType::Pencil($tool) => $body,
            ToolType::Line($tool) => $body,
            ToolType::Rectangle($tool) => $body,
            ToolType::Fill($tool) => $body,
            ToolType::ColorPicker($tool) => $body,
            ToolType::Selection($tool) => $body,
        }
    };
}

impl ToolType {
    /// Build the instrument of the given kind, loading its cursor resource.
    pub fn new(kind: ToolKind, provider: &CursorProvider) -> Result<Self, ResourceLoadError> {
        let cursor = provider.cursor(kind.cursor_resource())?;
        Ok(Self::with_cursor(kind, cursor))
    }

    /// Build the instrument of the given kind around an already loaded cursor.
    pub fn with_cursor(kind: ToolKind, cursor: Cursor) -> Self {
        match kind {
            ToolKind::Pencil => Self::Pencil(CustomCursorInstrument::with_cursor(cursor, Pencil)),
            ToolKind::Line => Self::Line(CustomCursorInstrument::with_cursor(cursor, Line)),
            ToolKind::Rectangle => {
                Self::Rectangle(CustomCursorInstrument::with_cursor(cursor, Rectangle))
            }
            ToolKind::Fill => Self::Fill(CustomCursorInstrument::with_cursor(cursor, Fill)),
            ToolKind::ColorPicker => {
                Self::ColorPicker(CustomCursorInstrument::with_cursor(cursor, ColorPicker))
            }
            ToolKind::Selection => {
                Self::Selection(CustomCursorInstrument::with_cursor(cursor, RectSelection))
            }
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Pencil(_) => ToolKind::Pencil,
            Self::Line(_) => ToolKind::Line,
            Self::Rectangle(_) => ToolKind::Rectangle,
            Self::Fill(_) => ToolKind::Fill,
            Self::ColorPicker(_) => ToolKind::ColorPicker,
            Self::Selection(_) => ToolKind::Selection,
        }
    }

    pub fn current_gesture(&self) -> Option<&Gesture> {
        each_tool!(self, tool => tool.gesture())
    }
}

impl std::fmt::Debug for ToolType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolType")
            .field("kind", &self.kind())
            .field("gesture", &self.current_gesture())
            .finish_non_exhaustive()
    }
}

impl Instrument for ToolType {
    fn name(&self) -> &'static str {
        each_tool!(self, tool => tool.name())
    }

    fn on_press(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError> {
        each_tool!(self, tool => tool.on_press(event, ctx, point))
    }

    fn on_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext, point: Point) {
        each_tool!(self, tool => tool.on_move(event, ctx, point))
    }

    fn on_release(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError> {
        each_tool!(self, tool => tool.on_release(event, ctx, point))
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        each_tool!(self, tool => tool.cancel(ctx))
    }

    fn cursor(&self) -> &Cursor {
        each_tool!(self, tool => tool.cursor())
    }

    fn show_preview(&self) -> bool {
        each_tool!(self, tool => tool.show_preview())
    }

    fn is_gesture_active(&self) -> bool {
        each_tool!(self, tool => tool.is_gesture_active())
    }

    fn hover_point(&self) -> Option<Point> {
        each_tool!(self, tool => tool.hover_point())
    }
}
