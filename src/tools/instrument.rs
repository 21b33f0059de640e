use super::{Gesture, Instrument, Painter, PressPolicy, PreviewMode};
use crate::cursor::{Cursor, CursorProvider};
use crate::error::{GestureError, ResourceLoadError, UndoCaptureError};
use crate::geometry::{Point, Rect};
use crate::image::PixelBuffer;
use crate::input::PointerEvent;
use crate::state::{EditorContext, Palette};

/// Canvas as it was at press time
#[derive(Debug)]
enum Snapshot {
    /// The painter never writes pixels
    Skipped,
    Taken(PixelBuffer),
    Failed(UndoCaptureError),
}

/// Transient state held between press and release
#[derive(Debug)]
struct ActiveGesture {
    gesture: Gesture,
    snapshot: Snapshot,
    /// Selection and palette at press time, put back on cancel
    selection: Option<Rect>,
    palette: Palette,
}

#[derive(Debug)]
enum Phase {
    Idle,
    Active(ActiveGesture),
}

/// An instrument with a resource-backed cursor, driving a [`Painter`] through
/// the gesture state machine.
///
/// ```text
/// Idle --press--> Active --move--> Active --release--> Idle
///                   |                                    ^
///                   +------------- cancel ---------------+
/// ```
///
/// Press captures a snapshot of the canvas unless the painter only reads it. Each frame is drawn according to
/// the painter's [`PreviewMode`]. Release draws the final frame and asks the
/// painter for exactly one undo decision, which is pushed onto the history.
#[derive(Debug)]
pub struct CustomCursorInstrument<P> {
    painter: P,
    cursor: Cursor,
    phase: Phase,
    hover: Option<Point>,
}

impl<P: Painter> CustomCursorInstrument<P> {
    /// Load the cursor named by `resource` and wrap `painter`.
    ///
    /// The resource is resolved here, so a missing or broken cursor surfaces
    /// before the instrument is ever used.
    pub fn new(
        resource: &str,
        provider: &CursorProvider,
        painter: P,
    ) -> Result<Self, ResourceLoadError> {
        let cursor = provider.cursor(resource)?;
        Ok(Self::with_cursor(cursor, painter))
    }

    pub fn with_cursor(cursor: Cursor, painter: P) -> Self {
        Self {
            painter,
            cursor,
            phase: Phase::Idle,
            hover: None,
        }
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    /// The gesture in progress, if any
    pub fn gesture(&self) -> Option<&Gesture> {
        match &self.phase {
            Phase::Active(active) => Some(&active.gesture),
            Phase::Idle => None,
        }
    }

    /// Draw one frame of the active gesture. `last` marks the release frame,
    /// which is drawn even when no snapshot could be taken.
    fn render(painter: &P, active: &mut ActiveGesture, ctx: &mut EditorContext, last: bool) {
        match painter.preview_mode() {
            PreviewMode::Restore => match &active.snapshot {
                Snapshot::Taken(snapshot) => {
                    ctx.canvas_mut().restore_from(snapshot);
                    painter.paint(&active.gesture, ctx);
                }
                // without a snapshot a preview frame could not be erased again
                Snapshot::Failed(_) if !last => {}
                Snapshot::Failed(_) | Snapshot::Skipped => painter.paint(&active.gesture, ctx),
            },
            PreviewMode::Accumulate => {
                painter.paint(&active.gesture, ctx);
                active.gesture.start = active.gesture.end;
            }
            PreviewMode::Direct => painter.paint(&active.gesture, ctx),
        }
    }

    /// Close the active gesture at `point` and record its undo entry.
    fn finish(&mut self, ctx: &mut EditorContext, point: Point) -> Result<(), UndoCaptureError> {
        let Phase::Active(mut active) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return Ok(());
        };
        active.gesture.end = point;
        Self::render(&self.painter, &mut active, ctx, true);
        log::debug!("{}: gesture committed at {:?}", self.painter.name(), point);

        let result = match active.snapshot {
            Snapshot::Skipped => Ok(()),
            Snapshot::Failed(err) => Err(err),
            Snapshot::Taken(before) => self
                .painter
                .make_undo_command(before, ctx)
                .and_then(|entry| match entry {
                    Some(entry) => ctx.push_undo(entry),
                    None => Ok(()),
                }),
        };
        if let Err(err) = &result {
            log::warn!("{}: edit is not undoable: {}", self.painter.name(), err);
        }
        result
    }
}

impl<P: Painter> Instrument for CustomCursorInstrument<P> {
    fn name(&self) -> &'static str {
        self.painter.name()
    }

    fn on_press(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError> {
        self.hover = Some(point);

        let mut outcome = Ok(());
        if let Phase::Active(active) = &self.phase {
            log::warn!("{}: {}", self.painter.name(), GestureError::PressWhileActive);
            match self.painter.press_policy() {
                PressPolicy::Ignore => return Ok(()),
                PressPolicy::Restart => {
                    let last = active.gesture.end;
                    outcome = self.finish(ctx, last);
                }
            }
        }

        let snapshot = if !self.painter.captures_canvas() {
            Snapshot::Skipped
        } else {
            match ctx.capture_canvas() {
                Ok(before) => Snapshot::Taken(before),
                Err(err) => {
                    log::warn!("{}: could not capture canvas: {}", self.painter.name(), err);
                    Snapshot::Failed(err)
                }
            }
        };
        let mut active = ActiveGesture {
            gesture: Gesture::new(point, event),
            snapshot,
            selection: ctx.selection(),
            palette: ctx.palette,
        };
        log::debug!("{}: gesture started at {:?}", self.painter.name(), point);

        Self::render(&self.painter, &mut active, ctx, false);
        self.phase = Phase::Active(active);
        outcome
    }

    fn on_move(&mut self, event: &PointerEvent, ctx: &mut EditorContext, point: Point) {
        self.hover = Some(point);

        let Phase::Active(active) = &mut self.phase else {
            return;
        };
        active.gesture.end = point;
        active.gesture.modifiers = event.modifiers;
        Self::render(&self.painter, active, ctx, false);
    }

    fn on_release(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError> {
        self.hover = Some(point);

        match &mut self.phase {
            Phase::Active(active) => {
                active.gesture.modifiers = event.modifiers;
                self.finish(ctx, point)
            }
            Phase::Idle => {
                log::debug!("{}: {}", self.painter.name(), GestureError::ReleaseWhileIdle);
                Ok(())
            }
        }
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        let Phase::Active(active) = std::mem::replace(&mut self.phase, Phase::Idle) else {
            return;
        };
        match &active.snapshot {
            Snapshot::Taken(snapshot) => ctx.canvas_mut().restore_from(snapshot),
            Snapshot::Failed(_) if self.painter.preview_mode() != PreviewMode::Restore => {
                log::warn!(
                    "{}: gesture cancelled without a snapshot, partial edit remains",
                    self.painter.name()
                )
            }
            Snapshot::Failed(_) | Snapshot::Skipped => {}
        }
        ctx.set_selection(active.selection);
        ctx.palette = active.palette;
        log::debug!("{}: gesture cancelled", self.painter.name());
    }

    fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    fn show_preview(&self) -> bool {
        self.painter.show_preview()
    }

    fn is_gesture_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    fn hover_point(&self) -> Option<Point> {
        self.hover
    }
}
