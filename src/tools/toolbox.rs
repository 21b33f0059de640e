use super::{Instrument, ToolKind, ToolType};
use crate::cursor::{Cursor, CursorProvider};
use crate::error::{ResourceLoadError, UndoCaptureError};
use crate::geometry::Point;
use crate::input::PointerEvent;
use crate::state::EditorContext;

/// The host's handle on the active instrument.
///
/// Owns the cursor provider and rebuilds the instrument on every switch.
/// An instrument whose cursor cannot be loaded still becomes active, using
/// the built-in crosshair, and the load error is handed back to the caller.
#[derive(Debug)]
pub struct Toolbox {
    provider: CursorProvider,
    active: ToolType,
}

impl Toolbox {
    /// Start with the pencil active.
    ///
    /// On `Err` the toolbox is still usable, with the pencil on a fallback cursor.
    pub fn new(provider: CursorProvider) -> Result<Self, (Self, ResourceLoadError)> {
        match Self::build(ToolKind::Pencil, &provider) {
            Ok(active) => Ok(Self { provider, active }),
            Err((active, err)) => Err((Self { provider, active }, err)),
        }
    }

    pub fn provider(&self) -> &CursorProvider {
        &self.provider
    }

    pub fn active(&self) -> &ToolType {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ToolType {
        &mut self.active
    }

    /// Switch to `kind`. A gesture still in progress on the previous
    /// instrument is cancelled, not committed.
    ///
    /// On `Err` the switch has still happened, with a fallback cursor.
    pub fn select(
        &mut self,
        kind: ToolKind,
        ctx: &mut EditorContext,
    ) -> Result<(), ResourceLoadError> {
        if self.active.kind() == kind {
            return Ok(());
        }
        if self.active.is_gesture_active() {
            self.active.cancel(ctx);
        }
        log::info!("Active tool: {}", kind.name());

        match Self::build(kind, &self.provider) {
            Ok(tool) => {
                self.active = tool;
                Ok(())
            }
            Err((tool, err)) => {
                self.active = tool;
                Err(err)
            }
        }
    }

    /// Route one pointer event to the active instrument
    pub fn handle_event(
        &mut self,
        event: &PointerEvent,
        ctx: &mut EditorContext,
        point: Point,
    ) -> Result<(), UndoCaptureError> {
        self.active.handle_event(event, ctx, point)
    }

    fn build(
        kind: ToolKind,
        provider: &CursorProvider,
    ) -> Result<ToolType, (ToolType, ResourceLoadError)> {
        ToolType::new(kind, provider).map_err(|err| {
            log::warn!("{}: falling back to default cursor: {}", kind.name(), err);
            (ToolType::with_cursor(kind, Cursor::crosshair()), err)
        })
    }
}
