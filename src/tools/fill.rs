use super::{Gesture, Painter, PressPolicy};
use crate::command::UndoEntry;
use crate::error::UndoCaptureError;
use crate::geometry::raster::flood_region;
use crate::image::PixelBuffer;
use crate::state::EditorContext;

/// Flood fill of the 4-connected same-colored region under the press point,
/// limited to the selection.
///
/// Only the press point matters; moving the pointer during the gesture does
/// not change the result. A fill that changes nothing (the region already
/// has the fill color) records no undo entry. A second press during a gesture
/// is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fill;

impl Painter for Fill {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn paint(&self, gesture: &Gesture, ctx: &mut EditorContext) {
        let color = gesture.color(&ctx.palette);
        let region = flood_region(ctx.canvas(), gesture.origin, ctx.selection());
        for p in region {
            ctx.paint_pixel(p, color);
        }
    }

    fn press_policy(&self) -> PressPolicy {
        PressPolicy::Ignore
    }

    fn make_undo_command(
        &self,
        before: PixelBuffer,
        ctx: &EditorContext,
    ) -> Result<Option<UndoEntry>, UndoCaptureError> {
        if &before == ctx.canvas() {
            return Ok(None);
        }
        let after = ctx.capture_canvas()?;
        Ok(Some(UndoEntry::snapshot(self.name(), before, after)))
    }
}
