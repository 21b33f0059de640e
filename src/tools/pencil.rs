use super::{Gesture, Painter, PreviewMode};
use crate::command::UndoEntry;
use crate::error::UndoCaptureError;
use crate::geometry::raster::line_points;
use crate::image::PixelBuffer;
use crate::state::EditorContext;

/// Freehand one-pixel pencil.
///
/// Each move draws the segment from the previous position, so the stroke
/// follows the pointer path. A press alone leaves a single dot.
///
/// Undo records only the pixels that changed. A stroke that changed nothing
/// (e.g. drawing over pixels of the same color) records no entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pencil;

impl Painter for Pencil {
    fn name(&self) -> &'static str {
        "Pencil"
    }

    fn paint(&self, gesture: &Gesture, ctx: &mut EditorContext) {
        let Some(bounds) = ctx.canvas().bounds() else {
            return;
        };
        let color = gesture.color(&ctx.palette);
        for p in line_points(gesture.start, gesture.end, bounds) {
            ctx.paint_pixel(p, color);
        }
    }

    fn preview_mode(&self) -> PreviewMode {
        PreviewMode::Accumulate
    }

    fn make_undo_command(
        &self,
        before: PixelBuffer,
        ctx: &EditorContext,
    ) -> Result<Option<UndoEntry>, UndoCaptureError> {
        let entry = UndoEntry::pixel_delta(self.name(), &before, ctx.canvas());
        Ok((!entry.is_empty()).then_some(entry))
    }
}
