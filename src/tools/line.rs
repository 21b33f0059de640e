use super::{Gesture, Painter};
use crate::geometry::raster::line_points;
use crate::state::EditorContext;

/// Straight one-pixel line from the press point to the pointer.
///
/// Uses the default undo policy: the whole buffer is recorded on every
/// release, including a click without drag (which draws a dot).
#[derive(Debug, Clone, Copy, Default)]
pub struct Line;

impl Painter for Line {
    fn name(&self) -> &'static str {
        "Line"
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
}
