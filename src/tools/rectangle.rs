use super::{Gesture, Painter};
use crate::geometry::Point;
use crate::geometry::raster::rect_outline;
use crate::state::EditorContext;

/// One-pixel rectangle outline between the press point and the pointer.
/// Holding Shift constrains the shape to a square anchored at the press point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rectangle;

impl Rectangle {
    /// Opposite corner of the shape, after applying the Shift constraint
    fn corner(gesture: &Gesture) -> Point {
        if !gesture.modifiers.shift {
            return gesture.end;
        }
        let (x0, y0) = (i64::from(gesture.start.x), i64::from(gesture.start.y));
        let dx = i64::from(gesture.end.x) - x0;
        let dy = i64::from(gesture.end.y) - y0;
        let side = dx.abs().min(dy.abs());
        // stays between start and end on both axes
        Point::new((x0 + side * dx.signum()) as i32, (y0 + side * dy.signum()) as i32)
    }
}

impl Painter for Rectangle {
    fn name(&self) -> &'static str {
        "Rectangle"
    }

    fn paint(&self, gesture: &Gesture, ctx: &mut EditorContext) {
        let Some(bounds) = ctx.canvas().bounds() else {
            return;
        };
        let color = gesture.color(&ctx.palette);
        for p in rect_outline(gesture.start, Self::corner(gesture), bounds) {
            ctx.paint_pixel(p, color);
        }
    }
}
