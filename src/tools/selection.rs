use super::{Gesture, Painter, PressPolicy};
use crate::geometry::Rect;
use crate::state::EditorContext;

/// Rectangular marquee. Dragging sets the selection that clips later edits;
/// a click without drag clears it.
///
/// The selection is not part of the pixel history, so no undo entry is
/// recorded. A second press during a gesture is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectSelection;

impl Painter for RectSelection {
    fn name(&self) -> &'static str {
        "Selection"
    }

    fn paint(&self, gesture: &Gesture, ctx: &mut EditorContext) {
        let selection =
            (gesture.start != gesture.end).then(|| Rect::from_corners(gesture.start, gesture.end));
        ctx.set_selection(selection);
    }

    fn press_policy(&self) -> PressPolicy {
        PressPolicy::Ignore
    }

    fn captures_canvas(&self) -> bool {
        false
    }
}
