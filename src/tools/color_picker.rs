use egui::PointerButton;

use super::{Gesture, Painter, PreviewMode};
use crate::state::EditorContext;

/// Eyedropper: picks the canvas color under the pointer into the palette.
///
/// The primary button sets the primary color, the secondary button the
/// secondary color. Dragging keeps picking. The canvas is never written, so
/// there is no preview and no undo entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorPicker;

impl Painter for ColorPicker {
    fn name(&self) -> &'static str {
        "ColorPicker"
    }

    fn paint(&self, gesture: &Gesture, ctx: &mut EditorContext) {
        let Some(color) = ctx.canvas().get(gesture.end) else {
            return;
        };
        if gesture.button == PointerButton::Secondary {
            ctx.palette.secondary = color;
        } else {
            ctx.palette.primary = color;
        }
    }

    fn preview_mode(&self) -> PreviewMode {
        PreviewMode::Direct
    }

    fn show_preview(&self) -> bool {
        false
    }

    fn captures_canvas(&self) -> bool {
        false
    }
}
