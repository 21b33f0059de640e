use egui::{Modifiers, PointerButton};

/// Which phase of a pointer interaction an event reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    /// A button went down over the canvas
    Press,
    /// The pointer moved, with or without a button held
    Move,
    /// A button went up
    Release,
}

/// Everything an instrument needs to know about a pointer event besides its
/// image-space position, which is passed separately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub button: PointerButton,
    pub modifiers: Modifiers,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, button: PointerButton) -> Self {
        Self {
            kind,
            button,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn press(button: PointerButton) -> Self {
        Self::new(PointerEventKind::Press, button)
    }

    pub fn moved(button: PointerButton) -> Self {
        Self::new(PointerEventKind::Move, button)
    }

    pub fn release(button: PointerButton) -> Self {
        Self::new(PointerEventKind::Release, button)
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
