use egui::PointerButton;
use image::Rgba;
use pattern_paint::command::Delta;
use pattern_paint::config::EditorConfig;
use pattern_paint::cursor::Cursor;
use pattern_paint::error::{HistoryError, UndoCaptureError};
use pattern_paint::geometry::Point;
use pattern_paint::image::PixelBuffer;
use pattern_paint::input::PointerEvent;
use pattern_paint::state::EditorContext;
use pattern_paint::tools::{Instrument, ToolKind, ToolType};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GREEN: Rgba<u8> = Rgba([0, 200, 0, 255]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn tool(kind: ToolKind) -> ToolType {
    ToolType::with_cursor(kind, Cursor::crosshair())
}

fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

/// A canvas with some existing content, so undo has something to get wrong
fn patterned_canvas() -> PixelBuffer {
    let mut canvas = PixelBuffer::new(6, 6, WHITE);
    for i in 0..6 {
        canvas.put(p(i, 3), GREEN);
    }
    canvas
}

fn gesture(
    instrument: &mut impl Instrument,
    ctx: &mut EditorContext,
    points: &[Point],
) -> Result<(), UndoCaptureError> {
    let primary = PointerButton::Primary;
    let (first, rest) = points.split_first().unwrap();
    instrument.on_press(&PointerEvent::press(primary), ctx, *first)?;
    for point in rest {
        instrument.on_move(&PointerEvent::moved(primary), ctx, *point);
    }
    instrument.on_release(&PointerEvent::release(primary), ctx, *points.last().unwrap())
}

#[test]
fn test_undo_restores_pre_press_state_for_every_painting_tool() {
    for kind in [ToolKind::Pencil, ToolKind::Line, ToolKind::Rectangle, ToolKind::Fill] {
        let mut ctx = EditorContext::new(patterned_canvas());
        let original = ctx.canvas().clone();

        gesture(&mut tool(kind), &mut ctx, &[p(0, 0), p(4, 5), p(5, 1)]).unwrap();
        assert_ne!(ctx.canvas(), &original, "{:?} drew nothing", kind);
        let edited = ctx.canvas().clone();

        ctx.undo().unwrap();
        assert_eq!(ctx.canvas(), &original, "{:?} undo", kind);

        ctx.redo().unwrap();
        assert_eq!(ctx.canvas(), &edited, "{:?} redo", kind);
    }
}

#[test]
fn test_undo_walks_back_through_gestures() {
    let mut ctx = EditorContext::new(patterned_canvas());
    let mut states = vec![ctx.canvas().clone()];

    gesture(&mut tool(ToolKind::Line), &mut ctx, &[p(0, 0), p(5, 5)]).unwrap();
    states.push(ctx.canvas().clone());
    gesture(&mut tool(ToolKind::Pencil), &mut ctx, &[p(5, 0), p(0, 5)]).unwrap();
    states.push(ctx.canvas().clone());
    gesture(&mut tool(ToolKind::Rectangle), &mut ctx, &[p(1, 1), p(4, 4)]).unwrap();

    while let Some(expected) = states.pop() {
        ctx.undo().unwrap();
        assert_eq!(ctx.canvas(), &expected);
    }
    assert_eq!(ctx.undo(), Err(HistoryError::NothingToUndo));
}

#[test]
fn test_default_policy_records_no_op_gestures() {
    let mut ctx = EditorContext::new(PixelBuffer::new(3, 3, BLACK));

    gesture(&mut tool(ToolKind::Line), &mut ctx, &[p(1, 1)]).unwrap();

    assert_eq!(ctx.history().undo_len(), 1);
    let entry = ctx.history().last().unwrap();
    assert_eq!(entry.label(), "Line");
    assert!(entry.is_empty());
    assert!(matches!(entry.delta(), Delta::Image { .. }));
}

#[test]
fn test_narrow_policies_skip_no_op_gestures() {
    let mut ctx = EditorContext::new(PixelBuffer::new(3, 3, BLACK));

    gesture(&mut tool(ToolKind::Pencil), &mut ctx, &[p(0, 0), p(2, 2)]).unwrap();
    gesture(&mut tool(ToolKind::Fill), &mut ctx, &[p(1, 1)]).unwrap();

    assert!(!ctx.history().can_undo());
}

#[test]
fn test_pencil_records_only_changed_pixels() {
    let mut ctx = EditorContext::new(PixelBuffer::new(8, 8, WHITE));

    gesture(&mut tool(ToolKind::Pencil), &mut ctx, &[p(0, 0), p(3, 0)]).unwrap();

    let entry = ctx.history().last().unwrap();
    match entry.delta() {
        Delta::Pixels { size, changes } => {
            assert_eq!(*size, (8, 8));
            assert_eq!(changes.len(), 4);
            assert!(changes.iter().all(|c| c.before == WHITE && c.after == BLACK));
        }
        other => panic!("unexpected delta {:?}", other),
    }
    assert!(entry.byte_len() < ctx.canvas().byte_len());
}

#[test]
fn test_capture_failure_keeps_edit_and_reports() {
    let config = EditorConfig {
        max_entry_bytes: Some(32),
        ..Default::default()
    };
    let mut ctx = EditorContext::with_config(PixelBuffer::new(4, 4, WHITE), &config);
    let mut line = tool(ToolKind::Line);

    let result = gesture(&mut line, &mut ctx, &[p(0, 0), p(3, 0)]);

    assert_eq!(
        result,
        Err(UndoCaptureError::EntryTooLarge {
            bytes: 128,
            budget: 32
        })
    );
    assert!(!line.is_gesture_active());
    assert_eq!(ctx.canvas().get(p(3, 0)), Some(BLACK));
    assert!(!ctx.history().can_undo());

    // editing goes on; small entries still fit
    gesture(&mut tool(ToolKind::Pencil), &mut ctx, &[p(0, 2)]).unwrap();
    assert_eq!(ctx.history().undo_len(), 1);
}

/// A 4x4 canvas (64 bytes) that is too large to capture
fn uncapturable_canvas() -> EditorContext {
    let config = EditorConfig {
        max_capture_bytes: Some(32),
        ..Default::default()
    };
    EditorContext::with_config(PixelBuffer::new(4, 4, WHITE), &config)
}

#[test]
fn test_snapshot_failure_draws_only_on_release() {
    let mut ctx = uncapturable_canvas();
    let blank = ctx.canvas().clone();
    let mut line = tool(ToolKind::Line);
    let primary = PointerButton::Primary;

    line.on_press(&PointerEvent::press(primary), &mut ctx, p(0, 0)).unwrap();
    line.on_move(&PointerEvent::moved(primary), &mut ctx, p(3, 0));
    assert_eq!(ctx.canvas(), &blank);
    assert!(line.is_gesture_active());

    let result = line.on_release(&PointerEvent::release(primary), &mut ctx, p(3, 0));

    assert_eq!(result, Err(UndoCaptureError::OutOfMemory { bytes: 64 }));
    assert!(!line.is_gesture_active());
    for x in 0..4 {
        assert_eq!(ctx.canvas().get(p(x, 0)), Some(BLACK));
    }
    assert!(!ctx.history().can_undo());
}

#[test]
fn test_cancel_without_snapshot_leaves_canvas_untouched() {
    let mut ctx = uncapturable_canvas();
    let blank = ctx.canvas().clone();
    let mut rectangle = tool(ToolKind::Rectangle);
    let primary = PointerButton::Primary;

    rectangle.on_press(&PointerEvent::press(primary), &mut ctx, p(0, 0)).unwrap();
    rectangle.on_move(&PointerEvent::moved(primary), &mut ctx, p(3, 3));
    rectangle.cancel(&mut ctx);

    assert_eq!(ctx.canvas(), &blank);
    assert!(!rectangle.is_gesture_active());
    assert!(!ctx.history().can_undo());
}

#[test]
fn test_read_only_tools_do_not_capture() {
    let mut ctx = uncapturable_canvas();
    ctx.canvas_mut().put(p(2, 2), RED);

    gesture(&mut tool(ToolKind::ColorPicker), &mut ctx, &[p(2, 2)]).unwrap();
    assert_eq!(ctx.palette.primary, RED);

    gesture(&mut tool(ToolKind::Selection), &mut ctx, &[p(0, 0), p(1, 1)]).unwrap();
    assert_eq!(ctx.selection().map(|rect| (rect.width(), rect.height())), Some((2, 2)));

    assert!(!ctx.history().can_undo());
}

#[test]
fn test_history_limit_from_config() {
    let config = EditorConfig {
        history_limit: 2,
        ..Default::default()
    };
    let mut ctx = EditorContext::with_config(PixelBuffer::new(4, 4, WHITE), &config);

    for y in 0..4 {
        gesture(&mut tool(ToolKind::Pencil), &mut ctx, &[p(0, y), p(3, y)]).unwrap();
    }

    assert_eq!(ctx.history().undo_len(), 2);
    ctx.undo().unwrap();
    ctx.undo().unwrap();
    assert_eq!(ctx.undo(), Err(HistoryError::NothingToUndo));
    assert_eq!(ctx.canvas().get(p(0, 1)), Some(BLACK));
    assert_eq!(ctx.canvas().get(p(0, 2)), Some(WHITE));
}

#[test]
fn test_new_gesture_clears_redo() {
    let mut ctx = EditorContext::new(PixelBuffer::new(4, 4, WHITE));

    gesture(&mut tool(ToolKind::Line), &mut ctx, &[p(0, 0), p(3, 0)]).unwrap();
    ctx.undo().unwrap();
    assert!(ctx.history().can_redo());

    gesture(&mut tool(ToolKind::Line), &mut ctx, &[p(0, 3), p(3, 3)]).unwrap();
    assert_eq!(ctx.redo(), Err(HistoryError::NothingToRedo));
}
