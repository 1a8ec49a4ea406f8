use egui::Key;
use pixel_paint::raster;
use pixel_paint::tools::TOOL_DESCRIPTORS;
use pixel_paint::{ButtonState, GridPos, PixelBuffer, Rgba, ToolController, ToolKind};

fn blank() -> PixelBuffer {
    PixelBuffer::new(8, 8, Rgba::TRANSPARENT).unwrap()
}

fn cell(x: i32, y: i32) -> Option<GridPos> {
    Some(GridPos::new(x, y))
}

/// Press at `start`, hold over each of `path`, release at `end`
fn drag(
    tools: &mut ToolController,
    buffer: &mut PixelBuffer,
    start: Option<GridPos>,
    path: &[Option<GridPos>],
    end: Option<GridPos>,
) {
    tools.apply(buffer, start, ButtonState::PRESS, false);
    for &pos in path {
        tools.apply(buffer, pos, ButtonState::HOLD, false);
    }
    tools.apply(buffer, end, ButtonState::RELEASE, false);
}

#[test]
fn test_default_state() {
    let tools = ToolController::new();
    assert_eq!(tools.active_tool(), ToolKind::Brush);
    assert_eq!(tools.foreground(), Rgba::BLACK);
    assert_eq!(tools.background(), Rgba::WHITE);
    assert!(!tools.is_gesture_active());
}

#[test]
fn test_brush_press_paints_immediately() {
    let mut tools = ToolController::new();
    let mut buffer = blank();

    assert!(tools.apply(&mut buffer, cell(3, 4), ButtonState::PRESS, false));
    assert_eq!(buffer.get_pixel(3, 4), Rgba::BLACK);
    assert_eq!(tools.last_stroke_pixel(), cell(3, 4));
}

#[test]
fn test_brush_interpolates_between_samples() {
    let mut tools = ToolController::new();
    let mut buffer = blank();

    // Only the endpoints are sampled
    drag(&mut tools, &mut buffer, cell(0, 0), &[cell(3, 0)], cell(3, 0));

    let mut expected = blank();
    raster::draw_line(&mut expected, 0, 0, 3, 0, Rgba::BLACK);
    assert_eq!(buffer, expected);
}

#[test]
fn test_brush_hold_on_same_cell_is_not_a_change() {
    let mut tools = ToolController::new();
    let mut buffer = blank();

    tools.apply(&mut buffer, cell(1, 1), ButtonState::PRESS, false);
    assert!(!tools.apply(&mut buffer, cell(1, 1), ButtonState::HOLD, false));
}

#[test]
fn test_stroke_survives_leaving_the_canvas() {
    let mut tools = ToolController::new();
    let mut buffer = blank();

    tools.apply(&mut buffer, cell(1, 1), ButtonState::PRESS, false);
    // Off-canvas samples neither paint nor reset the stroke
    assert!(!tools.apply(&mut buffer, None, ButtonState::HOLD, false));
    assert_eq!(tools.last_stroke_pixel(), cell(1, 1));

    tools.apply(&mut buffer, cell(4, 1), ButtonState::HOLD, false);
    for x in 1..=4 {
        assert_eq!(buffer.get_pixel(x, 1), Rgba::BLACK);
    }
}

#[test]
fn test_idle_frame_ends_stroke() {
    let mut tools = ToolController::new();
    let mut buffer = blank();

    tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false);
    tools.apply(&mut buffer, cell(0, 0), ButtonState::IDLE, false);
    assert_eq!(tools.last_stroke_pixel(), None);

    // A hold without a recorded stroke pixel paints one point only
    tools.apply(&mut buffer, cell(5, 5), ButtonState::HOLD, false);
    assert_eq!(buffer.get_pixel(5, 5), Rgba::BLACK);
    assert_eq!(buffer.get_pixel(3, 3), Rgba::TRANSPARENT);
}

#[test]
fn test_eraser_paints_transparent() {
    let mut tools = ToolController::new();
    let mut buffer = PixelBuffer::new(8, 8, Rgba::RED).unwrap();

    tools.set_active_tool(ToolKind::Eraser);
    drag(&mut tools, &mut buffer, cell(0, 2), &[cell(2, 2)], cell(2, 2));

    for x in 0..=2 {
        assert_eq!(buffer.get_pixel(x, 2), Rgba::TRANSPARENT);
    }
    assert_eq!(buffer.get_pixel(3, 2), Rgba::RED);
}

#[test]
fn test_shape_commits_only_on_release() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    tools.set_active_tool(ToolKind::Line);

    assert!(!tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false));
    assert!(!tools.apply(&mut buffer, cell(5, 5), ButtonState::HOLD, false));
    assert!(buffer.pixels().iter().all(|p| p.is_transparent()));
    assert_eq!(tools.drag_anchor(), cell(0, 0));

    assert!(tools.apply(&mut buffer, cell(5, 5), ButtonState::RELEASE, false));
    for i in 0..=5 {
        assert_eq!(buffer.get_pixel(i, i), Rgba::BLACK);
    }
    assert!(!tools.is_gesture_active());
}

#[test]
fn test_rect_filled_release_off_canvas_uses_last_valid_cursor() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    tools.set_active_tool(ToolKind::RectFilled);

    drag(&mut tools, &mut buffer, cell(1, 1), &[cell(4, 4), None], None);

    let mut expected = blank();
    raster::fill_rectangle(&mut expected, 1, 1, 4, 4, Rgba::BLACK);
    assert_eq!(buffer, expected);
    assert_eq!(tools.last_valid_cursor(), None);
}

#[test]
fn test_release_without_valid_cell_discards_shape() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    tools.set_active_tool(ToolKind::RectOutline);

    // Press off-canvas never anchors
    drag(&mut tools, &mut buffer, None, &[cell(3, 3)], cell(3, 3));
    assert!(buffer.pixels().iter().all(|p| p.is_transparent()));
    assert!(!tools.is_gesture_active());
}

#[test]
fn test_circle_tools_use_drag_box() {
    let mut tools = ToolController::new();
    let mut buffer = PixelBuffer::new(12, 12, Rgba::TRANSPARENT).unwrap();
    tools.set_active_tool(ToolKind::CircleFilled);

    drag(&mut tools, &mut buffer, cell(2, 2), &[], cell(6, 4));

    let mut expected = PixelBuffer::new(12, 12, Rgba::TRANSPARENT).unwrap();
    raster::fill_circle(&mut expected, 4, 3, 2, Rgba::BLACK);
    assert_eq!(buffer, expected);
}

#[test]
fn test_tool_switch_mid_drag_discards_shape() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    tools.set_active_tool(ToolKind::Line);

    tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false);
    tools.apply(&mut buffer, cell(6, 6), ButtonState::HOLD, false);
    tools.set_active_tool(ToolKind::Brush);
    assert_eq!(tools.drag_anchor(), None);
    assert_eq!(tools.last_valid_cursor(), None);

    assert!(!tools.apply(&mut buffer, cell(6, 6), ButtonState::RELEASE, false));
    assert!(buffer.pixels().iter().all(|p| p.is_transparent()));
}

#[test]
fn test_selecting_same_tool_keeps_gesture() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    tools.set_active_tool(ToolKind::Line);

    tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false);
    tools.set_active_tool(ToolKind::Line);
    assert_eq!(tools.drag_anchor(), cell(0, 0));
}

#[test]
fn test_bucket_fill_on_press() {
    let mut tools = ToolController::new();
    let mut buffer = PixelBuffer::new(6, 6, Rgba::WHITE).unwrap();
    raster::draw_line(&mut buffer, 3, 0, 3, 5, Rgba::BLUE);

    tools.set_active_tool(ToolKind::BucketFill);
    tools.set_foreground(Rgba::RED);
    assert!(tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false));

    assert_eq!(buffer.get_pixel(2, 5), Rgba::RED);
    assert_eq!(buffer.get_pixel(3, 2), Rgba::BLUE);
    assert_eq!(buffer.get_pixel(4, 0), Rgba::WHITE);

    // Filling with the color already there changes nothing
    assert!(!tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false));
}

#[test]
fn test_eyedropper_tool() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    buffer.set_pixel(2, 2, Rgba::GREEN);
    tools.set_active_tool(ToolKind::Eyedropper);

    assert!(!tools.apply(&mut buffer, cell(2, 2), ButtonState::PRESS, false));
    assert_eq!(tools.foreground(), Rgba::GREEN);

    // Transparent cells are ignored
    tools.apply(&mut buffer, cell(0, 0), ButtonState::PRESS, false);
    assert_eq!(tools.foreground(), Rgba::GREEN);
}

#[test]
fn test_right_click_samples_with_any_tool() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    buffer.set_pixel(1, 1, Rgba::PURPLE);
    tools.set_active_tool(ToolKind::RectOutline);

    tools.apply(&mut buffer, cell(1, 1), ButtonState::IDLE, true);
    assert_eq!(tools.foreground(), Rgba::PURPLE);

    // Right-click on a transparent cell leaves the foreground alone
    tools.apply(&mut buffer, cell(5, 5), ButtonState::IDLE, true);
    assert_eq!(tools.foreground(), Rgba::PURPLE);

    // And off the canvas does nothing at all
    tools.apply(&mut buffer, None, ButtonState::IDLE, true);
    assert_eq!(tools.foreground(), Rgba::PURPLE);
}

#[test]
fn test_shape_preview() {
    let mut tools = ToolController::new();
    let mut buffer = blank();
    tools.set_active_tool(ToolKind::RectOutline);
    assert_eq!(tools.shape_preview(cell(1, 1)), None);

    tools.apply(&mut buffer, cell(1, 1), ButtonState::PRESS, false);
    tools.apply(&mut buffer, cell(4, 2), ButtonState::HOLD, false);

    let preview = tools.shape_preview(cell(5, 5)).unwrap();
    assert_eq!(preview.kind, ToolKind::RectOutline);
    assert_eq!(preview.anchor, GridPos::new(1, 1));
    assert_eq!(preview.end, GridPos::new(5, 5));

    // Off the canvas the preview holds at the last valid cell
    assert_eq!(tools.shape_preview(None).unwrap().end, GridPos::new(4, 2));
}

#[test]
fn test_color_history_and_swap() {
    let mut tools = ToolController::new();

    tools.set_foreground(Rgba::RED);
    tools.set_foreground(Rgba::RED);
    tools.set_foreground(Rgba::BLUE);
    assert_eq!(tools.foreground_history().len(), 3);
    assert_eq!(tools.foreground_history().latest(), Some(Rgba::BLUE));

    tools.swap_colors();
    assert_eq!(tools.foreground(), Rgba::WHITE);
    assert_eq!(tools.background(), Rgba::BLUE);
    assert_eq!(tools.background_history().latest(), Some(Rgba::BLUE));
}

#[test]
fn test_tool_descriptors() {
    assert_eq!(TOOL_DESCRIPTORS.len(), 9);
    for descriptor in &TOOL_DESCRIPTORS {
        assert_eq!(descriptor.kind.descriptor(), descriptor);
        assert_eq!(ToolKind::from_shortcut(descriptor.shortcut), Some(descriptor.kind));
    }

    assert_eq!(ToolKind::from_shortcut(Key::T), Some(ToolKind::RectFilled));
    assert_eq!(ToolKind::from_shortcut(Key::I), Some(ToolKind::Eyedropper));
    assert_eq!(ToolKind::from_shortcut(Key::Z), None);
    assert!(ToolKind::Eraser.is_stroke());
    assert!(ToolKind::CircleOutline.is_shape());
    assert!(!ToolKind::BucketFill.is_shape());
}
