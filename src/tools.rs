use egui::Key;
use serde::{Deserialize, Serialize};

use crate::canvas::{GridPos, PixelBuffer};
use crate::color::{ColorHistory, Rgba};
use crate::input::ButtonState;
use crate::raster::{self, CircleFromDrag};

/// Enum representing all available drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolKind {
    #[default]
    Brush,
    Eraser,
    Line,
    RectOutline,
    RectFilled,
    CircleOutline,
    CircleFilled,
    BucketFill,
    Eyedropper,
}

/// Static description of a tool for the tool panel and keyboard bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub kind: ToolKind,
    pub name: &'static str,
    pub shortcut: Key,
    pub shortcut_label: &'static str,
}

pub const TOOL_DESCRIPTORS: [ToolDescriptor; 9] = [
    ToolDescriptor { kind: ToolKind::Brush, name: "Brush", shortcut: Key::B, shortcut_label: "B" },
    ToolDescriptor { kind: ToolKind::Eraser, name: "Eraser", shortcut: Key::E, shortcut_label: "E" },
    ToolDescriptor { kind: ToolKind::Line, name: "Line", shortcut: Key::L, shortcut_label: "L" },
    ToolDescriptor { kind: ToolKind::RectOutline, name: "Rectangle (Outline)", shortcut: Key::R, shortcut_label: "R" },
    ToolDescriptor { kind: ToolKind::RectFilled, name: "Rectangle (Fill)", shortcut: Key::T, shortcut_label: "T" },
    ToolDescriptor { kind: ToolKind::CircleOutline, name: "Circle (Outline)", shortcut: Key::O, shortcut_label: "O" },
    ToolDescriptor { kind: ToolKind::CircleFilled, name: "Circle (Fill)", shortcut: Key::U, shortcut_label: "U" },
    ToolDescriptor { kind: ToolKind::BucketFill, name: "Bucket Fill", shortcut: Key::F, shortcut_label: "F" },
    ToolDescriptor { kind: ToolKind::Eyedropper, name: "Eyedropper", shortcut: Key::I, shortcut_label: "I" },
];

impl ToolKind {
    pub fn descriptor(self) -> &'static ToolDescriptor {
        // The table holds exactly one entry per variant, in declaration order.
        &TOOL_DESCRIPTORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn from_shortcut(key: Key) -> Option<Self> {
        TOOL_DESCRIPTORS
            .iter()
            .find(|d| d.shortcut == key)
            .map(|d| d.kind)
    }

    /// Brush and eraser paint continuously while the button is held
    pub fn is_stroke(self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }

    /// Shape tools anchor on press and commit once on release
    pub fn is_shape(self) -> bool {
        matches!(
            self,
            Self::Line | Self::RectOutline | Self::RectFilled | Self::CircleOutline | Self::CircleFilled
        )
    }
}

/// A shape gesture in progress, for preview rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapePreview {
    pub kind: ToolKind,
    pub anchor: GridPos,
    pub end: GridPos,
}

/// Active tool, paint colors and the transient gesture state.
///
/// One [`ToolController::apply`] call per frame drives the state machine.
/// Invalid cells (`None`) never write pixels and never corrupt the gesture.
#[derive(Debug, Clone)]
pub struct ToolController {
    active_tool: ToolKind,
    foreground: Rgba,
    background: Rgba,
    foreground_history: ColorHistory,
    background_history: ColorHistory,

    /// Press point of a shape gesture
    drag_anchor: Option<GridPos>,
    /// Last cell painted in the current brush/eraser stroke
    last_stroke_pixel: Option<GridPos>,
    /// Last cell the pointer was confirmed over during the gesture
    last_valid_cursor: Option<GridPos>,
}

impl Default for ToolController {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolController {
    pub fn new() -> Self {
        let mut foreground_history = ColorHistory::new();
        foreground_history.push(Rgba::BLACK);
        let mut background_history = ColorHistory::new();
        background_history.push(Rgba::WHITE);

        Self {
            active_tool: ToolKind::Brush,
            foreground: Rgba::BLACK,
            background: Rgba::WHITE,
            foreground_history,
            background_history,
            drag_anchor: None,
            last_stroke_pixel: None,
            last_valid_cursor: None,
        }
    }

    pub fn active_tool(&self) -> ToolKind {
        self.active_tool
    }

    /// Switch tools. Any gesture begun under the previous tool is dropped.
    pub fn set_active_tool(&mut self, tool: ToolKind) {
        if tool == self.active_tool {
            return;
        }
        log::debug!("Tool switched: {} -> {}", self.active_tool.name(), tool.name());
        self.active_tool = tool;
        self.reset_transient_state();
    }

    pub fn foreground(&self) -> Rgba {
        self.foreground
    }

    pub fn background(&self) -> Rgba {
        self.background
    }

    pub fn foreground_history(&self) -> &ColorHistory {
        &self.foreground_history
    }

    pub fn background_history(&self) -> &ColorHistory {
        &self.background_history
    }

    pub fn set_foreground(&mut self, color: Rgba) {
        if self.foreground == color {
            return;
        }
        self.foreground = color;
        self.foreground_history.push(color);
    }

    pub fn set_background(&mut self, color: Rgba) {
        if self.background == color {
            return;
        }
        self.background = color;
        self.background_history.push(color);
    }

    pub fn swap_colors(&mut self) {
        let (foreground, background) = (self.foreground, self.background);
        self.set_foreground(background);
        self.set_background(foreground);
    }

    pub fn drag_anchor(&self) -> Option<GridPos> {
        self.drag_anchor
    }

    pub fn last_stroke_pixel(&self) -> Option<GridPos> {
        self.last_stroke_pixel
    }

    pub fn last_valid_cursor(&self) -> Option<GridPos> {
        self.last_valid_cursor
    }

    pub fn is_gesture_active(&self) -> bool {
        self.drag_anchor.is_some() || self.last_stroke_pixel.is_some()
    }

    /// Abandon the current gesture without touching the canvas
    pub fn cancel_gesture(&mut self) {
        self.reset_transient_state();
    }

    fn reset_transient_state(&mut self) {
        self.drag_anchor = None;
        self.last_stroke_pixel = None;
        self.last_valid_cursor = None;
    }

    /// The pending shape, ending at `cursor` or the last valid cell.
    pub fn shape_preview(&self, cursor: Option<GridPos>) -> Option<ShapePreview> {
        if !self.active_tool.is_shape() {
            return None;
        }
        let anchor = self.drag_anchor?;
        let end = cursor.or(self.last_valid_cursor)?;
        Some(ShapePreview { kind: self.active_tool, anchor, end })
    }

    /// Copy the color under `cell` into the foreground. Fully transparent
    /// samples are ignored.
    pub fn sample(&mut self, buffer: &PixelBuffer, cell: GridPos) -> bool {
        let sampled = buffer.get_pixel(cell.x, cell.y);
        if sampled.a == 0 {
            return false;
        }
        self.set_foreground(sampled);
        true
    }

    /// Process one frame of input. Returns true if the buffer changed.
    ///
    /// `cell` is the grid cell under the pointer, or `None` when the pointer
    /// is not over the canvas.
    pub fn apply(
        &mut self,
        buffer: &mut PixelBuffer,
        cell: Option<GridPos>,
        primary: ButtonState,
        secondary_pressed: bool,
    ) -> bool {
        let mut updated = false;

        if secondary_pressed {
            if let Some(cell) = cell {
                self.sample(buffer, cell);
            }
        }

        if primary.pressed {
            updated |= self.on_press(buffer, cell);
        } else if primary.down {
            updated |= self.on_hold(buffer, cell);
        }

        if primary.released {
            updated |= self.on_release(buffer, cell);
        } else if !primary.down {
            self.last_stroke_pixel = None;
        }

        updated
    }

    fn on_press(&mut self, buffer: &mut PixelBuffer, cell: Option<GridPos>) -> bool {
        let Some(cell) = cell else {
            return false;
        };

        self.last_valid_cursor = Some(cell);

        match self.active_tool {
            ToolKind::Brush | ToolKind::Eraser => {
                buffer.set_pixel(cell.x, cell.y, self.stroke_color());
                self.last_stroke_pixel = Some(cell);
                true
            }
            ToolKind::BucketFill => {
                let target = buffer.get_pixel(cell.x, cell.y);
                let changed = raster::flood_fill(buffer, cell.x, cell.y, target, self.foreground);
                log::debug!("Bucket fill at ({}, {}): changed={}", cell.x, cell.y, changed);
                changed
            }
            ToolKind::Eyedropper => {
                self.sample(buffer, cell);
                false
            }
            _ => {
                self.drag_anchor = Some(cell);
                false
            }
        }
    }

    fn on_hold(&mut self, buffer: &mut PixelBuffer, cell: Option<GridPos>) -> bool {
        let Some(cell) = cell else {
            return false;
        };

        self.last_valid_cursor = Some(cell);

        if !self.active_tool.is_stroke() {
            return false;
        }

        let color = self.stroke_color();
        match self.last_stroke_pixel {
            Some(last) if last == cell => return false,
            Some(last) => raster::draw_line(buffer, last.x, last.y, cell.x, cell.y, color),
            None => buffer.set_pixel(cell.x, cell.y, color),
        }
        self.last_stroke_pixel = Some(cell);
        true
    }

    fn on_release(&mut self, buffer: &mut PixelBuffer, cell: Option<GridPos>) -> bool {
        let mut updated = false;

        if let Some(anchor) = self.drag_anchor {
            if let Some(end) = cell.or(self.last_valid_cursor) {
                updated = self.commit_shape(buffer, anchor, end);
            }
        }

        self.reset_transient_state();
        updated
    }

    fn commit_shape(&self, buffer: &mut PixelBuffer, start: GridPos, end: GridPos) -> bool {
        let committed = rasterize_shape(buffer, self.active_tool, start, end, self.foreground);
        if committed {
            log::debug!(
                "Committed {} from ({}, {}) to ({}, {})",
                self.active_tool.name(),
                start.x,
                start.y,
                end.x,
                end.y
            );
        }
        committed
    }

    fn stroke_color(&self) -> Rgba {
        match self.active_tool {
            ToolKind::Eraser => Rgba::TRANSPARENT,
            _ => self.foreground,
        }
    }
}

/// Rasterize one shape gesture from `start` to `end`. Returns false for
/// tools that are not shape tools.
pub fn rasterize_shape(
    buffer: &mut PixelBuffer,
    kind: ToolKind,
    start: GridPos,
    end: GridPos,
    color: Rgba,
) -> bool {
    match kind {
        ToolKind::Line => raster::draw_line(buffer, start.x, start.y, end.x, end.y, color),
        ToolKind::RectOutline => {
            raster::draw_rectangle_outline(buffer, start.x, start.y, end.x, end.y, color)
        }
        ToolKind::RectFilled => raster::fill_rectangle(buffer, start.x, start.y, end.x, end.y, color),
        ToolKind::CircleOutline => {
            let circle = CircleFromDrag::new(start, end);
            raster::draw_circle_outline(buffer, circle.center.x, circle.center.y, circle.radius, color)
        }
        ToolKind::CircleFilled => {
            let circle = CircleFromDrag::new(start, end);
            raster::fill_circle(buffer, circle.center.x, circle.center.y, circle.radius, color)
        }
        _ => return false,
    }
    true
}
