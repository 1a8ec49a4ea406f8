use egui::{Key, Pos2};

use crate::camera::{Camera, ZOOM_STEP};
use crate::canvas::{GridPos, PixelBuffer};
use crate::color::Rgba;
use crate::config::EditorConfig;
use crate::coords::CoordinateMapper;
use crate::error::{CanvasResult, ExportError};
use crate::input::InputSample;
use crate::palette::PaletteCollection;
use crate::tools::{ShapePreview, ToolController, ToolKind};

/// Colors bound to the number keys 1-6
pub const QUICK_COLORS: [(Key, Rgba); 6] = [
    (Key::Num1, Rgba::BLACK),
    (Key::Num2, Rgba::RED),
    (Key::Num3, Rgba::GREEN),
    (Key::Num4, Rgba::BLUE),
    (Key::Num5, Rgba::PURPLE),
    (Key::Num6, Rgba::WHITE),
];

/// One editor instance: the canvas and everything that acts on it.
///
/// Constructed explicitly and handed to the UI by reference; there is no
/// process-wide editor state.
#[derive(Debug)]
pub struct EditorSession {
    config: EditorConfig,
    canvas: PixelBuffer,
    tools: ToolController,
    camera: Camera,
    palettes: PaletteCollection,
    grid_visible: bool,
    /// Cell under the pointer during the last frame
    hover: Option<GridPos>,
    needs_centering: bool,
    status: Option<String>,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> CanvasResult<Self> {
        let canvas = PixelBuffer::new(config.canvas_width, config.canvas_height, config.canvas_fill)?;
        log::info!("Created {}x{} canvas", canvas.width(), canvas.height());

        Ok(Self {
            camera: Camera::new(config.min_zoom, config.max_zoom),
            grid_visible: config.grid_visible,
            canvas,
            tools: ToolController::new(),
            palettes: PaletteCollection::new(),
            hover: None,
            needs_centering: true,
            status: None,
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut PixelBuffer {
        &mut self.canvas
    }

    pub fn tools(&self) -> &ToolController {
        &self.tools
    }

    pub fn tools_mut(&mut self) -> &mut ToolController {
        &mut self.tools
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn palettes(&self) -> &PaletteCollection {
        &self.palettes
    }

    pub fn palettes_mut(&mut self) -> &mut PaletteCollection {
        &mut self.palettes
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
        self.config.grid_visible = visible;
    }

    pub fn hover(&self) -> Option<GridPos> {
        self.hover
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::from_camera(&self.camera, self.config.pixel_size)
    }

    pub fn shape_preview(&self) -> Option<ShapePreview> {
        self.tools.shape_preview(self.hover)
    }

    /// Center the canvas on `screen_center` if the camera was just created
    /// or reset.
    pub fn center_if_needed(&mut self, screen_center: Pos2) {
        if !self.needs_centering {
            return;
        }
        let size = self.config.pixel_size as f32;
        let world_center = Pos2::new(
            self.canvas.width() as f32 * size * 0.5,
            self.canvas.height() as f32 * size * 0.5,
        );
        self.camera.center_on(screen_center, world_center);
        self.needs_centering = false;
    }

    pub fn reset_camera(&mut self) {
        self.camera.reset();
        self.needs_centering = true;
    }

    /// Run one frame of pointer input: camera navigation first, then the
    /// active tool. Returns true if the canvas changed.
    pub fn frame(&mut self, input: &InputSample) -> bool {
        if let Some(pos) = input.pointer_pos {
            if input.scroll_delta.y > 0.0 {
                self.camera.zoom_at(ZOOM_STEP, pos);
            } else if input.scroll_delta.y < 0.0 {
                self.camera.zoom_at(1.0 / ZOOM_STEP, pos);
            }
        }

        let mapper = self.mapper();
        self.hover = input
            .pointer_pos
            .and_then(|pos| mapper.screen_to_grid(pos, &self.canvas));

        if input.is_panning() {
            self.camera.pan(input.pointer_delta);
            if self.tools.is_gesture_active() {
                self.tools.cancel_gesture();
            }
            return false;
        }

        self.tools
            .apply(&mut self.canvas, self.hover, input.primary, input.secondary_pressed)
    }

    /// Apply keyboard shortcuts. Returns true if the canvas changed.
    pub fn handle_keys(&mut self, input: &InputSample) -> bool {
        if input.modifiers.command {
            if input.is_key_pressed(Key::S) {
                self.save_palettes();
            }
            if input.is_key_pressed(Key::O) {
                self.load_palettes();
            }
            if input.is_key_pressed(Key::E) {
                self.export_canvas();
            }
            return false;
        }

        let mut changed = false;
        for key in &input.pressed_keys {
            if let Some(tool) = ToolKind::from_shortcut(*key) {
                self.tools.set_active_tool(tool);
                continue;
            }
            if let Some((_, color)) = QUICK_COLORS.iter().find(|(k, _)| k == key) {
                self.tools.set_foreground(*color);
                continue;
            }

            match key {
                Key::X => self.tools.swap_colors(),
                Key::C => {
                    self.clear_canvas();
                    changed = true;
                }
                Key::G => self.set_grid_visible(!self.grid_visible),
                Key::Num0 => self.reset_camera(),
                Key::OpenBracket => {
                    self.palettes.cycle_active(-1);
                }
                Key::CloseBracket => {
                    self.palettes.cycle_active(1);
                }
                _ => {}
            }
        }

        changed
    }

    pub fn clear_canvas(&mut self) {
        self.canvas.clear(Rgba::TRANSPARENT);
        self.tools.cancel_gesture();
        log::info!("Canvas cleared");
    }

    pub fn add_foreground_to_palette(&mut self) -> bool {
        let color = self.tools.foreground();
        self.add_to_palette(color, "Foreground")
    }

    pub fn add_background_to_palette(&mut self) -> bool {
        let color = self.tools.background();
        self.add_to_palette(color, "Background")
    }

    fn add_to_palette(&mut self, color: Rgba, slot: &str) -> bool {
        match self.palettes.add_color(color) {
            Ok(()) => {
                self.set_status(format!("{slot} added to palette"));
                true
            }
            Err(err) => {
                log::warn!("{slot} not added to palette: {}", err);
                self.set_status(err.to_string());
                false
            }
        }
    }

    pub fn create_palette(&mut self) -> bool {
        match self.palettes.create_palette("") {
            Ok(_) => {
                self.set_status("New palette created");
                true
            }
            Err(err) => {
                log::warn!("Failed to create palette: {}", err);
                self.set_status(err.to_string());
                false
            }
        }
    }

    pub fn save_palettes(&mut self) -> bool {
        match self.palettes.save_to_file(&self.config.palette_path) {
            Ok(()) => {
                self.set_status("Palette saved");
                true
            }
            Err(err) => {
                log::error!("Failed to save palette: {}", err);
                self.set_status("Failed to save palette");
                false
            }
        }
    }

    /// Replace the palettes with the contents of the palette file. On
    /// failure the current palettes are kept.
    pub fn load_palettes(&mut self) -> bool {
        match PaletteCollection::load_from_file(&self.config.palette_path) {
            Ok(palettes) => {
                self.palettes = palettes;
                self.set_status("Palette loaded");
                true
            }
            Err(err) => {
                log::warn!("Failed to load palette: {}", err);
                self.set_status("Failed to load palette");
                false
            }
        }
    }

    pub fn export_png(&self) -> Result<(), ExportError> {
        let image = self.canvas.to_rgba_image()?;
        image.save_with_format(&self.config.export_path, image::ImageFormat::Png)?;
        log::info!("Exported canvas to {}", self.config.export_path.display());
        Ok(())
    }

    pub fn export_canvas(&mut self) -> bool {
        match self.export_png() {
            Ok(()) => {
                self.set_status("Canvas exported");
                true
            }
            Err(err) => {
                log::error!("Failed to export canvas: {}", err);
                self.set_status("Failed to export canvas");
                false
            }
        }
    }
}
