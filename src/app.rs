use egui::{Color32, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions, Vec2};

use crate::canvas::{GridPos, PixelBuffer};
use crate::color::{Hsv, Rgba};
use crate::config::EditorConfig;
use crate::coords::CoordinateMapper;
use crate::error::CanvasResult;
use crate::input::InputSample;
use crate::session::EditorSession;
use crate::tools::{self, TOOL_DESCRIPTORS};

/// Key for the editor config in eframe storage
pub const CONFIG_KEY: &str = "pixel_paint_config";

const VIEW_BACKGROUND: Color32 = Color32::from_rgb(45, 45, 48);
const CHECKER_LIGHT: Color32 = Color32::from_gray(200);
const CHECKER_DARK: Color32 = Color32::from_gray(160);
const GRID_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 40);
const HOVER_COLOR: Color32 = Color32::from_rgb(33, 150, 243);
const SWATCH_SIZE: f32 = 18.0;
/// Grid lines are hidden once cells get smaller than this on screen
const MIN_GRID_CELL: f32 = 4.0;

pub struct PixelPaintApp {
    session: EditorSession,
    texture: Option<TextureHandle>,
    texture_dirty: bool,
    /// True while a primary press that began over the canvas view is held
    view_owns_pointer: bool,
}

impl PixelPaintApp {
    /// Called once before the first frame.
    ///
    /// A config passed in (from a config file) wins over the one restored
    /// from eframe storage.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<EditorConfig>) -> CanvasResult<Self> {
        let config = config
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value::<EditorConfig>(storage, CONFIG_KEY))
            })
            .unwrap_or_default()
            .validated();

        let mut session = EditorSession::new(config)?;
        if session.config().palette_path.exists() {
            session.load_palettes();
        }

        Ok(Self {
            session,
            texture: None,
            texture_dirty: true,
            view_owns_pointer: false,
        })
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    fn tools_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tools");

        let active = self.session.tools().active_tool();
        for descriptor in &TOOL_DESCRIPTORS {
            let label = format!("{} [{}]", descriptor.name, descriptor.shortcut_label);
            if ui.selectable_label(active == descriptor.kind, label).clicked() {
                log::info!("Tool selected from UI: {}", descriptor.name);
                self.session.tools_mut().set_active_tool(descriptor.kind);
            }
        }

        ui.separator();
        self.colors_section(ui);

        ui.separator();
        self.palette_section(ui);

        ui.separator();
        if ui.button("Clear canvas [C]").clicked() {
            self.session.clear_canvas();
            self.texture_dirty = true;
        }
        let mut grid_visible = self.session.grid_visible();
        if ui.checkbox(&mut grid_visible, "Grid [G]").changed() {
            self.session.set_grid_visible(grid_visible);
        }
        if ui.button("Export PNG [Ctrl+E]").clicked() {
            self.session.export_canvas();
        }

        ui.separator();
        let canvas = self.session.canvas();
        ui.label(format!("Canvas: {}x{}", canvas.width(), canvas.height()));
        ui.label(format!("Zoom: {}%", self.session.camera().zoom_percent()));
        match self.session.hover() {
            Some(cell) => ui.label(format!("Cell: {}, {}", cell.x, cell.y)),
            None => ui.label("Cell: -"),
        };
        if let Some(status) = self.session.status() {
            ui.label(status);
        }
    }

    fn colors_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Colors");

        let tools = self.session.tools_mut();
        ui.horizontal(|ui| {
            ui.label("Foreground:");
            let mut color = Color32::from(tools.foreground());
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::OnlyBlend,
            )
            .changed()
            {
                tools.set_foreground(Rgba::from(color));
            }
        });
        ui.horizontal(|ui| {
            ui.label("Background:");
            let mut color = Color32::from(tools.background());
            if egui::color_picker::color_edit_button_srgba(
                ui,
                &mut color,
                egui::color_picker::Alpha::OnlyBlend,
            )
            .changed()
            {
                tools.set_background(Rgba::from(color));
            }
        });
        if ui.button("Swap [X]").clicked() {
            tools.swap_colors();
        }
        let hsv = Hsv::from_rgba(tools.foreground());
        ui.label(format!(
            "H {:.0}  S {:.0}%  V {:.0}%",
            hsv.h * 360.0,
            hsv.s * 100.0,
            hsv.v * 100.0
        ));

        ui.label("Recent:");
        let recent: Vec<Rgba> = tools.foreground_history().iter().copied().collect();
        ui.horizontal_wrapped(|ui| {
            for color in recent {
                let response = swatch(ui, color);
                if response.clicked() {
                    tools.set_foreground(color);
                } else if response.secondary_clicked() {
                    tools.set_background(color);
                }
            }
        });
    }

    fn palette_section(&mut self, ui: &mut egui::Ui) {
        ui.strong("Palette");

        ui.horizontal(|ui| {
            if ui.small_button("<").clicked() {
                self.session.palettes_mut().cycle_active(-1);
            }
            let palettes = self.session.palettes();
            ui.label(format!(
                "{} ({}/{})",
                palettes.active().name(),
                palettes.active_index() + 1,
                palettes.len()
            ));
            if ui.small_button(">").clicked() {
                self.session.palettes_mut().cycle_active(1);
            }
        });

        ui.horizontal(|ui| {
            if ui.button("New").clicked() {
                self.session.create_palette();
            }
            if ui.button("+ FG").clicked() {
                self.session.add_foreground_to_palette();
            }
            if ui.button("+ BG").clicked() {
                self.session.add_background_to_palette();
            }
        });
        ui.horizontal(|ui| {
            if ui.button("Save [Ctrl+S]").clicked() {
                self.session.save_palettes();
            }
            if ui.button("Load [Ctrl+O]").clicked() {
                self.session.load_palettes();
            }
        });

        let colors = self.session.palettes().active().colors().to_vec();
        let tools = self.session.tools_mut();
        ui.horizontal_wrapped(|ui| {
            for color in colors {
                let response = swatch(ui, color);
                if response.clicked() {
                    tools.set_foreground(color);
                } else if response.secondary_clicked() {
                    tools.set_background(color);
                }
            }
        });
    }

    fn canvas_view(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, mut input: InputSample) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let view = response.rect;
        self.session.center_if_needed(view.center());

        // Presses that start over the side panel never reach the tools, but
        // a press that started here is always allowed to release.
        let over_view = input.pointer_pos.is_some_and(|pos| view.contains(pos));
        if input.primary.pressed {
            self.view_owns_pointer = over_view;
        }
        if !self.view_owns_pointer {
            input.suppress_primary();
        }
        if !over_view {
            input.secondary_pressed = false;
            input.scroll_delta = Vec2::ZERO;
        }
        if input.primary.released {
            self.view_owns_pointer = false;
        }

        if self.session.frame(&input) {
            self.texture_dirty = true;
        }

        self.upload_canvas(ctx);

        let mapper = self.session.mapper();
        let canvas = self.session.canvas();
        let canvas_rect = mapper.canvas_screen_rect(canvas);

        painter.rect_filled(view, 0.0, VIEW_BACKGROUND);
        paint_checkerboard(&painter, &mapper, canvas, view);
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                canvas_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        if self.session.grid_visible() {
            paint_grid(&painter, &mapper, canvas, canvas_rect);
        }
        painter.rect_stroke(canvas_rect, 0.0, Stroke::new(1.0, Color32::from_gray(100)));

        if let Some(cell) = self.session.hover() {
            painter.rect_stroke(
                mapper.grid_to_screen_rect(cell),
                0.0,
                Stroke::new(1.0, HOVER_COLOR),
            );
        }
        if let Some(preview) = self.session.shape_preview() {
            painter.rect_stroke(
                mapper.grid_to_screen_rect(preview.anchor),
                0.0,
                Stroke::new(1.0, Color32::WHITE),
            );
        }
    }

    /// Upload the canvas to the GPU, drawing the pending shape into a copy so
    /// the buffer itself only changes on release.
    fn upload_canvas(&mut self, ctx: &egui::Context) {
        let image = match self.session.shape_preview() {
            Some(preview) => {
                let mut scratch = self.session.canvas().clone();
                tools::rasterize_shape(
                    &mut scratch,
                    preview.kind,
                    preview.anchor,
                    preview.end,
                    self.session.tools().foreground(),
                );
                // Re-upload the real buffer once the gesture ends.
                self.texture_dirty = true;
                scratch.to_color_image()
            }
            None if self.texture_dirty || self.texture.is_none() => {
                self.texture_dirty = false;
                self.session.canvas().to_color_image()
            }
            None => return,
        };

        match &mut self.texture {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => self.texture = Some(ctx.load_texture("canvas", image, TextureOptions::NEAREST)),
        }
    }
}

impl eframe::App for PixelPaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, self.session.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let input = InputSample::from_egui(ctx);

        // Text fields in the color pickers own the keyboard while focused.
        if !ctx.wants_keyboard_input() && self.session.handle_keys(&input) {
            self.texture_dirty = true;
        }

        egui::SidePanel::left("tools_panel")
            .resizable(true)
            .default_width(200.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| self.tools_panel(ui));
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.canvas_view(ctx, ui, input));
    }
}

/// A small clickable color square
fn swatch(ui: &mut egui::Ui, color: Rgba) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(SWATCH_SIZE), Sense::click());

    if ui.is_rect_visible(rect) {
        ui.painter().rect_filled(rect, 2.0, Color32::from(color));
        let border = if response.hovered() {
            Color32::WHITE
        } else {
            Color32::from_gray(90)
        };
        ui.painter().rect_stroke(rect, 2.0, Stroke::new(1.0, border));
    }

    response.on_hover_text(format!("{}, {}, {}, {}", color.r, color.g, color.b, color.a))
}

/// Cells of `canvas` that intersect `view`, as half-open column and row ranges
fn visible_cells(
    mapper: &CoordinateMapper,
    canvas: &PixelBuffer,
    view: Rect,
) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
    let min = mapper.screen_to_world(view.min);
    let max = mapper.screen_to_world(view.max);
    let size = mapper.pixel_size;

    let first = |v: f32, limit: i32| ((v / size).floor() as i32).clamp(0, limit);
    let last = |v: f32, limit: i32| ((v / size).ceil() as i32).clamp(0, limit);

    (
        first(min.x, canvas.width())..last(max.x, canvas.width()),
        first(min.y, canvas.height())..last(max.y, canvas.height()),
    )
}

/// Transparency backdrop, one checker square per cell
fn paint_checkerboard(
    painter: &egui::Painter,
    mapper: &CoordinateMapper,
    canvas: &PixelBuffer,
    view: Rect,
) {
    let (columns, rows) = visible_cells(mapper, canvas, view);
    for y in rows {
        for x in columns.clone() {
            let color = if (x + y) % 2 == 0 { CHECKER_LIGHT } else { CHECKER_DARK };
            painter.rect_filled(mapper.grid_to_screen_rect(GridPos::new(x, y)), 0.0, color);
        }
    }
}

fn paint_grid(painter: &egui::Painter, mapper: &CoordinateMapper, canvas: &PixelBuffer, canvas_rect: Rect) {
    let cell = mapper.pixel_size * mapper.zoom;
    if cell < MIN_GRID_CELL {
        return;
    }

    let stroke = Stroke::new(1.0, GRID_COLOR);
    for x in 0..=canvas.width() {
        let sx = canvas_rect.min.x + x as f32 * cell;
        painter.line_segment([Pos2::new(sx, canvas_rect.min.y), Pos2::new(sx, canvas_rect.max.y)], stroke);
    }
    for y in 0..=canvas.height() {
        let sy = canvas_rect.min.y + y as f32 * cell;
        painter.line_segment([Pos2::new(canvas_rect.min.x, sy), Pos2::new(canvas_rect.max.x, sy)], stroke);
    }
}
