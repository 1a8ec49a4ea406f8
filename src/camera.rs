use egui::{Pos2, Vec2};

pub const DEFAULT_ZOOM: f32 = 1.0;
pub const DEFAULT_MIN_ZOOM: f32 = 0.25;
pub const DEFAULT_MAX_ZOOM: f32 = 8.0;
/// Zoom multiplier applied per mouse-wheel notch
pub const ZOOM_STEP: f32 = 1.1;

/// Pan/zoom viewport over world space.
///
/// `offset` is the screen position of the world origin, so
/// `screen = world * zoom + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}

impl Camera {
    pub fn new(min_zoom: f32, max_zoom: f32) -> Self {
        let mut camera = Self {
            offset: Vec2::ZERO,
            zoom: DEFAULT_ZOOM,
            min_zoom: min_zoom.min(max_zoom),
            max_zoom: max_zoom.max(min_zoom),
        };
        camera.clamp_zoom();
        camera
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen - self.offset.to_pos2()) / self.zoom).to_pos2()
    }

    pub fn world_to_screen(&self, world: Pos2) -> Pos2 {
        (world.to_vec2() * self.zoom + self.offset).to_pos2()
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn clamp_zoom(&mut self) {
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Scale by `factor` while keeping the world point under `center` fixed.
    pub fn zoom_at(&mut self, factor: f32, center: Pos2) {
        let world_before = self.screen_to_world(center);
        self.zoom *= factor;
        self.clamp_zoom();
        self.offset = center.to_vec2() - world_before.to_vec2() * self.zoom;
    }

    /// Place `world` at `screen` without changing the zoom.
    pub fn center_on(&mut self, screen: Pos2, world: Pos2) {
        self.offset = screen.to_vec2() - world.to_vec2() * self.zoom;
    }

    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = DEFAULT_ZOOM;
        self.clamp_zoom();
    }

    pub fn zoom_percent(&self) -> i32 {
        (self.zoom * 100.0) as i32
    }
}
