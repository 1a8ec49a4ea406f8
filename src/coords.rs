use egui::{Pos2, Rect, Vec2};

use crate::camera::Camera;
use crate::canvas::{GridPos, PixelBuffer};

/// Converts between screen, world and grid space for one frame.
///
/// World space is the camera-independent space in which one canvas cell is
/// `pixel_size` units wide. The mapper is a plain value built from the
/// camera each frame; it keeps nothing between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub pan: Vec2,
    pub zoom: f32,
    pub pixel_size: f32,
}

impl CoordinateMapper {
    pub fn new(pan: Vec2, zoom: f32, pixel_size: f32) -> Self {
        Self { pan, zoom, pixel_size }
    }

    pub fn from_camera(camera: &Camera, pixel_size: i32) -> Self {
        Self::new(camera.offset, camera.zoom, pixel_size as f32)
    }

    pub fn screen_to_world(&self, screen: Pos2) -> Pos2 {
        ((screen - self.pan.to_pos2()) / self.zoom).to_pos2()
    }

    /// Resolve a world point to the cell under it.
    ///
    /// Uses floor division so points left of or above the origin never alias
    /// to column or row 0.
    pub fn world_to_grid(&self, world: Pos2, buffer: &PixelBuffer) -> Option<GridPos> {
        world_to_grid(world, self.pixel_size, buffer)
    }

    pub fn screen_to_grid(&self, screen: Pos2, buffer: &PixelBuffer) -> Option<GridPos> {
        if self.zoom <= 0.0 {
            return None;
        }
        self.world_to_grid(self.screen_to_world(screen), buffer)
    }

    /// On-screen rectangle covered by one cell.
    pub fn grid_to_screen_rect(&self, cell: GridPos) -> Rect {
        let world = grid_to_world_rect(cell, self.pixel_size);
        Rect::from_min_max(
            (world.min.to_vec2() * self.zoom + self.pan).to_pos2(),
            (world.max.to_vec2() * self.zoom + self.pan).to_pos2(),
        )
    }

    /// On-screen rectangle covered by the whole canvas.
    pub fn canvas_screen_rect(&self, buffer: &PixelBuffer) -> Rect {
        let cell = self.pixel_size * self.zoom;
        Rect::from_min_size(
            self.pan.to_pos2(),
            Vec2::new(buffer.width() as f32 * cell, buffer.height() as f32 * cell),
        )
    }
}

/// Floor a world point into grid space and validate it against `buffer`.
pub fn world_to_grid(world: Pos2, pixel_size: f32, buffer: &PixelBuffer) -> Option<GridPos> {
    if pixel_size <= 0.0 || !world.x.is_finite() || !world.y.is_finite() {
        return None;
    }

    let x = (world.x / pixel_size).floor();
    let y = (world.y / pixel_size).floor();
    if x < 0.0 || y < 0.0 {
        return None;
    }

    let (x, y) = (x as i32, y as i32);
    buffer.contains(x, y).then_some(GridPos::new(x, y))
}

/// World-space rectangle covered by one cell.
pub fn grid_to_world_rect(cell: GridPos, pixel_size: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(cell.x as f32 * pixel_size, cell.y as f32 * pixel_size),
        Vec2::splat(pixel_size),
    )
}
