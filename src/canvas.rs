use crate::color::Rgba;
use crate::error::{CanvasError, CanvasResult, ExportError};
use image::RgbaImage;

/// Integer address of one canvas cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Fixed-size grid of RGBA cells, stored row-major.
///
/// Out-of-range reads return [`Rgba::TRANSPARENT`] and out-of-range writes
/// are ignored, so every raster routine can clip by simply writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    /// Allocate a `width` x `height` buffer with every cell set to `fill`.
    pub fn new(width: i32, height: i32, fill: Rgba) -> CanvasResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(CanvasError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Overwrite every cell with `color`.
    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.contains(x, y)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = color;
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Rgba {
        self.index(x, y)
            .map(|index| self.pixels[index])
            .unwrap_or(Rgba::TRANSPARENT)
    }

    /// Raw row-major cell slice, length `width * height`.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Visit every cell as `(pos, color)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (GridPos, Rgba)> + '_ {
        let width = self.width as usize;
        self.pixels.iter().enumerate().map(move |(i, color)| {
            (GridPos::new((i % width) as i32, (i / width) as i32), *color)
        })
    }

    /// Straight-alpha RGBA bytes, four per cell.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied(
            [self.width as usize, self.height as usize],
            &self.to_rgba_bytes(),
        )
    }

    pub fn to_rgba_image(&self) -> Result<RgbaImage, ExportError> {
        let (width, height) = (self.width as u32, self.height as u32);
        RgbaImage::from_raw(width, height, self.to_rgba_bytes())
            .ok_or(ExportError::SizeMismatch { width, height })
    }
}
