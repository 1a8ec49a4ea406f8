use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Straight (non-premultiplied) 8-bit RGBA color stored in every canvas cell.
///
/// Equality is exact and component-wise; there is no tolerance anywhere in
/// the raster code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const RED: Self = Self::new(230, 41, 55, 255);
    pub const GREEN: Self = Self::new(0, 228, 48, 255);
    pub const BLUE: Self = Self::new(0, 121, 241, 255);
    pub const PURPLE: Self = Self::new(200, 122, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl From<Rgba> for Color32 {
    fn from(color: Rgba) -> Self {
        Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
    }
}

impl From<Color32> for Rgba {
    fn from(color: Color32) -> Self {
        Self::from(color.to_srgba_unmultiplied())
    }
}

/// Hue/saturation/value triple with every component normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Convert an RGB color, ignoring alpha. Gray colors get a hue of 0.
    pub fn from_rgba(color: Rgba) -> Self {
        let r = color.r as f32 / 255.0;
        let g = color.g as f32 / 255.0;
        let b = color.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let mut h = 0.0;
        if delta > 0.00001 {
            h = if max == r {
                ((g - b) / delta) % 6.0
            } else if max == g {
                (b - r) / delta + 2.0
            } else {
                (r - g) / delta + 4.0
            };
            h /= 6.0;
            if h < 0.0 {
                h += 1.0;
            }
        }

        let s = if max <= 0.0 { 0.0 } else { delta / max };

        Self {
            h: h.clamp(0.0, 1.0),
            s: s.clamp(0.0, 1.0),
            v: max.clamp(0.0, 1.0),
        }
    }

    /// Convert back to RGBA with the given alpha in `[0, 1]`.
    pub fn to_rgba(self, alpha: f32) -> Rgba {
        let h = self.h.clamp(0.0, 1.0);
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);
        let alpha = alpha.clamp(0.0, 1.0);

        let hh = h * 6.0;
        let sector = hh.floor() as i32;
        let f = hh - sector as f32;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        let (r, g, b) = match sector % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        let to_byte = |c: f32| (c * 255.0).round() as u8;
        Rgba::new(to_byte(r), to_byte(g), to_byte(b), to_byte(alpha))
    }
}

pub const COLOR_HISTORY_CAPACITY: usize = 16;

/// Most-recent-last list of colors a slot has held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorHistory {
    entries: VecDeque<Rgba>,
}

impl ColorHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(COLOR_HISTORY_CAPACITY),
        }
    }

    /// Record a color. Repeating the newest entry is ignored; when full the
    /// oldest entry is evicted.
    pub fn push(&mut self, color: Rgba) {
        if self.entries.back() == Some(&color) {
            return;
        }
        if self.entries.len() == COLOR_HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(color);
    }

    pub fn latest(&self) -> Option<Rgba> {
        self.entries.back().copied()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Rgba> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_of_primaries() {
        let red = Hsv::from_rgba(Rgba::opaque(255, 0, 0));
        assert_eq!(red, Hsv::new(0.0, 1.0, 1.0));

        let green = Hsv::from_rgba(Rgba::opaque(0, 255, 0));
        assert!((green.h - 1.0 / 3.0).abs() < 0.0001);

        let gray = Hsv::from_rgba(Rgba::opaque(128, 128, 128));
        assert_eq!(gray.h, 0.0);
        assert_eq!(gray.s, 0.0);
    }

    #[test]
    fn test_hsv_back_to_rgba() {
        for color in [Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::PURPLE, Rgba::WHITE, Rgba::BLACK] {
            let hsv = Hsv::from_rgba(color);
            assert_eq!(hsv.to_rgba(1.0), color, "round trip of {:?}", color);
        }
        // Hue 1.0 wraps back to red
        assert_eq!(Hsv::new(1.0, 1.0, 1.0).to_rgba(0.0), Rgba::new(255, 0, 0, 0));
    }

    #[test]
    fn test_history_skips_repeats_and_evicts_oldest() {
        let mut history = ColorHistory::new();
        history.push(Rgba::BLACK);
        history.push(Rgba::BLACK);
        assert_eq!(history.len(), 1);

        for i in 0..COLOR_HISTORY_CAPACITY as u8 {
            history.push(Rgba::opaque(i + 1, 0, 0));
        }
        assert_eq!(history.len(), COLOR_HISTORY_CAPACITY);
        assert_eq!(history.iter().next(), Some(&Rgba::opaque(1, 0, 0)));
        assert_eq!(history.latest(), Some(Rgba::opaque(COLOR_HISTORY_CAPACITY as u8, 0, 0)));
    }

    #[test]
    fn test_color32_conversion_keeps_straight_alpha() {
        let color = Rgba::new(10, 20, 30, 255);
        assert_eq!(Rgba::from(Color32::from(color)), color);
        assert_eq!(Rgba::from(Color32::TRANSPARENT), Rgba::TRANSPARENT);
    }
}
