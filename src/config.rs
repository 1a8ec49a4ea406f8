use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::camera::{DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
use crate::color::Rgba;
use crate::error::ConfigResult;

/// Startup settings for an editor session.
///
/// Missing fields take their default values when deserializing, so older
/// config files keep working.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: i32,
    pub canvas_height: i32,
    /// World units per canvas cell before zoom
    pub pixel_size: i32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub canvas_fill: Rgba,
    pub grid_visible: bool,
    pub palette_path: PathBuf,
    pub export_path: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 64,
            canvas_height: 64,
            pixel_size: 12,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            canvas_fill: Rgba::TRANSPARENT,
            grid_visible: true,
            palette_path: PathBuf::from("palettes/default.pal"),
            export_path: PathBuf::from("export.png"),
        }
    }
}

impl EditorConfig {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        Ok(config.validated())
    }

    /// Load `path`, falling back to defaults if it is missing or invalid
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(err) => {
                log::warn!("Using default config ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Replace out-of-range values with usable ones
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();

        if self.canvas_width <= 0 {
            self.canvas_width = defaults.canvas_width;
        }
        if self.canvas_height <= 0 {
            self.canvas_height = defaults.canvas_height;
        }
        if self.pixel_size <= 0 {
            self.pixel_size = defaults.pixel_size;
        }
        if self.min_zoom.is_nan() || self.min_zoom <= 0.0 {
            self.min_zoom = defaults.min_zoom;
        }
        if self.max_zoom.is_nan() || self.max_zoom <= 0.0 {
            self.max_zoom = defaults.max_zoom;
        }
        if self.min_zoom > self.max_zoom {
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }

        self
    }
}
