use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::color::Rgba;
use crate::error::{PaletteError, PaletteResult};

pub const MAX_PALETTES: usize = 8;
pub const MAX_PALETTE_COLORS: usize = 64;
pub const MAX_PALETTE_NAME_LENGTH: usize = 63;
pub const DEFAULT_PALETTE_NAME: &str = "Default";

/// A named list of distinct colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    name: String,
    colors: Vec<Rgba>,
}

impl Palette {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.chars().take(MAX_PALETTE_NAME_LENGTH).collect(),
            colors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    pub fn is_full(&self) -> bool {
        self.colors.len() >= MAX_PALETTE_COLORS
    }

    pub fn add_color(&mut self, color: Rgba) -> PaletteResult<()> {
        if self.is_full() {
            return Err(PaletteError::PaletteFull);
        }
        if self.colors.contains(&color) {
            return Err(PaletteError::DuplicateColor);
        }
        self.colors.push(color);
        Ok(())
    }
}

/// The set of palettes the user can switch between.
///
/// Never empty: there is always an active palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteCollection {
    palettes: Vec<Palette>,
    active: usize,
}

impl Default for PaletteCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteCollection {
    pub fn new() -> Self {
        Self {
            palettes: vec![Palette::new(DEFAULT_PALETTE_NAME)],
            active: 0,
        }
    }

    pub fn palettes(&self) -> &[Palette] {
        &self.palettes
    }

    pub fn len(&self) -> usize {
        self.palettes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palettes.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> &Palette {
        &self.palettes[self.active]
    }

    pub fn active_mut(&mut self) -> &mut Palette {
        &mut self.palettes[self.active]
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.palettes.len() {
            return false;
        }
        self.active = index;
        true
    }

    /// Move the active palette by `direction`, wrapping around. Returns
    /// false if the active palette did not change.
    pub fn cycle_active(&mut self, direction: i32) -> bool {
        let count = self.palettes.len() as i32;
        let index = (self.active as i32 + direction).rem_euclid(count) as usize;
        if index == self.active {
            return false;
        }
        self.active = index;
        true
    }

    /// Append a palette and make it active. An empty name becomes
    /// "Palette N".
    pub fn create_palette(&mut self, name: &str) -> PaletteResult<usize> {
        if self.palettes.len() >= MAX_PALETTES {
            return Err(PaletteError::CollectionFull);
        }

        let name = name.trim();
        let palette = if name.is_empty() {
            Palette::new(&format!("Palette {}", self.palettes.len() + 1))
        } else {
            Palette::new(name)
        };

        self.palettes.push(palette);
        self.active = self.palettes.len() - 1;
        Ok(self.active)
    }

    /// Add a color to the active palette
    pub fn add_color(&mut self, color: Rgba) -> PaletteResult<()> {
        self.active_mut().add_color(color)
    }

    /// Remove every color but keep the palettes themselves
    pub fn clear(&mut self) {
        for palette in &mut self.palettes {
            palette.colors.clear();
        }
    }

    /// Serialize to the `.pal` text format
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("# Pixel Art Tool palette file\n");
        out.push_str("# Format:\n# palette <name>\n# color r g b a\n");

        for palette in self.palettes.iter().filter(|p| !p.name.is_empty()) {
            let _ = writeln!(out, "palette {}", palette.name);
            for color in &palette.colors {
                let _ = writeln!(out, "color {} {} {} {}", color.r, color.g, color.b, color.a);
            }
            out.push('\n');
        }

        out
    }

    /// Parse the `.pal` text format.
    ///
    /// Unknown and malformed lines are skipped. Colors that appear before any
    /// `palette` line go into a palette named "Loaded". Palettes beyond the
    /// collection limit are dropped along with their colors.
    pub fn parse(text: &str) -> Self {
        let mut palettes: Vec<Palette> = Vec::new();
        let mut skipping = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(name) = keyword_rest(line, "palette") {
                skipping = palettes.len() >= MAX_PALETTES;
                if !skipping {
                    palettes.push(Palette::new(name));
                }
                continue;
            }

            if let Some(rest) = keyword_rest(line, "color") {
                if skipping {
                    continue;
                }
                if palettes.is_empty() {
                    palettes.push(Palette::new("Loaded"));
                }
                if let (Some(color), Some(palette)) = (parse_color(rest), palettes.last_mut()) {
                    // Full palettes and duplicates are dropped silently while loading.
                    let _ = palette.add_color(color);
                }
            }
        }

        if palettes.is_empty() {
            return Self::new();
        }

        Self { palettes, active: 0 }
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> PaletteResult<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(PaletteError::EmptyPath);
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_text())?;

        log::info!("Saved {} palette(s) to {}", self.palettes.len(), path.display());
        Ok(())
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> PaletteResult<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(PaletteError::EmptyPath);
        }

        let text = fs::read_to_string(path)?;
        let collection = Self::parse(&text);
        log::info!("Loaded {} palette(s) from {}", collection.len(), path.display());
        Ok(collection)
    }
}

/// If `line` is `keyword` followed by whitespace, return the trimmed rest
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim())
}

/// `r g b [a]`, each channel clamped to 255 and alpha defaulting to opaque
fn parse_color(text: &str) -> Option<Rgba> {
    let values: Vec<u32> = text
        .split_whitespace()
        .take(4)
        .map_while(|v| v.parse().ok())
        .collect();

    if values.len() < 3 {
        return None;
    }

    let channel = |v: u32| v.min(255) as u8;
    let alpha = values.get(3).copied().map(channel).unwrap_or(255);
    Some(Rgba::new(channel(values[0]), channel(values[1]), channel(values[2]), alpha))
}
