use thiserror::Error;

/// Errors that can occur when constructing a canvas
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CanvasError {
    #[error("Invalid canvas dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions { width: i32, height: i32 },
}

/// Result type for canvas construction
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors that can occur while editing or persisting palettes
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Palette file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Palette file path is empty")]
    EmptyPath,

    #[error("Maximum palettes reached")]
    CollectionFull,

    #[error("Palette is full")]
    PaletteFull,

    #[error("Color already in palette")]
    DuplicateColor,
}

/// Result type for palette operations
pub type PaletteResult<T> = Result<T, PaletteError>;

/// Errors that can occur while reading or writing the editor config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur when exporting the canvas as an image
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel data does not match canvas size {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
}
