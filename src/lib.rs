#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod camera;
pub mod canvas;
pub mod color;
pub mod config;
pub mod coords;
pub mod error;
pub mod input;
pub mod palette;
pub mod raster;
pub mod session;
pub mod tools;

pub use app::PixelPaintApp;
pub use camera::Camera;
pub use canvas::{GridPos, PixelBuffer};
pub use color::{Hsv, Rgba};
pub use config::EditorConfig;
pub use coords::CoordinateMapper;
pub use error::{CanvasError, PaletteError};
pub use input::{ButtonState, InputSample};
pub use palette::{Palette, PaletteCollection};
pub use session::EditorSession;
pub use tools::{ToolController, ToolKind};
