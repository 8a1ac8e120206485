#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod panels;
pub mod pixel_buffer;
pub mod state;
pub mod stroke;
pub mod texture;
pub mod tool;

pub use app::{PaintApp, ToolSettings};
pub use canvas::CanvasEngine;
pub use config::CanvasConfig;
pub use error::{CanvasError, Result};
pub use history::History;
pub use input::{CanvasInput, InputHandler};
pub use pixel_buffer::PixelBuffer;
pub use state::EditorState;
pub use stroke::{StrokeMode, StrokeSession};
pub use tool::ToolState;
