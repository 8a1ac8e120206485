use egui::Color32;
use std::path::PathBuf;

/// Engine configuration.
///
/// Persisted alongside the tool settings through eframe storage.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct CanvasConfig {
    /// Initial buffer width in pixels
    pub width: u32,
    /// Initial buffer height in pixels
    pub height: u32,
    /// Color selected on startup
    pub brush_color: Color32,
    /// Brush diameter selected on startup
    pub brush_size: u32,
    pub min_brush_size: u32,
    pub max_brush_size: u32,
    /// Headroom added on each buffer growth, as a fraction of the new size
    pub growth_factor: f32,
    /// Where the Save button writes the PNG
    pub export_path: PathBuf,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            brush_color: Color32::RED,
            brush_size: 5,
            min_brush_size: 1,
            max_brush_size: 150,
            growth_factor: 0.5,
            export_path: PathBuf::from("image.png"),
        }
    }
}

impl CanvasConfig {
    /// Clamp a requested diameter into the configured brush range.
    pub fn clamp_brush_size(&self, requested: i32) -> u32 {
        let min = self.min_brush_size.max(1);
        let max = self.max_brush_size.max(min);
        if requested < min as i32 {
            min
        } else {
            (requested as u32).min(max)
        }
    }
}
