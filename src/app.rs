use egui::{Color32, Rect};

use crate::canvas::CanvasEngine;
use crate::config::CanvasConfig;
use crate::input::InputHandler;
use crate::panels;
use crate::texture::CanvasTexture;

/// Toolbar state that survives restarts. The drawing and its history do not.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ToolSettings {
    pub color: Color32,
    pub brush_size: u32,
    pub config: CanvasConfig,
}

impl Default for ToolSettings {
    fn default() -> Self {
        let config = CanvasConfig::default();
        Self {
            color: config.brush_color,
            brush_size: config.brush_size,
            config,
        }
    }
}

pub struct PaintApp {
    engine: CanvasEngine,
    settings: ToolSettings,
    input: InputHandler,
    texture: CanvasTexture,
    /// Result of the last Save, shown in the toolbar
    status: Option<String>,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::from_settings(ToolSettings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<ToolSettings>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        Self::from_settings(settings)
    }

    pub fn from_settings(settings: ToolSettings) -> Self {
        let mut engine = CanvasEngine::with_config(settings.config.clone());
        engine.set_tool(settings.color, settings.brush_size as i32);
        Self {
            engine,
            settings,
            input: InputHandler::new(Rect::NOTHING),
            texture: CanvasTexture::new(),
            status: None,
        }
    }

    pub fn engine(&self) -> &CanvasEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CanvasEngine {
        &mut self.engine
    }

    pub fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_color(&mut self, color: Color32) {
        self.settings.color = color;
        self.sync_tool();
    }

    pub fn set_brush_size(&mut self, size: u32) {
        self.settings.brush_size = size;
        self.sync_tool();
    }

    /// A fully transparent color turns the brush into the eraser
    pub fn select_eraser(&mut self) {
        self.set_color(Color32::TRANSPARENT);
    }

    pub fn clear(&mut self) {
        self.engine.clear();
    }

    pub fn undo(&mut self) {
        self.engine.undo();
    }

    pub fn redo(&mut self) {
        self.engine.redo();
    }

    /// Writes the canvas to the configured export path and reports the
    /// outcome in the status line
    pub fn save(&mut self) {
        let path = &self.settings.config.export_path;
        let status = match self.engine.export_png(path) {
            Ok(()) => format!("Saved {}", path.display()),
            Err(err) => {
                log::error!("{}", err);
                err.to_string()
            }
        };
        self.status = Some(status);
    }

    pub(crate) fn canvas_parts(
        &mut self,
    ) -> (&mut CanvasEngine, &mut InputHandler, &mut CanvasTexture) {
        (&mut self.engine, &mut self.input, &mut self.texture)
    }

    fn sync_tool(&mut self) {
        self.engine.set_tool(self.settings.color, self.settings.brush_size as i32);
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::toolbar(self, ctx);
        panels::canvas_panel(self, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_settings_drive_tool() {
        let mut app = PaintApp::default();
        assert_eq!(app.engine().tool().color(), Color32::RED);
        assert_eq!(app.engine().tool().diameter(), 5);

        app.set_brush_size(30);
        assert_eq!(app.engine().tool().diameter(), 30);

        app.select_eraser();
        assert!(app.engine().tool().is_eraser());
        assert_eq!(app.settings().brush_size, 30);
    }

    #[test]
    fn test_buttons_forward_to_engine() {
        let mut app = PaintApp::default();
        app.engine_mut().stroke_start(pos2(10.0, 10.0), false);
        app.engine_mut().stroke_end();

        app.undo();
        assert_eq!(app.engine().history_cursor(), 0);
        app.redo();
        assert_eq!(app.engine().history_cursor(), 1);
        app.clear();
        assert_eq!(app.engine().buffer().pixel(10, 10), Some([0; 4]));
    }

    #[test]
    fn test_save_failure_sets_status() {
        let mut settings = ToolSettings::default();
        settings.config.export_path = std::env::temp_dir()
            .join("canvas_paint_missing_dir")
            .join("nested")
            .join("image.png");
        let mut app = PaintApp::from_settings(settings);

        app.save();
        let status = app.status().unwrap_or_default();
        assert!(status.starts_with("Failed to write"), "{status}");
    }

    #[test]
    fn test_save_success_sets_status() {
        let path = std::env::temp_dir().join("canvas_paint_app_save.png");
        let mut settings = ToolSettings::default();
        settings.config.export_path = path.clone();
        let mut app = PaintApp::from_settings(settings);

        app.save();
        let status = app.status().unwrap_or_default();
        assert!(status.starts_with("Saved"), "{status}");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
