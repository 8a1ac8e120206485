use egui::Color32;

use crate::config::CanvasConfig;

/// The brush the next stroke will use
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    color: Color32,
    diameter: u32,
}

impl ToolState {
    /// Builds a tool, clamping `diameter` into the configured brush range
    pub fn new(color: Color32, diameter: i32, config: &CanvasConfig) -> Self {
        let clamped = config.clamp_brush_size(diameter);
        if i64::from(clamped) != i64::from(diameter) {
            log::warn!("Brush diameter {} out of range, using {}", diameter, clamped);
        }
        Self {
            color,
            diameter: clamped,
        }
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// A fully transparent color turns the brush into the eraser
    pub fn is_eraser(&self) -> bool {
        self.color.a() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eraser_flag() {
        let config = CanvasConfig::default();
        assert!(ToolState::new(Color32::TRANSPARENT, 5, &config).is_eraser());
        assert!(!ToolState::new(Color32::RED, 5, &config).is_eraser());
        let faint = Color32::from_rgba_unmultiplied(0, 0, 0, 1);
        assert!(!ToolState::new(faint, 5, &config).is_eraser());
    }

    #[test]
    fn test_non_positive_diameter_clamps_to_one() {
        let config = CanvasConfig::default();
        assert_eq!(ToolState::new(Color32::RED, 0, &config).diameter(), 1);
        assert_eq!(ToolState::new(Color32::RED, -20, &config).diameter(), 1);
    }
}
