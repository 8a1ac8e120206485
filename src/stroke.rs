use egui::{Color32, Pos2};

use crate::tool::ToolState;

/// How a stroke interprets pointer moves, latched at pointer-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeMode {
    /// Freehand: each move extends the path from the last point
    Free,
    /// Shift held at pointer-down: a straight line from the anchor, redrawn
    /// from the pre-stroke baseline on every move
    Line,
    /// One circular erase mark at the anchor; moves are ignored
    Eraser,
}

/// One pointer-down-to-pointer-up interaction
#[derive(Debug, Clone)]
pub struct StrokeSession {
    anchor: Pos2,
    last: Pos2,
    mode: StrokeMode,
    color: Color32,
    diameter: u32,
}

impl StrokeSession {
    /// Starts a session at `anchor`, latching the tool's color and diameter
    pub fn new(anchor: Pos2, mode: StrokeMode, tool: &ToolState) -> Self {
        Self {
            anchor,
            last: anchor,
            mode,
            color: tool.color(),
            diameter: tool.diameter(),
        }
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    pub fn last(&self) -> Pos2 {
        self.last
    }

    pub fn mode(&self) -> StrokeMode {
        self.mode
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    /// Moves the freehand cursor, returning the previous last point
    pub fn advance(&mut self, point: Pos2) -> Pos2 {
        std::mem::replace(&mut self.last, point)
    }
}
