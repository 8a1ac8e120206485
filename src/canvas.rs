use egui::{Color32, Pos2, Vec2};
use std::io::{Seek, Write};
use std::path::Path;

use crate::config::CanvasConfig;
use crate::error::Result;
use crate::history::History;
use crate::pixel_buffer::PixelBuffer;
use crate::state::EditorState;
use crate::stroke::{StrokeMode, StrokeSession};
use crate::tool::ToolState;

/// The drawing surface: live pixel buffer, tool, stroke state and history.
///
/// Callers forward pointer notifications in order
/// `stroke_start -> stroke_move* -> stroke_end`. Moves and ends without an
/// open stroke are ignored. After any call that changes the buffer,
/// [`CanvasEngine::take_needs_redraw`] reports true until read.
#[derive(Debug)]
pub struct CanvasEngine {
    config: CanvasConfig,
    buffer: PixelBuffer,
    history: History,
    tool: ToolState,
    state: EditorState,
    version: u64,
    needs_redraw: bool,
}

impl CanvasEngine {
    /// Creates a blank canvas of the given size with the default tool
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(CanvasConfig {
            width,
            height,
            ..Default::default()
        })
    }

    pub fn with_config(config: CanvasConfig) -> Self {
        let buffer = PixelBuffer::new(config.width, config.height);
        let history = History::new(buffer.clone());
        let tool = ToolState::new(config.brush_color, config.brush_size as i32, &config);
        Self {
            config,
            buffer,
            history,
            tool,
            state: EditorState::Idle,
            version: 0,
            needs_redraw: true,
        }
    }

    /// Replaces the brush. A stroke already in progress keeps its own.
    pub fn set_tool(&mut self, color: Color32, diameter: i32) {
        self.tool = ToolState::new(color, diameter, &self.config);
    }

    /// Pointer-down at `point`
    pub fn stroke_start(&mut self, point: Pos2, shift_held: bool) {
        if self.state.is_stroking() {
            log::debug!("Stroke started while another was open, committing it first");
            self.stroke_end();
        }

        let mode = if self.tool.is_eraser() {
            StrokeMode::Eraser
        } else if shift_held {
            StrokeMode::Line
        } else {
            StrokeMode::Free
        };
        let diameter = self.tool.diameter() as f32;

        match mode {
            StrokeMode::Eraser => {
                self.buffer.clear_ellipse(point, Vec2::splat(diameter));
            }
            StrokeMode::Line => {
                self.history.park(self.buffer.clone());
                self.buffer.fill_circle(point, diameter, self.tool.color());
            }
            StrokeMode::Free => {
                self.buffer.fill_circle(point, diameter, self.tool.color());
            }
        }

        log::trace!("Stroke start {:?} at {:?}", mode, point);
        self.state.begin(StrokeSession::new(point, mode, &self.tool));
        self.mark_dirty();
    }

    /// Pointer-move to `point`; only acts while the primary button is held
    pub fn stroke_move(&mut self, point: Pos2, primary_held: bool) {
        if !primary_held {
            return;
        }
        let Some(session) = self.state.session_mut() else {
            return;
        };
        let width = session.diameter() as f32;

        match session.mode() {
            StrokeMode::Eraser => return,
            StrokeMode::Line => {
                // Redraw from the baseline so earlier previews never linger.
                let [w, h] = self.buffer.size();
                self.buffer = self.history.latest().grown(w, h);
                self.buffer.draw_segment(session.anchor(), point, width, session.color());
                session.advance(point);
            }
            StrokeMode::Free => {
                let from = session.advance(point);
                self.buffer.draw_segment(from, point, width, session.color());
            }
        }
        self.mark_dirty();
    }

    /// Pointer-up: closes the stroke and commits the live buffer as one entry
    pub fn stroke_end(&mut self) {
        let Some(session) = self.state.end() else {
            log::trace!("Stroke end without an open stroke");
            return;
        };
        self.history.commit(self.buffer.clone());
        log::debug!(
            "Committed {:?} stroke from {:?} to {:?}",
            session.mode(),
            session.anchor(),
            session.last()
        );
    }

    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo() {
            self.buffer = snapshot.clone();
        }
        self.mark_dirty();
    }

    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo() {
            self.buffer = snapshot.clone();
        }
        self.mark_dirty();
    }

    /// Wipes the live buffer. Not recorded in history on its own: it becomes
    /// part of the next committed stroke.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.mark_dirty();
    }

    /// Grows the live buffer to cover `width` x `height`, with headroom.
    ///
    /// Never shrinks. Existing pixels stay at the same coordinates. Returns
    /// whether a new buffer was allocated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        let [current_w, current_h] = self.buffer.size();
        if width <= current_w && height <= current_h {
            return false;
        }

        let target_w = width.max(current_w);
        let target_h = height.max(current_h);
        let new_w = target_w.saturating_add(self.headroom(target_w));
        let new_h = target_h.saturating_add(self.headroom(target_h));

        let grown = self.buffer.grown(new_w, new_h);
        let old = std::mem::replace(&mut self.buffer, grown);
        drop(old);

        log::debug!(
            "Canvas grown from {}x{} to {}x{} for {}x{}",
            current_w,
            current_h,
            new_w,
            new_h,
            width,
            height
        );
        self.mark_dirty();
        true
    }

    /// Writes the live buffer as a PNG file
    pub fn export_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.buffer.save_png(path)?;
        log::info!(
            "Saved {}x{} canvas to {}",
            self.buffer.width(),
            self.buffer.height(),
            path.display()
        );
        Ok(())
    }

    /// Encodes the live buffer as PNG into `writer`
    pub fn write_png<W: Write + Seek>(&self, writer: &mut W) -> Result<()> {
        self.buffer.write_png(writer)?;
        Ok(())
    }

    /// The live buffer, for blitting
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.entry_count()
    }

    pub fn history_cursor(&self) -> usize {
        self.history.cursor()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_stroking(&self) -> bool {
        self.state.is_stroking()
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Bumped on every buffer change; lets the shell skip texture uploads
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns whether the buffer changed since the last call, and resets it
    pub fn take_needs_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn headroom(&self, size: u32) -> u32 {
        ((size as f32 * self.config.growth_factor) as u32).max(1)
    }

    fn mark_dirty(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.needs_redraw = true;
    }
}
