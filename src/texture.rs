use egui::{Context, TextureHandle, TextureId, TextureOptions};

use crate::canvas::CanvasEngine;

/// The canvas as an egui texture, re-uploaded only when the engine's buffer
/// version changes.
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    /// Engine version of the uploaded pixels
    version: Option<u64>,
    options: TextureOptions,
    uploads: usize,
}

impl Default for CanvasTexture {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasTexture {
    pub fn new() -> Self {
        Self {
            handle: None,
            version: None,
            // Pixels are drawn 1:1, no filtering wanted
            options: TextureOptions::NEAREST,
            uploads: 0,
        }
    }

    /// Returns the texture for the engine's current buffer, uploading it first
    /// if it is stale
    pub fn texture_id(&mut self, ctx: &Context, engine: &CanvasEngine) -> TextureId {
        let version = engine.version();
        if self.version != Some(version) {
            let image = engine.buffer().to_color_image();
            match &mut self.handle {
                Some(handle) => handle.set(image, self.options),
                None => self.handle = Some(ctx.load_texture("canvas", image, self.options)),
            }
            self.version = Some(version);
            self.uploads += 1;
            log::trace!("Canvas texture upload #{} (version {})", self.uploads, version);
        }

        match &self.handle {
            Some(handle) => handle.id(),
            None => TextureId::default(),
        }
    }

    #[cfg(test)]
    pub fn upload_count(&self) -> usize {
        self.uploads
    }
}
