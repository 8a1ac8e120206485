use egui::{Color32, Rect, Sense, pos2, vec2};

use crate::PaintApp;

pub fn canvas_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
        let rect = response.rect;
        let (engine, input, texture) = app.canvas_parts();

        engine.resize(rect.width().ceil() as u32, rect.height().ceil() as u32);

        input.set_canvas(rect, ui.layer_id());
        for event in input.process_input(ctx) {
            event.apply(engine);
        }

        let texture_id = texture.texture_id(ctx, engine);
        let image_rect = Rect::from_min_size(
            rect.min,
            vec2(engine.width() as f32, engine.height() as f32),
        );
        let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
        painter.image(texture_id, image_rect, uv, Color32::WHITE);

        if engine.take_needs_redraw() {
            ctx.request_repaint();
        }
    });
}
