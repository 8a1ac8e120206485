use egui::color_picker::{color_edit_button_srgba, Alpha};

use crate::PaintApp;

pub fn toolbar(app: &mut PaintApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut color = app.settings().color;
            if color_edit_button_srgba(ui, &mut color, Alpha::OnlyBlend).changed() {
                app.set_color(color);
            }

            let config = app.settings().config.clone();
            let mut size = app.settings().brush_size;
            let stepper = egui::DragValue::new(&mut size)
                .range(config.min_brush_size..=config.max_brush_size)
                .speed(1);
            if ui.add(stepper).changed() {
                app.set_brush_size(size);
            }

            if ui.button("Eraser").clicked() {
                log::debug!("Eraser selected");
                app.select_eraser();
            }
            if ui.button("Clear").clicked() {
                app.clear();
            }

            let can_undo = app.engine().can_undo();
            let can_redo = app.engine().can_redo();
            if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                app.undo();
            }
            if ui.add_enabled(can_redo, egui::Button::new("Redo")).clicked() {
                app.redo();
            }

            if ui.button("Save").clicked() {
                app.save();
            }

            if let Some(status) = app.status() {
                ui.separator();
                ui.label(status);
            }
        });
    });
}
