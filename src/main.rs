#![warn(clippy::all, rust_2018_idioms)]

fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PaintClone")
            .with_inner_size([800.0, 500.0])
            .with_min_inner_size([650.0, 400.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PaintClone",
        native_options,
        Box::new(|cc| Ok(Box::new(canvas_paint::PaintApp::new(cc)))),
    )
}
