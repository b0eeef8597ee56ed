use eframe::egui;

use trainer_state_viz::app::TrainerVizApp;
use trainer_state_viz::config::ViewerConfig;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let config = ViewerConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Trainer State Visualizer")
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_drag_and_drop(true),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "Trainer State Visualizer",
        options,
        Box::new(|cc| Ok(Box::new(TrainerVizApp::new(cc, config)))),
    )
}
