use crate::state::theme::Theme;

pub const PROJECT_URL: &str = "https://github.com/aigoncharov/trainer_state_viz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadAction {
    None,
    OpenFile,
    Reset,
}

/// Landing screen shown while no log is loaded.
pub fn show_upload_panel(ui: &mut egui::Ui, error: Option<&str>, theme: &Theme) -> UploadAction {
    let mut action = UploadAction::None;

    ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
        if ui.add(egui::Button::new("Reset").min_size(egui::vec2(0.0, 26.0))).clicked() {
            action = UploadAction::Reset;
        }
    });

    ui.heading("Trainer State Visualizer");
    ui.add_space(6.0);
    ui.label(
        "Upload your trainer_state.json (written by Trainer from transformers) and \
         interactively visualize metrics over epochs or steps.",
    );

    ui.add_space(16.0);
    ui.label(egui::RichText::new("Upload JSON").strong());
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let open_btn = egui::Button::new(egui::RichText::new("Open JSON...").strong())
            .min_size(egui::vec2(120.0, 28.0));
        if ui.add(open_btn).clicked() {
            action = UploadAction::OpenFile;
        }
        ui.label(egui::RichText::new("or drop a .json file onto the window").weak());
    });

    if let Some(msg) = error {
        ui.add_space(8.0);
        ui.colored_label(theme.error_text(), msg);
    }

    ui.add_space(40.0);
    ui.vertical_centered(|ui| {
        ui.hyperlink_to("View on GitHub", PROJECT_URL);
    });

    action
}
