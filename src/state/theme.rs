use egui::{Color32, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Visuals with the rounder widgets used across the app.
    pub fn visuals(&self) -> Visuals {
        let mut vis = match self {
            Theme::Dark => Visuals::dark(),
            Theme::Light => Visuals::light(),
        };
        vis.window_corner_radius = egui::CornerRadius::same(8);
        vis.widgets.inactive.corner_radius = egui::CornerRadius::same(6);
        vis.widgets.hovered.corner_radius = egui::CornerRadius::same(6);
        vis.widgets.active.corner_radius = egui::CornerRadius::same(6);
        vis
    }

    /// Colour used for error text on the upload screen.
    pub fn error_text(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(255, 90, 90),
            Theme::Light => Color32::from_rgb(200, 0, 0),
        }
    }

    /// Colour for de-emphasised text such as the raw JSON tree.
    pub fn muted_text(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_gray(170),
            Theme::Light => Color32::from_gray(85),
        }
    }

    /// Label for the button that switches to the other theme.
    pub fn toggle_label(&self) -> &'static str {
        match self {
            Theme::Dark => "Light Mode",
            Theme::Light => "Dark Mode",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}
