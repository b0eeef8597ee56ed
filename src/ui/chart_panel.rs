use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use serde_json::Value;

use crate::config::ViewerConfig;
use crate::data::reshape::series_segments;
use crate::state::viewer::ViewerState;

/// Actions that the chart toolbar can request from the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Copy,
    Export,
    Reset,
}

/// Whether the merged table is drawn as lines or listed as rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartView {
    #[default]
    Chart,
    Table,
}

/// Helper to create a toolbar button with consistent min size.
fn toolbar_btn(ui: &mut egui::Ui, label: &str) -> egui::Response {
    ui.add(egui::Button::new(label).min_size(egui::vec2(0.0, 26.0)))
}

/// Copy / Export / Reset row, right aligned.
pub fn show_toolbar(ui: &mut egui::Ui) -> ToolbarAction {
    let mut action = ToolbarAction::None;
    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
        ui.spacing_mut().item_spacing.x = 6.0;
        if toolbar_btn(ui, "Reset").on_hover_text("Unload the file").clicked() {
            action = ToolbarAction::Reset;
        }
        if toolbar_btn(ui, "Export").on_hover_text("Save the chart as a JPG image").clicked() {
            action = ToolbarAction::Export;
        }
        if toolbar_btn(ui, "Copy").on_hover_text("Copy the chart image to the clipboard").clicked() {
            action = ToolbarAction::Copy;
        }
    });
    action
}

/// Render the chart section. Returns the screen rect of the captured area.
pub fn show_chart_section(
    ui: &mut egui::Ui,
    state: &ViewerState,
    view: &mut ChartView,
    config: &ViewerConfig,
) -> egui::Rect {
    ui.horizontal(|ui| {
        ui.heading("Chart");
        ui.add_space(12.0);
        ui.selectable_value(view, ChartView::Chart, "Chart");
        ui.selectable_value(view, ChartView::Table, "Table");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let rows = state.plot_table().len();
            let label = if rows == 1 { "1 point".to_string() } else { format!("{rows} points") };
            ui.label(egui::RichText::new(label).weak());
        });
    });

    let frame_resp = egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(10))
        .corner_radius(egui::CornerRadius::same(8))
        .show(ui, |ui| match view {
            ChartView::Chart => show_plot(ui, state, config),
            ChartView::Table => show_table_view(ui, state),
        });
    frame_resp.response.rect
}

fn show_plot(ui: &mut egui::Ui, state: &ViewerState, config: &ViewerConfig) {
    let table = state.plot_table();

    Plot::new("training_chart")
        .legend(Legend::default())
        .height(config.chart_height)
        .x_axis_label(state.x_key().as_str())
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (field, color) in state.series() {
                for segment in series_segments(table, field) {
                    plot_ui.line(
                        Line::new(PlotPoints::new(segment.clone()))
                            .name(field)
                            .color(color)
                            .width(config.line_width),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::new(segment))
                            .name(field)
                            .color(color)
                            .radius(config.point_radius),
                    );
                }
            }
        });
}

/// Text for one table cell; absent values show as a dash.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn show_table_view(ui: &mut egui::Ui, state: &ViewerState) {
    let rows = state.plot_table();
    if rows.is_empty() {
        ui.label("No rows to show.");
        return;
    }

    use egui_extras::{Column, TableBuilder};

    let x_name = state.x_key().as_str();
    let fields = state.selected_fields();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(100.0), fields.len() + 1)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(x_name);
            });
            for field in fields {
                header.col(|ui| {
                    ui.strong(field);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let plot_row = &rows[row.index()];
                row.col(|ui| {
                    ui.label(cell_text(plot_row.get(x_name)));
                });
                for field in fields {
                    row.col(|ui| {
                        ui.label(cell_text(plot_row.get(field)));
                    });
                }
            });
        });
}
