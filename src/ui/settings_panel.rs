use crate::data::log::XKey;
use crate::state::viewer::ViewerState;

/// A change requested from the graph settings controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsChange {
    XKey(XKey),
    Select(String),
    Deselect(String),
}

/// Persistent text of the field filter box.
#[derive(Debug, Clone, Default)]
pub struct FieldPickerState {
    pub query: String,
}

/// Unselected fields matching `query` (case-insensitive substring), in field-set order.
pub fn filter_options<'a>(available: &'a [String], selected: &[String], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    available
        .iter()
        .filter(|f| !selected.contains(*f))
        .filter(|f| needle.is_empty() || f.to_lowercase().contains(&needle))
        .map(String::as_str)
        .collect()
}

pub fn show_settings_panel(
    ui: &mut egui::Ui,
    state: &ViewerState,
    picker: &mut FieldPickerState,
) -> Vec<SettingsChange> {
    let mut changes = Vec::new();

    ui.heading("Graph Settings");
    ui.add_space(6.0);

    // --- X axis selector ---
    ui.label(egui::RichText::new("X Axis").strong());
    ui.add_space(2.0);
    let mut x_key = state.x_key();
    egui::ComboBox::from_id_salt("x_axis_selector")
        .selected_text(x_key.label())
        .width(200.0)
        .show_ui(ui, |ui| {
            for key in XKey::ALL {
                ui.selectable_value(&mut x_key, key, key.label());
            }
        });
    if x_key != state.x_key() {
        changes.push(SettingsChange::XKey(x_key));
    }

    ui.add_space(10.0);

    // --- Field multi-selector ---
    ui.label(egui::RichText::new("Fields").strong());
    ui.add_space(2.0);
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        if state.selected_fields().is_empty() {
            ui.label(egui::RichText::new("No fields selected").weak());
        }
        for (field, color) in state.series() {
            let chip = egui::Button::new(egui::RichText::new(format!("{field}  x")).color(color))
                .min_size(egui::vec2(0.0, 24.0));
            if ui.add(chip).on_hover_text("Remove from chart").clicked() {
                changes.push(SettingsChange::Deselect(field.to_string()));
            }
        }
    });

    ui.add_space(4.0);
    let options = filter_options(state.available_fields(), state.selected_fields(), &picker.query);
    egui::ComboBox::from_id_salt("field_selector")
        .selected_text("Select fields")
        .width(400.0)
        .height(300.0)
        .show_ui(ui, |ui| {
            ui.add(
                egui::TextEdit::singleline(&mut picker.query)
                    .hint_text("Filter fields")
                    .desired_width(f32::INFINITY),
            );
            ui.separator();
            if options.is_empty() {
                ui.label(egui::RichText::new("No options").weak());
            }
            for option in &options {
                if ui.selectable_label(false, *option).clicked() {
                    changes.push(SettingsChange::Select(option.to_string()));
                }
            }
        });

    changes
}

/// Apply collected changes to the viewer, which recomputes the plot table.
pub fn apply_changes(state: &mut ViewerState, changes: Vec<SettingsChange>) {
    for change in changes {
        match change {
            SettingsChange::XKey(key) => state.set_x_key(key),
            SettingsChange::Select(field) => state.select_field(&field),
            SettingsChange::Deselect(field) => state.deselect_field(&field),
        }
    }
}
