pub mod chart_panel;
pub mod json_tree;
pub mod settings_panel;
pub mod toast;
pub mod upload_panel;
