use serde_json::Value;

/// Collapsible view of the uploaded document. Nodes shallower than
/// `expand_depth` start open.
pub fn show_json_tree(ui: &mut egui::Ui, document: &Value, expand_depth: usize) {
    show_node(ui, None, document, 0, expand_depth, egui::Id::new("uploaded_json"));
}

fn show_node(
    ui: &mut egui::Ui,
    key: Option<&str>,
    value: &Value,
    depth: usize,
    expand_depth: usize,
    id: egui::Id,
) {
    match value {
        Value::Object(map) => {
            egui::CollapsingHeader::new(egui::RichText::new(node_label(key, value)).monospace())
                .id_salt(id)
                .default_open(depth < expand_depth)
                .show(ui, |ui| {
                    for (k, v) in map {
                        show_node(ui, Some(k.as_str()), v, depth + 1, expand_depth, id.with(k));
                    }
                });
        }
        Value::Array(items) => {
            egui::CollapsingHeader::new(egui::RichText::new(node_label(key, value)).monospace())
                .id_salt(id)
                .default_open(depth < expand_depth)
                .show(ui, |ui| {
                    for (i, v) in items.iter().enumerate() {
                        let index = i.to_string();
                        show_node(ui, Some(index.as_str()), v, depth + 1, expand_depth, id.with(i));
                    }
                });
        }
        _ => {
            ui.label(egui::RichText::new(node_label(key, value)).monospace());
        }
    }
}

/// One-line text for a node: `key: value` for scalars, a size summary for containers.
pub fn node_label(key: Option<&str>, value: &Value) -> String {
    let body = match value {
        Value::Object(map) => format!("{{{}}}", count(map.len(), "key", "keys")),
        Value::Array(items) => format!("[{}]", count(items.len(), "item", "items")),
        Value::String(s) => format!("\"{s}\""),
        other => other.to_string(),
    };
    match key {
        Some(k) => format!("{k}: {body}"),
        None => body,
    }
}

fn count(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("1 {one}")
    } else {
        format!("{n} {many}")
    }
}
