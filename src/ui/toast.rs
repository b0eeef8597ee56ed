use crate::state::notification::{Notification, Severity};

fn fill_for(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Success => egui::Color32::from_rgb(46, 125, 50),
        Severity::Error => egui::Color32::from_rgb(211, 47, 47),
    }
}

/// Draw the toast bottom-centre. Returns true if the user dismissed it.
pub fn show_toast(ctx: &egui::Context, notification: &Notification) -> bool {
    let mut dismissed = false;
    egui::Area::new(egui::Id::new("notification_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .fill(fill_for(notification.severity))
                .inner_margin(egui::Margin::symmetric(14, 8))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(&notification.message)
                                .color(egui::Color32::WHITE)
                                .strong(),
                        );
                        ui.add_space(8.0);
                        if ui.small_button("dismiss").clicked() {
                            dismissed = true;
                        }
                    });
                });
        });
    dismissed
}
