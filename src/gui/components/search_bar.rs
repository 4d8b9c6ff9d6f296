// src/gui/components/search_bar.rs
use eframe::egui;

use crate::gui::{actions, app::App};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.horizontal(|ui| {
        ui.label("Search:");
        let resp = ui.add(
            egui::TextEdit::singleline(&mut app.state.gui.search)
                .hint_text("any field, case-insensitive")
                .desired_width(260.0),
        );
        if resp.changed() {
            logd!("UI: search {:?}", app.state.gui.search);
        }
        if !app.state.gui.search.is_empty() && ui.button("Clear").clicked() {
            app.state.gui.search.clear();
        }

        ui.separator();

        if ui.button("Refresh").clicked() {
            actions::refresh(app);
        }
        ui.toggle_value(&mut app.state.gui.show_stats, "Stats");
    });
}
