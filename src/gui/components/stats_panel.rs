// src/gui/components/stats_panel.rs
use eframe::egui;

use crate::gui::app::App;

fn counts(ui: &mut egui::Ui, id: &str, title: &str, items: &[(String, usize)]) {
    ui.vertical(|ui| {
        ui.strong(title);
        egui::Grid::new(id).num_columns(2).striped(true).show(ui, |ui| {
            for (k, n) in items {
                ui.label(k);
                ui.label(n.to_string());
                ui.end_row();
            }
        });
    });
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let st = &app.stats;
    ui.horizontal(|ui| {
        ui.label(format!("Total: {}", st.total));
        ui.separator();
        ui.label(format!("Today: {}", st.today));
    });
    ui.horizontal_top(|ui| {
        counts(ui, "stats_category", "By category", &st.by_category);
        ui.separator();
        counts(ui, "stats_station", "By station", &st.by_station);
        ui.separator();
        counts(ui, "stats_staff", "By staff", &st.by_staff);
    });
}
