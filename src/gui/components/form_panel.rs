// src/gui/components/form_panel.rs
//
// Left panel: the case form. Same widgets for Create and Edit; the heading
// and the buttons tell them apart.

use eframe::egui::{self, RichText};

use crate::config::consts::PLACEHOLDER;
use crate::gui::{actions, app::App};
use crate::recorder::{Category, Mode};

/// Text field, or a dropdown when the environment pins the allowed values.
fn choice_or_text(ui: &mut egui::Ui, id: &str, value: &mut String, choices: &[String]) {
    if choices.is_empty() {
        ui.text_edit_singleline(value);
        return;
    }
    let shown = if value.trim().is_empty() { PLACEHOLDER } else { value.as_str() };
    egui::ComboBox::from_id_salt(id)
        .selected_text(s!(shown))
        .show_ui(ui, |ui| {
            for c in choices {
                ui.selectable_value(value, c.clone(), c);
            }
        });
}

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let heading = match app.session.mode() {
        Mode::Create => s!("New case"),
        Mode::Edit { row_index, prefill } => {
            format!("Editing row {} ({})", row_index, prefill.code.as_deref().unwrap_or(&prefill.timestamp))
        }
    };
    ui.heading(heading);
    ui.separator();

    let stations = app.state.options.stations.clone();
    let staff = app.state.options.staff.clone();
    let form = &mut app.session.form;

    egui::Grid::new("case_form_grid")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Station *").strong());
            choice_or_text(ui, "station", &mut form.station, &stations);
            ui.end_row();

            ui.label("Caller");
            ui.text_edit_singleline(&mut form.caller);
            ui.end_row();

            ui.label("Phone");
            ui.text_edit_singleline(&mut form.phone);
            ui.end_row();

            ui.label("Plate");
            ui.text_edit_singleline(&mut form.plate);
            ui.end_row();

            ui.label(RichText::new("Category *").strong());
            let shown = form.category.as_ref().map(|c| s!(c.label())).unwrap_or_else(|| s!(PLACEHOLDER));
            egui::ComboBox::from_id_salt("category")
                .selected_text(shown)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut form.category, None, PLACEHOLDER);
                    for c in Category::ALL.iter() {
                        ui.selectable_value(&mut form.category, Some(c.clone()), c.label());
                    }
                    // Keep a foreign label selectable while editing an old row
                    if let Some(Category::Unknown(label)) = form.category.clone() {
                        ui.selectable_value(&mut form.category, Some(Category::Unknown(label.clone())), label);
                    }
                });
            ui.end_row();

            ui.label(RichText::new("Staff *").strong());
            choice_or_text(ui, "staff", &mut form.staff, &staff);
            ui.end_row();
        });

    ui.label("Description");
    ui.add(
        egui::TextEdit::multiline(&mut form.description)
            .desired_rows(5)
            .desired_width(f32::INFINITY),
    );

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let editing = app.session.is_editing();
        let label = if editing { "Save changes" } else { "Submit" };
        if ui.button(label).clicked() {
            actions::submit(app);
        }
        if editing && ui.button("Cancel edit").clicked() {
            actions::cancel_edit(app);
        }
    });
}
