// src/gui/components/data_table.rs
//
// Case table. Which rows appear (recent window, fallback, search hits) is
// decided by RecordView; this only draws them plus an Edit button per row.

use eframe::egui::{self, Align, Layout, RichText};
use egui_extras::{Column, TableBuilder};

use crate::config::consts::CASE_HEADERS;
use crate::gui::{actions, app::App};
use crate::recorder::{case::COL_DESCRIPTION, Mode, RecordView};

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    let now = app.now().naive_local();
    let editing = match app.session.mode() {
        Mode::Edit { row_index, .. } => Some(*row_index),
        Mode::Create => None,
    };

    // Edit clicks are applied after the view (which borrows app.rows) is gone.
    let mut clicked: Option<usize> = None;

    {
        let view = RecordView::build(&app.rows, &app.state.gui.search, now, &app.state.options);
        ui.label(RichText::new(view.caption()).italics());

        if view.is_empty() {
            return;
        }
        let shown: Vec<(usize, &[String])> = view.iter().collect();

        let avail_h = ui.available_height();
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .min_scrolled_height(0.0)
            .max_scroll_height(avail_h)
            .cell_layout(Layout::left_to_right(Align::Center))
            .column(Column::exact(48.0));
        for (ci, _) in CASE_HEADERS.iter().enumerate() {
            let w = if ci == COL_DESCRIPTION { 260.0 } else { 110.0 };
            table = table.column(Column::initial(w).clip(true).at_least(40.0));
        }

        table
            .header(22.0, |mut header| {
                header.col(|_| {});
                for h in CASE_HEADERS {
                    header.col(|ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(20.0, shown.len(), |mut row| {
                    let Some(&(ix, cells)) = shown.get(row.index()) else { return };
                    row.set_selected(editing == Some(ix));
                    row.col(|ui| {
                        if ui.small_button("Edit").clicked() {
                            clicked = Some(ix);
                        }
                    });
                    for ci in 0..CASE_HEADERS.len() {
                        let text = cells.get(ci).map(String::as_str).unwrap_or("");
                        row.col(|ui| {
                            ui.label(text).on_hover_text(text);
                        });
                    }
                });
            });
    }

    if let Some(ix) = clicked {
        actions::begin_edit(app, ix);
    }
}
