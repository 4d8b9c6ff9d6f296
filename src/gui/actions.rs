// src/gui/actions.rs
//
// Button actions. Layout stays in components/*; these mutate `app` and set
// the status line.

use crate::gui::app::App;
use crate::recorder::{SubmitError, SubmitOutcome};

pub fn submit(app: &mut App) {
    let now = app.now();
    let Some(store) = app.store.as_deref_mut() else {
        app.status("Not saved: no row-store configured");
        logw!("Submit: no store");
        return;
    };

    match app.session.submit(store, now) {
        Ok(SubmitOutcome::Created(rec)) => {
            app.status(format!("Saved case {}", rec.code.as_deref().unwrap_or("")));
            app.refresh();
        }
        Ok(SubmitOutcome::Updated { row_index, record }) => {
            app.status(format!("Updated row {} ({})", row_index, record.timestamp));
            app.refresh();
        }
        Err(SubmitError::Invalid(e)) => {
            logd!("Submit: {}", e);
            app.status(e.to_string());
        }
        Err(SubmitError::Store(e)) => {
            loge!("Submit: {}", e);
            app.status(format!("Save failed: {}", e));
        }
    }
}

pub fn begin_edit(app: &mut App, row_index: usize) {
    match app.rows.get(row_index) {
        Some(row) => {
            app.session.begin_edit(row_index, row);
            app.status(format!("Editing row {}", row_index));
        }
        None => app.status(format!("Row {} no longer exists; refresh", row_index)),
    }
}

pub fn cancel_edit(app: &mut App) {
    app.session.cancel_edit();
    app.status("Edit cancelled");
}

pub fn refresh(app: &mut App) {
    app.refresh();
    if app.store.is_some() {
        let n = app.rows.len().saturating_sub(1);
        app.status(format!("Loaded {} record(s)", n));
    }
}
