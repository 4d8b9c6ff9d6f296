// src/gui/app.rs
use std::error::Error;

use chrono::{DateTime, FixedOffset};
use eframe::egui;

use crate::{
    config::{consts::CASES_FILE, options::StoreOptions, state::AppState},
    fetcher,
    log::{self, LogTarget},
    recorder::{stats, Session, Stats},
    store::{self, Row, RowStore},
};

use super::components;

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    log::init(LogTarget::default());
    eframe::run_native(
        "Spotlog",
        options,
        Box::new(|_cc| Ok(Box::new(App::new(AppState::from_env(), StoreOptions::from_env(CASES_FILE))))),
    )?;
    Ok(())
}

pub struct App {
    // single source of truth (UI thread only)
    pub state: AppState,

    /// None when the configured store could not be opened; the form still
    /// renders but submissions report the problem.
    pub store: Option<Box<dyn RowStore>>,

    /// Everything the store returned on the last refresh (row 0 = header)
    pub rows: Vec<Row>,

    pub session: Session,
    pub stats: Stats,
    pub status: String,
}

impl App {
    pub fn new(state: AppState, store_opts: StoreOptions) -> Self {
        let (store, status) = match store::open(&store_opts) {
            Ok(s) => {
                let msg = format!("Store: {}", s.describe());
                (Some(s), msg)
            }
            Err(e) => {
                loge!("Init: store unavailable: {}", e);
                (None, format!("Store unavailable: {}", e))
            }
        };

        let mut app = Self::with_store(state, store);
        app.status = status;
        app.refresh();
        app
    }

    /// Test/embedding entrypoint: no env, caller-supplied store.
    pub fn with_store(state: AppState, store: Option<Box<dyn RowStore>>) -> Self {
        Self {
            state,
            store,
            rows: Vec::new(),
            session: Session::new(),
            stats: Stats::default(),
            status: s!("Idle"),
        }
    }

    #[inline]
    pub fn status<T: Into<String>>(&mut self, msg: T) {
        self.status = msg.into();
    }

    #[inline]
    pub fn now(&self) -> DateTime<FixedOffset> {
        fetcher::now_at(self.state.options.utc_offset_hours)
    }

    /// Re-read the store. Keeps the old rows on failure so the table does
    /// not blank out on a transient error.
    pub fn refresh(&mut self) {
        let Some(store) = self.store.as_deref() else { return };
        match store.read_all() {
            Ok(rows) => {
                logd!("Refresh: {} row(s) from {}", rows.len(), store.describe());
                self.rows = rows;
                self.stats = stats::compute(&self.rows, self.now().date_naive());
            }
            Err(e) => {
                loge!("Refresh: {}", e);
                self.status(format!("Could not read store: {}", e));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("case_form")
            .resizable(false)
            .min_width(300.0)
            .show(ctx, |ui| {
                components::form_panel::draw(ui, self);
            });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            components::search_bar::draw(ui, self);

            if self.state.gui.show_stats {
                ui.separator();
                components::stats_panel::draw(ui, self);
            }

            ui.separator();

            components::data_table::draw(ui, self);
        });
    }
}
