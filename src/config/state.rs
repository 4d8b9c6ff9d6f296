// src/config/state.rs
use super::options::RecorderOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    pub window_w: u32,
    pub window_h: u32,

    /// Live contents of the search box; empty → recent view
    pub search: String,

    /// Statistics panel expanded
    pub show_stats: bool,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            window_w: 1200,
            window_h: 760,
            search: s!(),
            show_stats: false,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: RecorderOptions,
    pub gui: GuiState,
}

impl AppState {
    /// Defaults plus whatever the environment pins (station/staff lists).
    pub fn from_env() -> Self {
        Self { options: RecorderOptions::from_env(), gui: GuiState::default() }
    }
}
