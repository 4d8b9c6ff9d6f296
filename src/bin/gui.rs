// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use spotlog::{config::state::GuiState, gui};
use eframe::egui::ViewportBuilder;

fn main() {
    let g = GuiState::default();
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([g.window_w as f32, g.window_h as f32])
            .with_title("Spotlog"),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
