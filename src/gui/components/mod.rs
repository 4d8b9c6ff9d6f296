// src/gui/components/mod.rs
pub mod data_table;
pub mod form_panel;
pub mod search_bar;
pub mod stats_panel;
