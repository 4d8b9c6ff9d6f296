// src/lib.rs
// #![allow(dead_code)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod csv;
pub mod progress;
pub mod store;

pub mod fetcher;
pub mod recorder;

#[cfg(feature = "cli")]
pub mod cli;
pub mod gui;
