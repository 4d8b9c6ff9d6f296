// src/log.rs
//
// Call sites keep the short logf!/logd!/logw!/loge! macros; they forward to
// `tracing`. `init` installs the subscriber once per process.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::consts::{LOG_FILE, STORE_DIR};

/// Where log lines go.
#[derive(Clone, Debug)]
pub enum LogTarget {
    /// Plain stderr. Cron captures this for the fetcher.
    Stderr,
    /// Append to a file (the GUI has no console on Windows).
    File(PathBuf),
}

impl Default for LogTarget {
    fn default() -> Self {
        LogTarget::File(PathBuf::from(STORE_DIR).join(LOG_FILE))
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Safe to call twice; the second call is a no-op.
/// Falls back to stderr if the log file cannot be opened.
pub fn init(target: LogTarget) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
                Err(_) => builder.with_writer(std::io::stderr).try_init(),
            }
        }
    };
    // Already installed (tests, double init): keep the first one.
    let _ = result;
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warn-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
