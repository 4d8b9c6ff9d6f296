// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::fetcher::retry::{Backoff, RetryPolicy};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    pub element_id: String,
    pub scan_tag: String,
    pub id_needle: String,
    pub label: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            element_id: s!(SPOTS_ELEMENT_ID),
            scan_tag: s!(SPOTS_SCAN_TAG),
            id_needle: s!(SPOTS_ID_NEEDLE),
            label: s!(SPOTS_LABEL),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    pub url: String,
    pub user_agent: String,
    pub referer: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub extract: ExtractOptions,
    pub utc_offset_hours: i32,
    pub timestamp_format: String,
    pub headers: Vec<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            url: s!(TARGET_URL),
            user_agent: s!(USER_AGENT),
            referer: Some(s!(REFERER)),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            retry: RetryPolicy {
                max_attempts: MAX_ATTEMPTS,
                backoff: Backoff::Jitter {
                    min: Duration::from_millis(RETRY_MIN_MS),
                    max: Duration::from_millis(RETRY_MAX_MS),
                },
            },
            extract: ExtractOptions::default(),
            utc_offset_hours: UTC_OFFSET_HOURS,
            timestamp_format: s!(OBSERVATION_TS_FORMAT),
            headers: OBSERVATION_HEADERS.iter().map(|h| s!(*h)).collect(),
        }
    }
}

/// Which backend holds the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Csv { path: PathBuf },
    Sheets { spreadsheet_id: String, sheet: String, token: Option<String> },
    Memory,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub kind: StoreKind,
}

impl StoreOptions {
    pub fn csv(file_name: &str) -> Self {
        Self { kind: StoreKind::Csv { path: PathBuf::from(STORE_DIR).join(file_name) } }
    }

    /// Store selection from `SPOTLOG_*` variables, falling back to a local CSV file.
    ///
    /// * `SPOTLOG_STORE` – `csv` (default), `sheets` or `memory`
    /// * `SPOTLOG_CSV_PATH` – CSV path override
    /// * `SPOTLOG_SHEET_ID`, `SPOTLOG_SHEET_NAME`, `SPOTLOG_SHEETS_TOKEN` – Sheets backend
    pub fn from_env(default_file: &str) -> Self {
        Self::from_lookup(default_file, |k| std::env::var(k).ok())
    }

    pub fn from_lookup(default_file: &str, get: impl Fn(&str) -> Option<String>) -> Self {
        let kind = get("SPOTLOG_STORE").unwrap_or_default().to_ascii_lowercase();
        match kind.as_str() {
            "sheets" => Self {
                kind: StoreKind::Sheets {
                    spreadsheet_id: get("SPOTLOG_SHEET_ID").unwrap_or_default(),
                    sheet: get("SPOTLOG_SHEET_NAME").unwrap_or_else(|| s!("Sheet1")),
                    token: get("SPOTLOG_SHEETS_TOKEN").filter(|t| !t.trim().is_empty()),
                },
            },
            "memory" => Self { kind: StoreKind::Memory },
            _ => match get("SPOTLOG_CSV_PATH") {
                Some(p) if !p.trim().is_empty() => Self { kind: StoreKind::Csv { path: PathBuf::from(p) } },
                _ => Self::csv(default_file),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecorderOptions {
    pub window_hours: i64,
    pub fallback_rows: usize,
    pub utc_offset_hours: i32,
    /// Empty → free-text entry in the form.
    pub stations: Vec<String>,
    pub staff: Vec<String>,
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            window_hours: RECENT_WINDOW_HOURS,
            fallback_rows: FALLBACK_ROWS,
            utc_offset_hours: UTC_OFFSET_HOURS,
            stations: Vec::new(),
            staff: Vec::new(),
        }
    }
}

impl RecorderOptions {
    /// Defaults plus `SPOTLOG_STATIONS` / `SPOTLOG_STAFF` (comma separated).
    pub fn from_env() -> Self {
        let list = |k: &str| -> Vec<String> {
            std::env::var(k)
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default()
        };
        Self { stations: list("SPOTLOG_STATIONS"), staff: list("SPOTLOG_STAFF"), ..Self::default() }
    }
}
