// src/config/consts.rs

// Net config
pub const TARGET_URL: &str =
    "https://www.parkinginfo.ntpc.gov.tw/parkingrealInfo/?parkinglotname=%E7%A2%A7%E8%8F%AF%E5%9C%8B%E5%B0%8F";
pub const REFERER: &str = "https://www.parkinginfo.ntpc.gov.tw/";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
pub const HTTP_TIMEOUT_SECS: u64 = 15;

// Retry
pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_MIN_MS: u64 = 1_000;
pub const RETRY_MAX_MS: u64 = 3_000;

// Extraction
pub const SPOTS_ELEMENT_ID: &str = "ContentPlaceHolder1_lblAvailableCar";
pub const SPOTS_SCAN_TAG: &str = "span";
pub const SPOTS_ID_NEEDLE: &str = "AvailableCar";
pub const SPOTS_LABEL: &str = "剩餘汽車";

// Sentinels written instead of a number
pub const SENTINEL_MAINTENANCE: &str = "site under maintenance";
pub const SENTINEL_TIMEOUT: &str = "read timeout";
pub const SENTINEL_FETCH_FAILED: &str = "fetch failed";

// Time
pub const UTC_OFFSET_HOURS: i32 = 8; // Asia/Taipei, no DST
pub const OBSERVATION_TS_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const CASE_TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Row-store headers
pub const OBSERVATION_HEADERS: &[&str] = &["Timestamp", "Available"];
pub const CASE_HEADERS: &[&str] = &[
    "Timestamp", "Station", "Caller", "Phone", "Plate", "Category", "Description", "Staff", "Code",
];

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
pub const OBSERVATIONS_FILE: &str = "observations.csv";
pub const CASES_FILE: &str = "cases.csv";
pub const STORE_SEP: char = ',';

// Google Sheets
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

// Recorder view
pub const RECENT_WINDOW_HOURS: i64 = 8;
pub const FALLBACK_ROWS: usize = 3;
pub const PLACEHOLDER: &str = "-- select --";
