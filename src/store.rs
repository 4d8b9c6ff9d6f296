// src/store.rs
//
// Row-store: an ordered list of string rows, row 0 being the header.
// Backends: a local CSV file, a Google Sheets worksheet, or memory.
//
// Row indices are positions in `read_all()` output (header = 0). They are
// the only identity a row has, so an edit can hit the wrong row if someone
// else appends or reorders in between. Last writer wins.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::config::options::{StoreKind, StoreOptions};

mod csv_file;
mod memory;
mod sheets;

pub use csv_file::CsvStore;
pub use memory::MemoryStore;
pub use sheets::SheetsStore;

pub type Row = Vec<String>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: io::Error },

    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("invalid store address: {0}")]
    InvalidAddress(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheets API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {index} out of range (store has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("row 0 is the header and cannot be edited")]
    HeaderRow,
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io { path: path.into(), source }
    }
}

/// Append / read-all / update-in-place over rows of strings.
pub trait RowStore {
    /// Add `row` after the last existing row.
    fn append(&mut self, row: &[String]) -> Result<(), StoreError>;

    /// Every row, header first. An empty store yields an empty Vec.
    fn read_all(&self) -> Result<Vec<Row>, StoreError>;

    /// Replace the row at `row_index` (a `read_all` position, > 0).
    fn update(&mut self, row_index: usize, row: &[String]) -> Result<(), StoreError>;

    /// Human-readable location for logs and the status line.
    fn describe(&self) -> String;
}

/// Open the backend selected by `opts`.
pub fn open(opts: &StoreOptions) -> Result<Box<dyn RowStore>, StoreError> {
    let store: Box<dyn RowStore> = match &opts.kind {
        StoreKind::Csv { path } => Box::new(CsvStore::new(path.clone())),
        StoreKind::Sheets { spreadsheet_id, sheet, token } => {
            Box::new(SheetsStore::new(spreadsheet_id, sheet, token.as_deref())?)
        }
        StoreKind::Memory => Box::new(MemoryStore::default()),
    };
    logd!("Store: opened {}", store.describe());
    Ok(store)
}

/// Write `headers` if the store holds nothing at all. Returns the rows as read.
pub fn ensure_header(store: &mut dyn RowStore, headers: &[String]) -> Result<Vec<Row>, StoreError> {
    let rows = store.read_all()?;
    if rows.is_empty() && !headers.is_empty() {
        store.append(headers)?;
        logf!("Store: wrote header row to {}", store.describe());
        return Ok(vec![headers.to_vec()]);
    }
    Ok(rows)
}

/// Shared bounds check for `update`.
pub(crate) fn check_update_index(index: usize, len: usize) -> Result<(), StoreError> {
    if index == 0 {
        return Err(StoreError::HeaderRow);
    }
    if index >= len {
        return Err(StoreError::RowOutOfRange { index, len });
    }
    Ok(())
}
