// src/store/csv_file.rs
use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};

use super::{check_update_index, Row, RowStore, StoreError};
use crate::config::consts::STORE_SEP;
use crate::csv::{parse_rows, rows_to_string, write_row};

/// Rows kept in a single local CSV file. Created on first append.
#[derive(Clone, Debug)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
    pub fn path(&self) -> &Path { &self.path }

    fn ensure_parent(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }
        Ok(())
    }
}

/// True when `file` is non-empty and its last byte is not a newline
/// (hand-edited or exported elsewhere).
fn missing_final_newline(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

impl RowStore for CsvStore {
    fn append(&mut self, row: &[String]) -> Result<(), StoreError> {
        self.ensure_parent()?;
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        let unterminated = missing_final_newline(&mut file).map_err(|e| StoreError::io(&self.path, e))?;
        let mut out = BufWriter::new(file);
        if unterminated {
            out.write_all(b"\n").map_err(|e| StoreError::io(&self.path, e))?;
        }
        write_row(&mut out, row, STORE_SEP).map_err(|e| StoreError::io(&self.path, e))?;
        out.flush().map_err(|e| StoreError::io(&self.path, e))
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_rows(&text, STORE_SEP)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    fn update(&mut self, row_index: usize, row: &[String]) -> Result<(), StoreError> {
        let mut rows = self.read_all()?;
        check_update_index(row_index, rows.len())?;
        rows[row_index] = row.to_vec();

        // Write beside the target, then swap in.
        let tmp = self.path.with_extension("csv.tmp");
        fs::write(&tmp, rows_to_string(&rows, STORE_SEP)).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}
