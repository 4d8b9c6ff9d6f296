// src/store/memory.rs
use super::{check_update_index, Row, RowStore, StoreError};

/// In-process store for tests and dry runs.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Row>,
}

impl MemoryStore {
    pub fn with_rows(rows: Vec<Row>) -> Self { Self { rows } }
    pub fn rows(&self) -> &[Row] { &self.rows }
}

impl RowStore for MemoryStore {
    fn append(&mut self, row: &[String]) -> Result<(), StoreError> {
        self.rows.push(row.to_vec());
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        Ok(self.rows.clone())
    }

    fn update(&mut self, row_index: usize, row: &[String]) -> Result<(), StoreError> {
        check_update_index(row_index, self.rows.len())?;
        self.rows[row_index] = row.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        format!("memory ({} rows)", self.rows.len())
    }
}
