// src/recorder/session.rs
//
// Create/Edit state for the form. The remembered row index lives in
// `Mode::Edit` and nowhere else.

use chrono::{DateTime, FixedOffset};
use thiserror::Error;

use super::case::{next_code, CaseForm, CaseRecord, ValidationError};
use crate::config::consts::{CASE_HEADERS, CASE_TS_FORMAT};
use crate::store::{self, RowStore, StoreError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit { row_index: usize, prefill: CaseRecord },
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(CaseRecord),
    Updated { row_index: usize, record: CaseRecord },
}

#[derive(Clone, Debug)]
pub struct Session {
    mode: Mode,
    pub form: CaseForm,
}

impl Default for Session {
    fn default() -> Self {
        Self { mode: Mode::Create, form: CaseForm::default() }
    }
}

impl Session {
    pub fn new() -> Self { Self::default() }

    pub fn mode(&self) -> &Mode { &self.mode }

    pub fn is_editing(&self) -> bool { matches!(self.mode, Mode::Edit { .. }) }

    /// Remember `row_index` and load its cells into the form.
    pub fn begin_edit(&mut self, row_index: usize, row: &[String]) {
        let prefill = CaseRecord::from_row(row);
        self.form = CaseForm::from_record(&prefill);
        logf!("Form: edit row {} ({})", row_index, prefill.timestamp);
        self.mode = Mode::Edit { row_index, prefill };
    }

    /// Back to Create, nothing written.
    pub fn cancel_edit(&mut self) {
        if let Mode::Edit { row_index, .. } = self.mode {
            logd!("Form: edit of row {} cancelled", row_index);
        }
        self.mode = Mode::Create;
        self.form = CaseForm::default();
    }

    /// Validate, then append (Create) or replace the remembered row (Edit).
    /// On success the form clears and the mode is Create. On error nothing
    /// changes, so the user can fix the input and retry.
    pub fn submit(
        &mut self,
        store: &mut dyn RowStore,
        now: DateTime<FixedOffset>,
    ) -> Result<SubmitOutcome, SubmitError> {
        self.form.validate()?;

        let outcome = match &self.mode {
            Mode::Create => {
                let headers: Vec<String> = CASE_HEADERS.iter().map(|h| s!(*h)).collect();
                let rows = store::ensure_header(store, &headers)?;
                let code = next_code(now.date_naive(), &rows);
                let record = self.form.to_record(now.format(CASE_TS_FORMAT).to_string(), Some(code));
                store.append(&record.to_row())?;
                logf!("Form: created {:?} at {}", record.code, store.describe());
                SubmitOutcome::Created(record)
            }
            Mode::Edit { row_index, prefill } => {
                // Identity is position only; timestamp and code stay as first recorded.
                let record = self.form.to_record(prefill.timestamp.clone(), prefill.code.clone());
                store.update(*row_index, &record.to_row())?;
                logf!("Form: updated row {} at {}", row_index, store.describe());
                SubmitOutcome::Updated { row_index: *row_index, record }
            }
        };

        self.mode = Mode::Create;
        self.form = CaseForm::default();
        Ok(outcome)
    }
}
