// src/recorder.rs
//
// Case logging: record model, Create/Edit session, recent/search view and
// aggregate counts. UI-free; the egui frontend in gui/ drives it.

pub mod case;
pub mod session;
pub mod stats;
pub mod view;

pub use case::{CaseForm, CaseRecord, Category, ValidationError};
pub use session::{Mode, Session, SubmitError, SubmitOutcome};
pub use stats::Stats;
pub use view::{RecordView, ViewKind};
