// src/recorder/case.rs
//
// Case record ⇄ store row, the form a submission is built from, and the
// required-field check.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::sanitize::is_blank;
use crate::store::Row;

// Column positions in the store (see consts::CASE_HEADERS)
pub const COL_TS: usize = 0;
pub const COL_STATION: usize = 1;
pub const COL_CALLER: usize = 2;
pub const COL_PHONE: usize = 3;
pub const COL_PLATE: usize = 4;
pub const COL_CATEGORY: usize = 5;
pub const COL_DESCRIPTION: usize = 6;
pub const COL_STAFF: usize = 7;
pub const COL_CODE: usize = 8;
pub const CASE_COLS: usize = 9;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Payment,
    LostTicket,
    Gate,
    Equipment,
    Complaint,
    Other,
    /// A label written by someone else; kept verbatim.
    Unknown(String),
}

impl Category {
    /// Choices offered by the form, in display order.
    pub const ALL: [Category; 6] = [
        Category::Payment,
        Category::LostTicket,
        Category::Gate,
        Category::Equipment,
        Category::Complaint,
        Category::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Payment => "Payment",
            Category::LostTicket => "Lost ticket",
            Category::Gate => "Gate / barrier",
            Category::Equipment => "Equipment fault",
            Category::Complaint => "Complaint",
            Category::Other => "Other",
            Category::Unknown(s) => s,
        }
    }

    pub fn parse(label: &str) -> Self {
        let t = label.trim();
        Self::ALL
            .iter()
            .find(|c| c.label().eq_ignore_ascii_case(t))
            .cloned()
            .unwrap_or_else(|| Category::Unknown(s!(t)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRecord {
    pub timestamp: String,
    pub station: String,
    pub caller: String,
    pub phone: String,
    pub plate: String,
    pub category: Category,
    pub description: String,
    pub staff: String,
    pub code: Option<String>,
}

impl CaseRecord {
    pub fn to_row(&self) -> Row {
        row![
            self.timestamp,
            self.station,
            self.caller,
            self.phone,
            self.plate,
            self.category,
            self.description,
            self.staff,
            self.code.as_deref().unwrap_or(""),
        ]
    }

    /// Lenient: short rows (Sheets trims trailing blanks) pad with "".
    pub fn from_row(row: &[String]) -> Self {
        let cell = |i: usize| row.get(i).cloned().unwrap_or_default();
        let code = cell(COL_CODE);
        Self {
            timestamp: cell(COL_TS),
            station: cell(COL_STATION),
            caller: cell(COL_CALLER),
            phone: cell(COL_PHONE),
            plate: cell(COL_PLATE),
            category: Category::parse(&cell(COL_CATEGORY)),
            description: cell(COL_DESCRIPTION),
            staff: cell(COL_STAFF),
            code: if code.trim().is_empty() { None } else { Some(code) },
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("missing required field(s): {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
}

/// What the user typed. `category: None` is the placeholder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseForm {
    pub station: String,
    pub caller: String,
    pub phone: String,
    pub plate: String,
    pub category: Option<Category>,
    pub description: String,
    pub staff: String,
}

impl CaseForm {
    pub fn from_record(rec: &CaseRecord) -> Self {
        Self {
            station: rec.station.clone(),
            caller: rec.caller.clone(),
            phone: rec.phone.clone(),
            plate: rec.plate.clone(),
            category: Some(rec.category.clone()),
            description: rec.description.clone(),
            staff: rec.staff.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if is_blank(&self.station) { missing.push("station"); }
        if is_blank(&self.staff) { missing.push("staff"); }
        match &self.category {
            None => missing.push("category"),
            Some(Category::Unknown(s)) if is_blank(s) => missing.push("category"),
            Some(_) => {}
        }
        if missing.is_empty() { Ok(()) } else { Err(ValidationError { missing }) }
    }

    /// Trimmed record. Call after `validate`.
    pub fn to_record(&self, timestamp: String, code: Option<String>) -> CaseRecord {
        CaseRecord {
            timestamp,
            station: s!(self.station.trim()),
            caller: s!(self.caller.trim()),
            phone: s!(self.phone.trim()),
            plate: self.plate.trim().to_uppercase(),
            category: self.category.clone().unwrap_or(Category::Other),
            description: s!(self.description.trim()),
            staff: s!(self.staff.trim()),
            code,
        }
    }
}

/// `YYYYMMDD-NNN`, NNN = 1 + the highest number issued that day, so a
/// deleted or recoded row never causes a repeat.
pub fn next_code(date: NaiveDate, rows: &[Row]) -> String {
    let prefix = join!(&date.format("%Y%m%d").to_string(), "-");
    let highest = rows
        .iter()
        .skip(1)
        .filter_map(|r| r.get(COL_CODE)?.trim().strip_prefix(prefix.as_str())?.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("{prefix}{:03}", highest + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_round_trips_verbatim() {
        assert_eq!(Category::parse("lost TICKET"), Category::LostTicket);
        let c = Category::parse("Refund");
        assert_eq!(c, Category::Unknown(s!("Refund")));
        assert_eq!(c.label(), "Refund");
    }

    #[test]
    fn short_row_pads() {
        let rec = CaseRecord::from_row(&row!["2026-10-16 09:00:00", "North"]);
        assert_eq!(rec.station, "North");
        assert_eq!(rec.staff, "");
        assert_eq!(rec.code, None);
        assert_eq!(rec.to_row().len(), CASE_COLS);
    }

    #[test]
    fn validation_lists_every_missing_field() {
        let form = CaseForm { station: s!(crate::config::consts::PLACEHOLDER), ..CaseForm::default() };
        let err = form.validate().unwrap_err();
        assert_eq!(err.missing, vec!["station", "staff", "category"]);
        assert_eq!(err.to_string(), "missing required field(s): station, staff, category");
    }

    #[test]
    fn codes_count_per_day() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        let mut rows = vec![row!["Timestamp"]];
        assert_eq!(next_code(d, &rows), "20261016-001");
        rows.push(row!["", "", "", "", "", "", "", "", "20261016-001"]);
        rows.push(row!["", "", "", "", "", "", "", "", "20261015-004"]);
        assert_eq!(next_code(d, &rows), "20261016-002");
    }

    #[test]
    fn codes_follow_the_highest_not_the_count() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        // 001 deleted by hand; only 002 and 003 remain
        let rows = vec![
            row!["Timestamp"],
            row!["", "", "", "", "", "", "", "", "20261016-003"],
            row!["", "", "", "", "", "", "", "", "20261016-002"],
            row!["", "", "", "", "", "", "", "", "20261016-x"],
        ];
        assert_eq!(next_code(d, &rows), "20261016-004");
    }
}
