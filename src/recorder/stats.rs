// src/recorder/stats.rs
use std::collections::HashMap;

use chrono::NaiveDate;

use super::case::{Category, COL_CATEGORY, COL_STAFF, COL_STATION, COL_TS};
use super::view::parse_ts;
use crate::store::Row;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub today: usize,
    pub by_category: Vec<(String, usize)>,
    pub by_station: Vec<(String, usize)>,
    pub by_staff: Vec<(String, usize)>,
}

/// Count desc, then name asc. Blank keys are grouped as "(blank)".
fn tally<S: AsRef<str>>(keys: impl Iterator<Item = S>) -> Vec<(String, usize)> {
    let mut m: HashMap<String, usize> = HashMap::new();
    for k in keys {
        let k = k.as_ref().trim();
        let k = if k.is_empty() { "(blank)" } else { k };
        *m.entry(s!(k)).or_default() += 1;
    }
    let mut v: Vec<(String, usize)> = m.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    v
}

fn cell(r: &Row, i: usize) -> &str {
    r.get(i).map(String::as_str).unwrap_or("")
}

/// Aggregate counts over every data row (row 0 is the header).
pub fn compute(rows: &[Row], today: NaiveDate) -> Stats {
    let data = rows.get(1..).unwrap_or(&[]);

    Stats {
        total: data.len(),
        today: data
            .iter()
            .filter(|r| parse_ts(cell(r, COL_TS)).is_some_and(|t| t.date() == today))
            .count(),
        // Normalize case/spelling through Category so "payment" == "Payment"
        by_category: tally(
            data.iter().map(|r| Category::parse(cell(r, COL_CATEGORY)).label().to_owned()),
        ),
        by_station: tally(data.iter().map(|r| cell(r, COL_STATION))),
        by_staff: tally(data.iter().map(|r| cell(r, COL_STAFF))),
    }
}
