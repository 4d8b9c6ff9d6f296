// src/recorder/view.rs
//
// Which stored rows the table shows. Zero-copy: a list of store row
// indices over the rows as read (row 0 = header, never shown).
//
// - search term  → every row with a cell containing it (case-insensitive)
// - no term      → rows stamped in [now - N hours, now], newest first
// - empty window → the last K rows, newest first

use chrono::{Duration, NaiveDateTime};

use super::case::COL_TS;
use crate::config::options::RecorderOptions;
use crate::core::sanitize::contains_ci;
use crate::store::Row;

/// Timestamp shapes seen in the sheet over time.
const TS_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y/%m/%d %H:%M:%S", "%Y/%m/%d %H:%M"];

pub fn parse_ts(s: &str) -> Option<NaiveDateTime> {
    let t = s.trim();
    TS_FORMATS.iter().find_map(|f| NaiveDateTime::parse_from_str(t, f).ok())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewKind {
    /// Nothing stored yet.
    Empty,
    Window,
    Fallback,
    Search,
}

#[derive(Clone, Debug)]
pub struct RecordView<'a> {
    pub kind: ViewKind,
    /// Store row indices, in display order
    pub row_ix: Vec<usize>,
    rows: &'a [Row],
}

impl<'a> RecordView<'a> {
    pub fn build(rows: &'a [Row], query: &str, now: NaiveDateTime, opts: &RecorderOptions) -> Self {
        let data = 1..rows.len().max(1);

        if data.is_empty() {
            return Self { kind: ViewKind::Empty, row_ix: Vec::new(), rows };
        }

        let q = query.trim().to_lowercase();
        if !q.is_empty() {
            let row_ix = data
                .rev()
                .filter(|&i| rows[i].iter().any(|cell| contains_ci(cell, &q)))
                .collect();
            return Self { kind: ViewKind::Search, row_ix, rows };
        }

        let cutoff = now - Duration::hours(opts.window_hours);
        let mut recent: Vec<(NaiveDateTime, usize)> = data
            .clone()
            .filter_map(|i| {
                let ts = rows[i].get(COL_TS).and_then(|c| parse_ts(c))?;
                // Rows stamped after `now` (skewed clock, hand edits) are not recent.
                (cutoff..=now).contains(&ts).then_some((ts, i))
            })
            .collect();

        if !recent.is_empty() {
            // Newest first; same stamp → later row first
            recent.sort_by(|a, b| b.cmp(a));
            let row_ix = recent.into_iter().map(|(_, i)| i).collect();
            return Self { kind: ViewKind::Window, row_ix, rows };
        }

        let row_ix = data.rev().take(opts.fallback_rows).collect();
        Self { kind: ViewKind::Fallback, row_ix, rows }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    /// Borrow a single row by display position (no cloning).
    pub fn row(&self, i: usize) -> Option<&'a [String]> {
        let rows = self.rows;
        self.row_ix.get(i).and_then(|&ix| rows.get(ix).map(|r| r.as_slice()))
    }

    /// (store row index, cells) in display order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &'a [String])> + '_ {
        let rows = self.rows;
        self.row_ix.iter().filter_map(move |&ix| rows.get(ix).map(|r| (ix, r.as_slice())))
    }

    pub fn caption(&self) -> String {
        match self.kind {
            ViewKind::Empty => s!("No records yet"),
            ViewKind::Window => format!("{} record(s) in the recent window", self.len()),
            ViewKind::Fallback => format!("Nothing recent; latest {} record(s)", self.len()),
            ViewKind::Search if self.is_empty() => s!("No matches"),
            ViewKind::Search => format!("{} match(es)", self.len()),
        }
    }
}
