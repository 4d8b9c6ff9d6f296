// tests/fetch_pipeline.rs
//
// Scrape-and-record end to end, with a scripted page source instead of the
// network and an in-memory store.

use std::cell::RefCell;
use std::collections::VecDeque;

use chrono::DateTime;
use spotlog::config::consts::*;
use spotlog::config::options::FetchOptions;
use spotlog::core::net::{FetchError, PageSource};
use spotlog::fetcher::{
    self,
    extract::Extractor,
    retry::{Backoff, RetryPolicy},
    RunOutcome,
};
use spotlog::progress::{NullProgress, Progress};
use spotlog::store::{MemoryStore, RowStore, StoreError, Row};

/// Hands out scripted responses in order; repeats the last one forever.
struct Scripted {
    replies: RefCell<VecDeque<Result<String, FetchError>>>,
    calls: RefCell<u32>,
}

impl Scripted {
    fn new(replies: Vec<Result<&str, FetchError>>) -> Self {
        let replies = replies.into_iter().map(|r| r.map(String::from)).collect();
        Self { replies: RefCell::new(replies), calls: RefCell::new(0) }
    }
    fn calls(&self) -> u32 { *self.calls.borrow() }
}

impl PageSource for Scripted {
    fn fetch(&self) -> Result<String, FetchError> {
        *self.calls.borrow_mut() += 1;
        let mut q = self.replies.borrow_mut();
        if q.len() > 1 { q.pop_front().unwrap() } else { q.front().cloned().unwrap() }
    }
}

#[derive(Default)]
struct Counting { failed: Vec<u32>, begun: usize, finished: bool, lines: Vec<String> }
impl Progress for Counting {
    fn begin(&mut self, total: usize) { self.begun = total; }
    fn attempt_failed(&mut self, attempt: u32, _reason: &str) { self.failed.push(attempt); }
    fn log(&mut self, msg: &str) { self.lines.push(msg.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

fn opts() -> FetchOptions {
    FetchOptions {
        retry: RetryPolicy { max_attempts: 3, backoff: Backoff::None },
        ..FetchOptions::default()
    }
}

fn at(rfc3339: &str) -> chrono::DateTime<chrono::FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap()
}

const EXACT_ID: &str = r#"<html><body><span id="ContentPlaceHolder1_lblAvailableCar">57</span></body></html>"#;
const MAINTENANCE: &str = "<html><body><h1>系統維護中</h1></body></html>";

#[test]
fn first_run_writes_header_then_value() {
    let src = Scripted::new(vec![Ok(EXACT_ID)]);
    let ex = Extractor::new(&opts().extract).unwrap();
    let mut store = MemoryStore::default();

    let out = fetcher::run_once(&src, &mut store, &ex, &opts(), at("2026-10-16T09:00:12+08:00"), None).unwrap();

    assert!(matches!(out, RunOutcome::Appended(_)));
    assert_eq!(store.rows(), &[
        vec![s("Timestamp"), s("Available")],
        vec![s("2026-10-16 09:00"), s("57")],
    ]);
    assert_eq!(src.calls(), 1);
}

#[test]
fn same_minute_is_skipped() {
    let src = Scripted::new(vec![Ok(EXACT_ID)]);
    let ex = Extractor::new(&opts().extract).unwrap();
    let mut store = MemoryStore::default();

    fetcher::run_once(&src, &mut store, &ex, &opts(), at("2026-10-16T09:00:01+08:00"), None).unwrap();
    let again = fetcher::run_once(&src, &mut store, &ex, &opts(), at("2026-10-16T09:00:59+08:00"), None).unwrap();

    assert!(matches!(again, RunOutcome::Skipped(_)));
    assert_eq!(store.rows().len(), 2);

    // Next minute is a new observation
    let later = fetcher::run_once(&src, &mut store, &ex, &opts(), at("2026-10-16T09:01:00+08:00"), None).unwrap();
    assert!(matches!(later, RunOutcome::Appended(_)));
    assert_eq!(store.rows().len(), 3);
}

#[test]
fn retries_then_succeeds() {
    let src = Scripted::new(vec![Err(FetchError::Timeout), Ok(MAINTENANCE), Ok(EXACT_ID)]);
    let ex = Extractor::new(&opts().extract).unwrap();
    let mut store = MemoryStore::default();
    let mut progress = Counting::default();

    let out = fetcher::run_once(
        &src, &mut store, &ex, &opts(), at("2026-10-16T10:00:00+08:00"), Some(&mut progress),
    )
    .unwrap();

    assert_eq!(out.observation().value, "57");
    assert_eq!(src.calls(), 3);
    assert_eq!(progress.failed, vec![1, 2]);
    assert_eq!(progress.begun, 3);
    assert!(progress.finished);
    assert_eq!(progress.lines.len(), 1);
    assert!(progress.lines[0].contains("57"));
}

#[test]
fn exhausted_attempts_record_sentinel() {
    let ex = Extractor::new(&opts().extract).unwrap();

    let cases = [
        (Ok(MAINTENANCE), s(SENTINEL_MAINTENANCE)),
        (Err(FetchError::Timeout), s(SENTINEL_TIMEOUT)),
        (Err(FetchError::Status(502)), format!("{SENTINEL_FETCH_FAILED}: HTTP 502")),
    ];
    for (reply, want) in cases {
        let src = Scripted::new(vec![reply]);
        let mut store = MemoryStore::default();
        let out = fetcher::run_once(&src, &mut store, &ex, &opts(), at("2026-10-16T11:00:00+08:00"), None).unwrap();
        assert_eq!(out.observation().value, want);
        assert_eq!(src.calls(), 3);
        assert_eq!(store.rows()[1][1], want);
    }
}

#[test]
fn existing_rows_are_untouched() {
    let src = Scripted::new(vec![Ok(EXACT_ID)]);
    let ex = Extractor::new(&opts().extract).unwrap();
    let prior: Vec<Row> = vec![
        vec![s("Timestamp"), s("Available")],
        vec![s("2026-10-16 08:00"), s("12")],
    ];
    let mut store = MemoryStore::with_rows(prior.clone());

    fetcher::run_once(&src, &mut store, &ex, &opts(), at("2026-10-16T09:00:00+08:00"), None).unwrap();

    assert_eq!(&store.rows()[..2], &prior[..]);
    assert_eq!(store.rows()[2], vec![s("2026-10-16 09:00"), s("57")]);
}

/// A store that refuses writes.
struct ReadOnly;
impl RowStore for ReadOnly {
    fn append(&mut self, _row: &[String]) -> Result<(), StoreError> {
        Err(StoreError::MissingCredentials(s("no token")))
    }
    fn read_all(&self) -> Result<Vec<Row>, StoreError> { Ok(Vec::new()) }
    fn update(&mut self, _i: usize, _row: &[String]) -> Result<(), StoreError> { Ok(()) }
    fn describe(&self) -> String { s("read-only") }
}

#[test]
fn store_errors_escape() {
    let src = Scripted::new(vec![Ok(EXACT_ID)]);
    let ex = Extractor::new(&opts().extract).unwrap();
    let res = fetcher::run_once(&src, &mut ReadOnly, &ex, &opts(), at("2026-10-16T09:00:00+08:00"), None);
    assert!(matches!(res, Err(StoreError::MissingCredentials(_))));
}

fn s(x: &str) -> String { x.to_string() }

#[test]
fn only_the_last_row_is_compared() {
    let src = Scripted::new(vec![Ok(EXACT_ID)]);
    let ex = Extractor::new(&opts().extract).unwrap();
    let mut store = MemoryStore::with_rows(vec![
        vec![s("Timestamp"), s("Available")],
        vec![s("2026-10-16 09:00"), s("40")],
        vec![s("2026-10-16 08:00"), s("41")],
    ]);

    let out = fetcher::run_once(
        &src, &mut store, &ex, &opts(), at("2026-10-16T09:00:30+08:00"), Some(&mut NullProgress),
    )
    .unwrap();

    assert!(matches!(out, RunOutcome::Appended(_)));
    assert_eq!(store.rows().len(), 4);
    assert_eq!(store.rows()[3], vec![s("2026-10-16 09:00"), s("57")]);
}
