// src/fetcher.rs
//
// Scrape-and-record: fetch the page (with retries), pull the available
// spaces count, append one timestamped Observation unless the last stored
// row already carries the same timestamp string.

use std::fmt::{self, Write as _};

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::{
    config::{consts::*, options::FetchOptions},
    core::{html::strip_tags, net::{FetchError, PageSource}},
    progress::{NullProgress, Progress},
    store::{self, Row, RowStore, StoreError},
};

pub mod extract;
pub mod retry;

use extract::{Extraction, Extractor};
use retry::RetryPolicy;

/// One scraped (timestamp, value) pair. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    pub timestamp: String,
    pub value: String,
}

impl Observation {
    pub fn to_row(&self) -> Row {
        row![self.timestamp, self.value]
    }
}

/// Why an attempt produced no number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttemptFailure {
    Fetch(FetchError),
    /// Page came back but no strategy found digits.
    NotFound,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptFailure::Fetch(e) => write!(f, "{e}"),
            AttemptFailure::NotFound => write!(f, "no value on page"),
        }
    }
}

impl AttemptFailure {
    /// Text written to the store in place of a number.
    pub fn sentinel(&self) -> String {
        match self {
            AttemptFailure::NotFound => s!(SENTINEL_MAINTENANCE),
            AttemptFailure::Fetch(FetchError::Timeout) => s!(SENTINEL_TIMEOUT),
            AttemptFailure::Fetch(e) => format!("{SENTINEL_FETCH_FAILED}: {e}"),
        }
    }
}

/// Outcome of the fetch stage. Always convertible to a cell value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reading {
    Spaces(String),
    Unavailable(AttemptFailure),
}

impl Reading {
    pub fn value(&self) -> String {
        match self {
            Reading::Spaces(d) => d.clone(),
            Reading::Unavailable(f) => f.sentinel(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Appended(Observation),
    /// Last row already had this timestamp.
    Skipped(Observation),
}

impl RunOutcome {
    pub fn observation(&self) -> &Observation {
        match self {
            RunOutcome::Appended(o) | RunOutcome::Skipped(o) => o,
        }
    }
}

/// Fixed offset for whole hours east of UTC. Outside -23..=23 it falls
/// back to UTC with a warning.
pub fn fixed_offset(hours: i32) -> FixedOffset {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| {
            logw!("UTC offset {}h out of range, using UTC", hours);
            Utc.fix()
        })
}

/// Current time at a fixed UTC offset (Taipei has no DST).
pub fn now_at(offset_hours: i32) -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&fixed_offset(offset_hours))
}

/// Render `now` with a user-supplied strftime pattern; a bad pattern falls
/// back to the default minute-precision format instead of panicking.
pub fn format_ts(now: &DateTime<FixedOffset>, pattern: &str) -> String {
    let mut out = s!();
    if write!(out, "{}", now.format(pattern)).is_err() {
        logw!("Bad timestamp format {:?}, using {:?}", pattern, OBSERVATION_TS_FORMAT);
        return now.format(OBSERVATION_TS_FORMAT).to_string();
    }
    out
}

/// Fetch + extract with retries. Never fails: exhaustion yields `Unavailable`.
pub fn read_spaces(
    source: &dyn PageSource,
    extractor: &Extractor,
    policy: &RetryPolicy,
    progress: Option<&mut dyn Progress>,
) -> Reading {
    let mut null = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut null,
    };
    progress.begin(policy.attempts() as usize);

    let result = policy.run(
        |attempt| {
            let body = source.fetch().map_err(AttemptFailure::Fetch)?;
            match extractor.extract(&body) {
                Extraction::Found(d) => Ok(d),
                Extraction::NotFound => {
                    let text = strip_tags(&body);
                    let snippet: String = text.chars().take(120).collect();
                    logd!("Extract: attempt {} found nothing; page starts {:?}", attempt, snippet);
                    Err(AttemptFailure::NotFound)
                }
            }
        },
        |attempt, err| progress.attempt_failed(attempt, &err.to_string()),
    );

    let reading = match result {
        Ok(d) => Reading::Spaces(d),
        Err(f) => {
            logw!("Fetch: giving up after {} attempt(s)", policy.attempts());
            Reading::Unavailable(f)
        }
    };
    match &reading {
        Reading::Spaces(d) => progress.log(&format!("Fetch: {} space(s) available", d)),
        Reading::Unavailable(f) => progress.log(&format!("Fetch: giving up, recording {:?}", f.sentinel())),
    }
    progress.finish();
    reading
}

/// Append `obs` unless the last data row has the identical timestamp string.
/// Writes `headers` first when the store is completely empty.
pub fn record(
    store: &mut dyn RowStore,
    obs: Observation,
    headers: &[String],
) -> Result<RunOutcome, StoreError> {
    let rows = store::ensure_header(store, headers)?;

    // Header row never counts as a previous observation.
    let last_ts = rows
        .iter()
        .skip(1)
        .last()
        .and_then(|r| r.first());

    if last_ts.is_some_and(|ts| *ts == obs.timestamp) {
        logf!("Record: {} already present, skipping", obs.timestamp);
        return Ok(RunOutcome::Skipped(obs));
    }

    store.append(&obs.to_row())?;
    logf!("Record: [{}] {} → {}", obs.timestamp, obs.value, store.describe());
    Ok(RunOutcome::Appended(obs))
}

/// One full run: read the page, then record. Only store errors escape.
pub fn run_once(
    source: &dyn PageSource,
    store: &mut dyn RowStore,
    extractor: &Extractor,
    opts: &FetchOptions,
    now: DateTime<FixedOffset>,
    progress: Option<&mut dyn Progress>,
) -> Result<RunOutcome, StoreError> {
    let timestamp = format_ts(&now, &opts.timestamp_format);
    let reading = read_spaces(source, extractor, &opts.retry, progress);
    let obs = Observation { timestamp, value: reading.value() };
    record(store, obs, &opts.headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_by_failure_kind() {
        assert_eq!(AttemptFailure::NotFound.sentinel(), SENTINEL_MAINTENANCE);
        assert_eq!(AttemptFailure::Fetch(FetchError::Timeout).sentinel(), SENTINEL_TIMEOUT);
        assert_eq!(
            AttemptFailure::Fetch(FetchError::Status(503)).sentinel(),
            "fetch failed: HTTP 503"
        );
    }

    #[test]
    fn bad_pattern_falls_back() {
        let t = DateTime::parse_from_rfc3339("2026-10-16T09:05:30+08:00").unwrap();
        assert_eq!(format_ts(&t, "%Y-%m-%d %H:%M"), "2026-10-16 09:05");
        assert_eq!(format_ts(&t, "%Q"), "2026-10-16 09:05");
    }

    #[test]
    fn now_at_uses_offset() {
        let t = now_at(8);
        assert_eq!(t.offset().local_minus_utc(), 8 * 3600);
    }

    #[test]
    fn out_of_range_offset_is_utc_not_a_panic() {
        assert_eq!(fixed_offset(-23).local_minus_utc(), -23 * 3600);
        assert_eq!(fixed_offset(30).local_minus_utc(), 0);
        assert_eq!(now_at(1_000_000).offset().local_minus_utc(), 0);
        assert_eq!(now_at(i32::MIN).offset().local_minus_utc(), 0);
    }
}
