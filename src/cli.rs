// src/cli.rs
//
// `spotlog-fetch`: one scrape-and-record run, meant for an hourly cron.
// Exit status: 0 when an observation was appended or skipped as duplicate,
// non-zero when the store (or the configuration) is unusable.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};

use crate::{
    config::{
        consts::*,
        options::{ExtractOptions, FetchOptions, StoreKind, StoreOptions},
    },
    core::net::HttpSource,
    fetcher::{self, extract::Extractor, retry::{Backoff, RetryPolicy}, RunOutcome},
    log::{self, LogTarget},
    progress::LogProgress,
    store,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    Csv,
    Sheets,
    Memory,
}

#[derive(Parser, Debug)]
#[command(name = "spotlog-fetch", version, about = "Record the current free parking spaces")]
pub struct Args {
    /// Page to scrape
    #[arg(long, env = "SPOTLOG_URL", default_value = TARGET_URL)]
    pub url: String,

    /// Attempts before recording a sentinel
    #[arg(long, env = "SPOTLOG_ATTEMPTS", default_value_t = MAX_ATTEMPTS)]
    pub attempts: u32,

    /// Lower bound of the random pause between attempts (ms)
    #[arg(long, default_value_t = RETRY_MIN_MS)]
    pub retry_min_ms: u64,

    /// Upper bound of the random pause between attempts (ms)
    #[arg(long, default_value_t = RETRY_MAX_MS)]
    pub retry_max_ms: u64,

    /// Per-request timeout (s)
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, default_value = SPOTS_ELEMENT_ID)]
    pub element_id: String,

    #[arg(long, default_value = SPOTS_ID_NEEDLE)]
    pub id_needle: String,

    #[arg(long, default_value = SPOTS_LABEL)]
    pub label: String,

    /// Hours east of UTC used for timestamps
    #[arg(
        long,
        env = "SPOTLOG_UTC_OFFSET",
        default_value_t = UTC_OFFSET_HOURS,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i32).range(-23..=23)
    )]
    pub utc_offset: i32,

    /// strftime pattern; its precision is the dedupe granularity
    #[arg(long, env = "SPOTLOG_TS_FORMAT", default_value = OBSERVATION_TS_FORMAT)]
    pub ts_format: String,

    #[arg(long, value_enum, env = "SPOTLOG_STORE", default_value = "csv", ignore_case = true)]
    pub store: StoreArg,

    /// CSV file (default .store/observations.csv)
    #[arg(long, env = "SPOTLOG_CSV_PATH")]
    pub csv: Option<PathBuf>,

    #[arg(long, env = "SPOTLOG_SHEET_ID")]
    pub sheet_id: Option<String>,

    #[arg(long, env = "SPOTLOG_SHEET_NAME", default_value = "Sheet1")]
    pub sheet_name: String,

    /// OAuth bearer token for the Sheets API
    #[arg(long, env = "SPOTLOG_SHEETS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Fetch and print the value; do not touch the store
    #[arg(long)]
    pub check: bool,
}

impl Args {
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            url: self.url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy {
                max_attempts: self.attempts,
                backoff: Backoff::Jitter {
                    min: Duration::from_millis(self.retry_min_ms),
                    max: Duration::from_millis(self.retry_max_ms),
                },
            },
            extract: ExtractOptions {
                element_id: self.element_id.clone(),
                id_needle: self.id_needle.clone(),
                label: self.label.clone(),
                ..ExtractOptions::default()
            },
            utc_offset_hours: self.utc_offset,
            timestamp_format: self.ts_format.clone(),
            ..FetchOptions::default()
        }
    }

    pub fn store_options(&self) -> StoreOptions {
        match self.store {
            StoreArg::Csv => match &self.csv {
                Some(path) => StoreOptions { kind: StoreKind::Csv { path: path.clone() } },
                None => StoreOptions::csv(OBSERVATIONS_FILE),
            },
            StoreArg::Sheets => StoreOptions {
                kind: StoreKind::Sheets {
                    spreadsheet_id: self.sheet_id.clone().unwrap_or_default(),
                    sheet: self.sheet_name.clone(),
                    token: self.token.clone(),
                },
            },
            StoreArg::Memory => StoreOptions { kind: StoreKind::Memory },
        }
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    log::init(LogTarget::Stderr);

    let opts = args.fetch_options();
    let extractor = Extractor::new(&opts.extract).wrap_err("invalid extraction settings")?;
    logd!(
        "Extract: chain {:?}",
        extractor.strategies().iter().map(|s| s.name()).collect::<Vec<_>>()
    );
    let source = HttpSource::new(&opts).wrap_err("could not build HTTP client")?;
    let now = fetcher::now_at(opts.utc_offset_hours);
    let mut progress = LogProgress::default();

    if args.check {
        let reading = fetcher::read_spaces(&source, &extractor, &opts.retry, Some(&mut progress));
        println!("{}", reading.value());
        return Ok(());
    }

    // Fatal from here on: an unusable store means nothing was recorded.
    let mut store = store::open(&args.store_options()).wrap_err("row-store unavailable")?;
    let outcome = fetcher::run_once(&source, store.as_mut(), &extractor, &opts, now, Some(&mut progress))
        .wrap_err_with(|| format!("writing to {} failed", store.describe()))?;

    match outcome {
        RunOutcome::Appended(o) => println!("[{}] recorded: {}", o.timestamp, o.value),
        RunOutcome::Skipped(o) => println!("[{}] already recorded, skipped", o.timestamp),
    }
    Ok(())
}
