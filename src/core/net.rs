// src/core/net.rs
//
// Blocking HTTP GET with browser-ish headers. One request per call; the
// retry loop lives in fetcher::retry so tests can drive it without a network.

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use thiserror::Error;

use crate::config::options::FetchOptions;

/// Transient failure of a single attempt. Never escapes the fetcher;
/// it is folded into a sentinel string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("timed out")]
    Timeout,
    #[error("HTTP {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if let Some(status) = e.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

/// Anything that can hand back a page body.
pub trait PageSource {
    fn fetch(&self) -> Result<String, FetchError>;
}

pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-TW,zh;q=0.9,en;q=0.8"));
        if let Some(r) = &opts.referer {
            let v = HeaderValue::from_str(r).map_err(|e| FetchError::Transport(e.to_string()))?;
            headers.insert(REFERER, v);
        }

        let client = Client::builder()
            .user_agent(opts.user_agent.as_str())
            .default_headers(headers)
            .timeout(opts.timeout)
            .build()?;

        Ok(Self { client, url: opts.url.clone() })
    }
}

impl PageSource for HttpSource {
    fn fetch(&self) -> Result<String, FetchError> {
        logd!("GET {}", self.url);
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        // Body decoded per Content-Type charset; the site serves UTF-8.
        Ok(resp.text()?)
    }
}
