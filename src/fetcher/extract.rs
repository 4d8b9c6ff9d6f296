// src/fetcher/extract.rs
//
// Ordered extraction strategies over one page body. Each returns a typed
// `Extraction`; the chain stops at the first `Found`.

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::config::options::ExtractOptions;
use crate::core::{html::element_text, sanitize::digits_only};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extraction {
    /// Non-empty ASCII digit string.
    Found(String),
    NotFound,
}

impl Extraction {
    /// Digits of `text`, or NotFound if there are none.
    fn from_text(text: &str) -> Self {
        let d = digits_only(text);
        if d.is_empty() { Extraction::NotFound } else { Extraction::Found(d) }
    }

    pub fn found(self) -> Option<String> {
        match self {
            Extraction::Found(d) => Some(d),
            Extraction::NotFound => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("bad selector {0:?}: {1}")]
    Selector(String, String),
    #[error("bad label pattern: {0}")]
    Regex(#[from] regex::Error),
}

#[derive(Clone, Debug)]
pub enum Strategy {
    /// Element whose `id` equals this exactly.
    ElementId { id: String, any_id: Selector },
    /// First `tag` element whose `id` contains `needle`.
    IdContains { tag: Selector, needle: String },
    /// Digits following a text label in the raw body; markup in between is skipped.
    LabelRegex(Regex),
}

fn selector(src: &str) -> Result<Selector, ExtractError> {
    Selector::parse(src).map_err(|e| ExtractError::Selector(s!(src), format!("{e:?}")))
}

impl Strategy {
    pub fn element_id(id: &str) -> Result<Self, ExtractError> {
        Ok(Strategy::ElementId { id: s!(id), any_id: selector("[id]")? })
    }

    pub fn id_contains(tag: &str, needle: &str) -> Result<Self, ExtractError> {
        Ok(Strategy::IdContains { tag: selector(tag)?, needle: s!(needle) })
    }

    /// `label`, then up to 8 runs of non-digit text or tags, then the number.
    pub fn label_regex(label: &str) -> Result<Self, ExtractError> {
        let pat = format!(r"{}(?:[^\d<>]{{1,12}}|<[^>]*>){{0,8}}?(\d[\d,]*)", regex::escape(label));
        Ok(Strategy::LabelRegex(Regex::new(&pat)?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ElementId { .. } => "element-id",
            Strategy::IdContains { .. } => "id-contains",
            Strategy::LabelRegex(_) => "label-regex",
        }
    }

    pub fn apply(&self, doc: &Html, raw: &str) -> Extraction {
        match self {
            Strategy::ElementId { id, any_id } => doc
                .select(any_id)
                .filter(|el| el.value().id() == Some(id.as_str()))
                .map(|el| Extraction::from_text(&element_text(el)))
                .find(|x| matches!(x, Extraction::Found(_)))
                .unwrap_or(Extraction::NotFound),

            Strategy::IdContains { tag, needle } => doc
                .select(tag)
                .filter(|el| el.value().id().is_some_and(|v| v.contains(needle.as_str())))
                .map(|el| Extraction::from_text(&element_text(el)))
                .find(|x| matches!(x, Extraction::Found(_)))
                .unwrap_or(Extraction::NotFound),

            Strategy::LabelRegex(re) => re
                .captures_iter(raw)
                .filter_map(|c| c.get(1))
                .map(|m| Extraction::from_text(m.as_str()))
                .find(|x| matches!(x, Extraction::Found(_)))
                .unwrap_or(Extraction::NotFound),
        }
    }
}

/// The full fallback chain.
#[derive(Clone, Debug)]
pub struct Extractor {
    strategies: Vec<Strategy>,
}

impl Extractor {
    /// element-id → id-contains → label-regex, built from options.
    pub fn new(opts: &ExtractOptions) -> Result<Self, ExtractError> {
        Ok(Self {
            strategies: vec![
                Strategy::element_id(&opts.element_id)?,
                Strategy::id_contains(&opts.scan_tag, &opts.id_needle)?,
                Strategy::label_regex(&opts.label)?,
            ],
        })
    }

    pub fn from_strategies(strategies: Vec<Strategy>) -> Self {
        Self { strategies }
    }

    pub fn strategies(&self) -> &[Strategy] { &self.strategies }

    /// First hit and the strategy that produced it.
    pub fn extract_named(&self, raw: &str) -> Option<(&'static str, String)> {
        let doc = Html::parse_document(raw);
        self.strategies.iter().find_map(|st| {
            st.apply(&doc, raw).found().map(|d| (st.name(), d))
        })
    }

    pub fn extract(&self, raw: &str) -> Extraction {
        match self.extract_named(raw) {
            Some((name, d)) => {
                logd!("Extract: {} → {}", name, d);
                Extraction::Found(d)
            }
            None => Extraction::NotFound,
        }
    }
}
