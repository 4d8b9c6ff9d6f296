// src/core/html.rs
//
// Small helpers on top of `scraper`. Text from the page goes through the
// same whitespace/entity cleanup whichever strategy found it.

use scraper::ElementRef;

use super::sanitize::{normalize_entities, normalize_ws};

/// All descendant text of `el`, whitespace collapsed.
pub fn element_text(el: ElementRef<'_>) -> String {
    let joined: String = el.text().collect();
    normalize_ws(&normalize_entities(&joined))
}

/// Remove all HTML tags `<...>` from the string, then collapse whitespace.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&normalize_entities(&out))
}
