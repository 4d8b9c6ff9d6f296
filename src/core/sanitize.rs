// src/core/sanitize.rs

use crate::config::consts::PLACEHOLDER;

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ").replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Keep ASCII digits only. "1,234 輛" → "1234".
/// Full-width digits (０-９) are folded to ASCII first.
pub fn digits_only(s: &str) -> String {
    s.chars()
        .filter_map(|ch| match ch {
            '0'..='9' => Some(ch),
            '０'..='９' => char::from_u32(ch as u32 - '０' as u32 + '0' as u32),
            _ => None,
        })
        .collect()
}

/// Case-insensitive substring test (Unicode lowercase on both sides).
pub fn contains_ci(haystack: &str, needle_lc: &str) -> bool {
    if needle_lc.is_empty() { return true; }
    haystack.to_lowercase().contains(needle_lc)
}

/// Empty, whitespace, or the form's "-- select --" placeholder.
pub fn is_blank(s: &str) -> bool {
    let t = s.trim();
    t.is_empty() || t == PLACEHOLDER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_strips_units_and_separators() {
        assert_eq!(digits_only(" 1,234 輛 "), "1234");
        assert_eq!(digits_only("１２"), "12");
        assert_eq!(digits_only("維護中"), "");
    }

    #[test]
    fn blank_covers_placeholder() {
        assert!(is_blank("   "));
        assert!(is_blank(PLACEHOLDER));
        assert!(!is_blank("North gate"));
    }

    #[test]
    fn contains_ci_lowercases_haystack() {
        assert!(contains_ci("ABC-1234", "abc"));
        assert!(!contains_ci("ABC-1234", "xyz"));
    }
}
