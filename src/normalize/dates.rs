// src/normalize/dates.rs
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::text::strip_footnotes;

/// ISO date emitted by the wiki start-date template inside parentheses,
/// e.g. "January 10, 1999 (1999-01-10)".
static PAREN_ISO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((\d{4}-\d{2}-\d{2})\)").expect("parenthesized ISO date regex should be valid")
});

/// Plain-text date formats seen across the tracked pages, tried in order.
static TEXT_FORMATS: &[&str] = &["%B %d, %Y", "%d %B %Y", "%Y-%m-%d"];

/// Parse an air-date cell into a calendar date. The first matching rule
/// wins; `None` means every rule failed (the caller leaves the field unset).
pub fn parse_air_date(raw: &str) -> Option<NaiveDate> {
    let cleaned = strip_footnotes(raw);
    if cleaned.is_empty() {
        return None;
    }

    // 1) prefer the machine-readable ISO date when the template emits one
    if let Some(caps) = PAREN_ISO.captures(&cleaned) {
        if let Ok(date) = NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
            return Some(date);
        }
    }

    // 2) fall back to the human-readable spellings
    for format in TEXT_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&cleaned, format) {
            return Some(date);
        }
    }

    None
}
