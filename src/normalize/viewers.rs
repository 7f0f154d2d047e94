// src/normalize/viewers.rs
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use super::text::strip_footnotes;

/// Upper bound on believable per-episode U.S. viewership, in millions.
/// Anything above this is almost certainly a mis-parsed compound cell.
pub const DEFAULT_CEILING_MILLIONS: f64 = 60.0;

/// Cells that mean "no figure published".
static PLACEHOLDERS: &[&str] = &["n/a", "na", "tba", "tbd", "-", "\u{2013}", "\u{2014}"];

static THOUSANDS_SEP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d),(\d)").expect("thousands separator regex should be valid"));

static UNIT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*millions?\s*$").expect("unit suffix regex should be valid"));

static DECIMAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("decimal regex should be valid"));

/// Parse a viewership cell into millions of viewers.
///
/// Rule chain, first applicable wins:
/// - footnote markers stripped, then empty or placeholder cells are unset
/// - a trailing "million"/"millions" unit word is dropped; bare numbers are
///   already in millions on the tracked pages
/// - thousands separators are joined before the decimal parse
/// - zero and negative values are unset, not zero: a broadcast audience of
///   zero is a missing figure, not a measurement
/// - values above `ceiling_millions` are unset with a warning
pub fn parse_viewership(raw: &str, ceiling_millions: f64) -> Option<f64> {
    let cleaned = strip_footnotes(raw);
    if cleaned.is_empty() {
        return None;
    }
    if PLACEHOLDERS.contains(&cleaned.to_lowercase().as_str()) {
        return None;
    }

    let without_unit = UNIT_SUFFIX.replace(&cleaned, "");
    let joined = THOUSANDS_SEP.replace_all(&without_unit, "$1$2");
    let value: f64 = DECIMAL.find(&joined)?.as_str().parse().ok()?;

    if value <= 0.0 {
        debug!(raw, "zero or negative viewership treated as unset");
        return None;
    }
    if value > ceiling_millions {
        warn!(raw, value, ceiling_millions, "viewership above sanity ceiling");
        return None;
    }
    Some(value)
}
