// src/normalize/text.rs
use once_cell::sync::Lazy;
use regex::Regex;

/// Bracketed reference annotations embedded in cell text, e.g. `[a]`, `[12]`,
/// `[note 3]`. Not part of the data value.
static FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("footnote marker regex should be valid"));

static LEADING_INT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)").expect("leading integer regex should be valid"));

/// Remove footnote markers and trim surrounding whitespace.
pub fn strip_footnotes(text: &str) -> String {
    FOOTNOTE.replace_all(text, "").trim().to_string()
}

/// Collapse runs of whitespace (including newlines from multi-line cells)
/// into single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse the leading decimal integer of a cell, ignoring footnote markers
/// and anything after the digits ("14 15" for a double episode parses as 14).
pub fn leading_int(text: &str) -> Option<u32> {
    let cleaned = strip_footnotes(text);
    LEADING_INT
        .captures(&cleaned)
        .and_then(|caps| caps[1].parse().ok())
}

/// Canonical form for header comparison: markers stripped, periods removed,
/// lowercased, whitespace collapsed. "U.S. Viewers (millions)[a]" and
/// "US viewers (millions)" normalize identically.
pub fn normalize_header(text: &str) -> String {
    let stripped = strip_footnotes(text);
    collapse_whitespace(&stripped.to_lowercase().replace('.', ""))
}

/// Trim the quotation marks wrapping episode titles (straight or curly).
pub fn strip_quotes(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\u{201c}' || c == '\u{201d}')
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_footnote_markers() {
        assert_eq!(strip_footnotes("11.2 million[b]"), "11.2 million");
        assert_eq!(strip_footnotes("[a]3[b][note 1]"), "3");
        assert_eq!(strip_footnotes("  plain  "), "plain");
    }

    #[test]
    fn leading_int_ignores_trailing_text() {
        assert_eq!(leading_int("3[a]"), Some(3));
        assert_eq!(leading_int("14 15"), Some(14));
        assert_eq!(leading_int("86"), Some(86));
        assert_eq!(leading_int("S1"), None);
        assert_eq!(leading_int(""), None);
    }

    #[test]
    fn header_normalization_unifies_spellings() {
        assert_eq!(
            normalize_header("U.S. viewers (millions)[a]"),
            "us viewers (millions)"
        );
        assert_eq!(normalize_header("No. in\nseason"), "no in season");
        assert_eq!(normalize_header("Original air date"), "original air date");
    }

    #[test]
    fn strips_title_quotes() {
        assert_eq!(strip_quotes("\"Pilot\""), "Pilot");
        assert_eq!(strip_quotes("\u{201c}Kennedy and Heidi\u{201d}"), "Kennedy and Heidi");
        assert_eq!(strip_quotes("College"), "College");
    }
}
