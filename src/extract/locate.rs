// src/extract/locate.rs
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScrapeError;
use crate::shows::TableHint;

static TABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table").expect("table selector should be valid"));
static CAPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("caption").expect("caption selector should be valid"));

/// Find the episode table for `season` within a parsed page.
///
/// Positional hints index the page's `<table>` elements in document order;
/// caption hints take the first table whose caption contains the hint text
/// with `{season}` interpolated. `TableNotFound` is fatal for the show.
pub fn locate_table<'a>(
    doc: &'a Html,
    hint: &TableHint,
    season: u32,
) -> Result<ElementRef<'a>, ScrapeError> {
    let found = match hint {
        TableHint::SeasonOffset(offset) => doc.select(&TABLE).nth(offset + season as usize),
        TableHint::Caption(pattern) => {
            let needle = pattern.replace("{season}", &season.to_string());
            doc.select(&TABLE).find(|table| {
                table
                    .select(&CAPTION)
                    .next()
                    .map(|caption| caption.text().collect::<String>().contains(&needle))
                    .unwrap_or(false)
            })
        }
    };

    found.ok_or_else(|| ScrapeError::TableNotFound {
        hint: hint.to_string(),
        season,
    })
}
