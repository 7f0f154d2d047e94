// src/error.rs
use thiserror::Error;

/// Failure taxonomy for the extraction pipeline.
///
/// `TableNotFound` and `DuplicateKey` are fatal for the show being scraped
/// (the batch moves on to the next show). `RowShapeMismatch` and
/// `FieldParseFailure` are recoverable: the offending row or field is
/// dropped or left unset and extraction continues.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("no table matches hint `{hint}` for season {season}")]
    TableNotFound { hint: String, season: u32 },

    #[error("row {index}: expected {expected} cells, found {found}")]
    RowShapeMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("unparsable {field} value {raw:?}")]
    FieldParseFailure { field: &'static str, raw: String },

    #[error("duplicate episode key {show} season {season} episode {episode}")]
    DuplicateKey {
        show: String,
        season: u32,
        episode: u32,
    },
}
