// src/normalize/mod.rs
pub mod dates;
pub mod text;
pub mod viewers;

use tracing::warn;

use crate::dataset::EpisodeRecord;
use crate::error::ScrapeError;
use crate::extract::rows::RawRow;
use crate::shows::{fields, ShowSpec};

/// Converts one `RawRow` into a typed `EpisodeRecord`.
///
/// Season and episode numbers are load-bearing (they form the record key),
/// so a parse failure there drops the whole row. Viewership and air-date
/// failures leave the field unset; a record without a viewership figure is
/// kept but marked invalid, which excludes it from aggregation.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Viewership values above this many millions are treated as unparsed.
    pub ceiling_millions: f64,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer {
            ceiling_millions: viewers::DEFAULT_CEILING_MILLIONS,
        }
    }
}

impl Normalizer {
    pub fn normalize(&self, row: &RawRow, show: &ShowSpec) -> Result<EpisodeRecord, ScrapeError> {
        let season = required_number(row, fields::SEASON)?;
        // single-table pages number episodes with one overall column only
        let episode_field = if row.get(fields::EPISODE).is_some() {
            fields::EPISODE
        } else {
            fields::OVERALL
        };
        let episode = required_number(row, episode_field)?;

        let viewership_millions = row
            .get(fields::VIEWERSHIP)
            .and_then(|raw| viewers::parse_viewership(raw, self.ceiling_millions));
        if viewership_millions.is_none() {
            warn!(
                show = %show.id,
                season,
                episode,
                "no usable viewership figure; record marked invalid"
            );
        }

        let air_date = row.get(fields::AIR_DATE).and_then(dates::parse_air_date);

        let title = row
            .get(fields::TITLE)
            .map(|raw| text::strip_quotes(&text::strip_footnotes(raw)).to_string())
            .filter(|t| !t.is_empty());

        Ok(EpisodeRecord {
            show: show.id.clone(),
            season,
            episode,
            title,
            air_date,
            viewership_millions,
            valid: viewership_millions.is_some(),
        })
    }
}

/// Parse a key field. Zero is rejected along with non-numeric text: season
/// and episode numbering starts at 1 on every tracked page.
fn required_number(row: &RawRow, field: &'static str) -> Result<u32, ScrapeError> {
    let raw = row.get(field).unwrap_or("");
    match text::leading_int(raw) {
        Some(n) if n > 0 => Ok(n),
        _ => Err(ScrapeError::FieldParseFailure {
            field,
            raw: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_show() -> ShowSpec {
        ShowSpec::new("Test_Show", 1..=2)
    }

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        let mut row = RawRow::new();
        for (key, value) in pairs {
            row.insert(key.to_string(), value.to_string());
        }
        row
    }

    #[test]
    fn full_row_normalizes_to_valid_record() {
        let raw = row(&[
            (fields::SEASON, "1"),
            (fields::EPISODE, "3[a]"),
            (fields::VIEWERSHIP, "11.2 million[b]"),
            (fields::AIR_DATE, "January 24, 1999 (1999-01-24)"),
            (fields::TITLE, "\"Denial, Anger, Acceptance\""),
        ]);
        let record = Normalizer::default()
            .normalize(&raw, &test_show())
            .unwrap();

        assert_eq!(record.show, "Test_Show");
        assert_eq!(record.season, 1);
        assert_eq!(record.episode, 3);
        assert_eq!(record.viewership_millions, Some(11.2));
        assert_eq!(
            record.air_date,
            Some(NaiveDate::from_ymd_opt(1999, 1, 24).unwrap())
        );
        assert_eq!(record.title.as_deref(), Some("Denial, Anger, Acceptance"));
        assert!(record.valid);
    }

    #[test]
    fn missing_viewership_invalidates_but_keeps_record() {
        let raw = row(&[
            (fields::SEASON, "2"),
            (fields::EPISODE, "5"),
            (fields::VIEWERSHIP, "N/A"),
        ]);
        let record = Normalizer::default()
            .normalize(&raw, &test_show())
            .unwrap();

        assert_eq!(record.season, 2);
        assert_eq!(record.episode, 5);
        assert_eq!(record.viewership_millions, None);
        assert!(!record.valid);
    }

    #[test]
    fn unparsable_air_date_leaves_record_valid() {
        let raw = row(&[
            (fields::SEASON, "1"),
            (fields::EPISODE, "1"),
            (fields::VIEWERSHIP, "7.5"),
            (fields::AIR_DATE, "mid-1999"),
        ]);
        let record = Normalizer::default()
            .normalize(&raw, &test_show())
            .unwrap();

        assert_eq!(record.air_date, None);
        assert!(record.valid);
    }

    #[test]
    fn overall_numbering_backfills_missing_episode_column() {
        let raw = row(&[
            (fields::SEASON, "1"),
            (fields::OVERALL, "7"),
            (fields::VIEWERSHIP, "9.1"),
        ]);
        let record = Normalizer::default()
            .normalize(&raw, &test_show())
            .unwrap();

        assert_eq!(record.episode, 7);
        assert!(record.valid);
    }

    #[test]
    fn bad_key_fields_drop_the_row() {
        let no_numbering = row(&[(fields::SEASON, "1"), (fields::VIEWERSHIP, "8.0")]);
        let err = Normalizer::default()
            .normalize(&no_numbering, &test_show())
            .unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::FieldParseFailure { field, .. } if field == fields::OVERALL
        ));

        let zero_season = row(&[
            (fields::SEASON, "0"),
            (fields::EPISODE, "1"),
            (fields::VIEWERSHIP, "8.0"),
        ]);
        let err = Normalizer::default()
            .normalize(&zero_season, &test_show())
            .unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::FieldParseFailure { field, .. } if field == fields::SEASON
        ));
    }
}
