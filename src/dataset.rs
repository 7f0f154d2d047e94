// src/dataset.rs
use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// One fully normalized episode. `(show, season, episode)` is the record
/// key; `valid` marks records that carry a usable viewership figure.
#[derive(Debug, Clone, PartialEq)]
pub struct EpisodeRecord {
    pub show: String,
    pub season: u32,
    pub episode: u32,
    /// Kept for logs and inspection; not part of the export contract.
    pub title: Option<String>,
    pub air_date: Option<NaiveDate>,
    pub viewership_millions: Option<f64>,
    pub valid: bool,
}

/// Append-only, insertion-ordered collection of episode records for one
/// pipeline run. Appends enforce key uniqueness; everything else is
/// read-only access for the aggregator and exporters.
#[derive(Debug, Default)]
pub struct EpisodeDataset {
    records: Vec<EpisodeRecord>,
    seen: HashSet<(String, u32, u32)>,
}

impl EpisodeDataset {
    pub fn new() -> Self {
        EpisodeDataset::default()
    }

    /// Append a record. A duplicate `(show, season, episode)` key means the
    /// table locator or row extractor mis-fired, so the caller is expected
    /// to abort that show's extraction.
    pub fn append(&mut self, record: EpisodeRecord) -> Result<(), ScrapeError> {
        let key = (record.show.clone(), record.season, record.episode);
        if !self.seen.insert(key) {
            return Err(ScrapeError::DuplicateKey {
                show: record.show,
                season: record.season,
                episode: record.episode,
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// All records, insertion order (page table order).
    pub fn records(&self) -> &[EpisodeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sub-sequence used for aggregation.
    pub fn filter_valid(&self) -> impl Iterator<Item = &EpisodeRecord> {
        self.records.iter().filter(|record| record.valid)
    }

    /// Flatten to plain export rows in insertion order.
    pub fn to_rows(&self) -> Vec<DatasetRow> {
        self.records.iter().map(DatasetRow::from_record).collect()
    }
}

/// Raw-export row. Field order is the CSV column contract:
/// `show, season, episode, air_date, viewership_millions, valid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRow {
    pub show: String,
    pub season: u32,
    pub episode: u32,
    pub air_date: Option<NaiveDate>,
    pub viewership_millions: Option<f64>,
    pub valid: bool,
}

impl DatasetRow {
    fn from_record(record: &EpisodeRecord) -> Self {
        DatasetRow {
            show: record.show.clone(),
            season: record.season,
            episode: record.episode,
            air_date: record.air_date,
            viewership_millions: record.viewership_millions,
            valid: record.valid,
        }
    }

    /// Rehydrate a record from a re-parsed raw export. The title column is
    /// not exported, so it comes back unset.
    pub fn into_record(self) -> EpisodeRecord {
        EpisodeRecord {
            show: self.show,
            season: self.season,
            episode: self.episode,
            title: None,
            air_date: self.air_date,
            viewership_millions: self.viewership_millions,
            valid: self.valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(show: &str, season: u32, episode: u32, viewers: Option<f64>) -> EpisodeRecord {
        EpisodeRecord {
            show: show.to_string(),
            season,
            episode,
            title: None,
            air_date: None,
            viewership_millions: viewers,
            valid: viewers.is_some(),
        }
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("A", 1, 1, Some(10.0))).unwrap();

        let err = dataset.append(record("A", 1, 1, Some(11.0))).unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::DuplicateKey {
                season: 1,
                episode: 1,
                ..
            }
        ));
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn same_episode_number_differs_by_season_and_show() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("A", 1, 1, Some(10.0))).unwrap();
        dataset.append(record("A", 2, 1, Some(10.0))).unwrap();
        dataset.append(record("B", 1, 1, Some(10.0))).unwrap();
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn rows_keep_insertion_order() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("B", 1, 2, Some(9.0))).unwrap();
        dataset.append(record("A", 1, 1, None)).unwrap();
        dataset.append(record("B", 1, 1, Some(8.0))).unwrap();

        let rows = dataset.to_rows();
        let keys: Vec<(&str, u32, u32)> = rows
            .iter()
            .map(|r| (r.show.as_str(), r.season, r.episode))
            .collect();
        assert_eq!(keys, vec![("B", 1, 2), ("A", 1, 1), ("B", 1, 1)]);
    }

    #[test]
    fn filter_valid_excludes_unset_viewership() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("A", 1, 1, Some(10.0))).unwrap();
        dataset.append(record("A", 1, 2, None)).unwrap();
        dataset.append(record("A", 1, 3, Some(12.0))).unwrap();

        let valid: Vec<u32> = dataset.filter_valid().map(|r| r.episode).collect();
        assert_eq!(valid, vec![1, 3]);
    }
}
