// src/summary.rs
use std::collections::BTreeMap;

use crate::dataset::EpisodeDataset;

/// Per-(show, season) viewership statistics, derived on demand and never
/// persisted; recomputation replaces the whole set.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSummary {
    pub show: String,
    pub season: u32,
    pub mean_viewership: f64,
    pub min_viewership: f64,
    pub max_viewership: f64,
    pub episode_count: usize,
}

/// Group valid records by (show, season) and compute viewership statistics.
///
/// Output is ordered by show then season, ascending. A season whose records
/// are all invalid contributes no row at all, rather than a zero/NaN row.
pub fn summarize(dataset: &EpisodeDataset) -> Vec<SeasonSummary> {
    let mut groups: BTreeMap<(String, u32), Vec<f64>> = BTreeMap::new();
    for record in dataset.filter_valid() {
        if let Some(viewers) = record.viewership_millions {
            groups
                .entry((record.show.clone(), record.season))
                .or_default()
                .push(viewers);
        }
    }

    groups
        .into_iter()
        .map(|((show, season), values)| {
            let count = values.len();
            let sum: f64 = values.iter().sum();
            let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            SeasonSummary {
                show,
                season,
                mean_viewership: sum / count as f64,
                min_viewership: min,
                max_viewership: max,
                episode_count: count,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EpisodeRecord;

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
    fn mean_ignores_invalid_records() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("A", 1, 1, Some(10.0))).unwrap();
        dataset.append(record("A", 1, 2, Some(12.0))).unwrap();
        dataset.append(record("A", 1, 3, Some(14.0))).unwrap();
        dataset.append(record("A", 1, 4, None)).unwrap();

        let summaries = summarize(&dataset);
        assert_eq!(summaries.len(), 1);

        let s = &summaries[0];
        assert_eq!(s.mean_viewership, 12.0);
        assert_eq!(s.min_viewership, 10.0);
        assert_eq!(s.max_viewership, 14.0);
        assert_eq!(s.episode_count, 3);
    }

    #[test]
    fn all_invalid_season_produces_no_row() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("A", 1, 1, Some(10.0))).unwrap();
        dataset.append(record("A", 2, 1, None)).unwrap();
        dataset.append(record("A", 2, 2, None)).unwrap();

        let summaries = summarize(&dataset);
        let seasons: Vec<u32> = summaries.iter().map(|s| s.season).collect();
        assert_eq!(seasons, vec![1]);
    }

    #[test]
    fn ordered_by_show_then_season() {
        let mut dataset = EpisodeDataset::new();
        dataset.append(record("Zeta", 2, 1, Some(5.0))).unwrap();
        dataset.append(record("Alpha", 1, 1, Some(3.0))).unwrap();
        dataset.append(record("Zeta", 1, 1, Some(4.0))).unwrap();

        let order: Vec<(String, u32)> = summarize(&dataset)
            .into_iter()
            .map(|s| (s.show, s.season))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Alpha".to_string(), 1),
                ("Zeta".to_string(), 1),
                ("Zeta".to_string(), 2),
            ]
        );
    }
}
