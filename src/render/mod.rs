// src/render/mod.rs
//! PNG chart output. Deliberately plain pixel drawing with no text or
//! theming: the CSVs are the authoritative output, charts are the quick
//! visual check over them.

pub mod heatmap;
pub mod trend;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::dataset::EpisodeDataset;
use crate::summary::SeasonSummary;

/// Line colors assigned to shows in sorted order.
pub(crate) const PALETTE: &[[u8; 3]] = &[
    [214, 69, 65],
    [65, 131, 215],
    [38, 166, 91],
    [244, 179, 80],
    [142, 68, 173],
];

pub(crate) const BACKGROUND: [u8; 3] = [250, 250, 250];
pub(crate) const AXIS: [u8; 3] = [60, 60, 60];
/// Cells for records with no usable viewership figure.
pub(crate) const MISSING: [u8; 3] = [200, 200, 200];

/// Intensity ramp from deep blue to warm yellow; `t` is clamped to [0, 1].
pub(crate) fn ramp(t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    [lerp(33, 253), lerp(66, 231), lerp(104, 37)]
}

/// Render every chart into `dir`: one heatmap per show present in the
/// dataset, plus the cross-show season trend.
pub fn render_all(
    dataset: &EpisodeDataset,
    summaries: &[SeasonSummary],
    dir: impl AsRef<Path>,
) -> Result<()> {
    let dir = dir.as_ref();

    let mut shows: Vec<String> = dataset
        .records()
        .iter()
        .map(|record| record.show.clone())
        .collect();
    shows.sort();
    shows.dedup();

    for show in &shows {
        let path = dir.join(format!("heatmap_{}.png", show));
        heatmap::render_heatmap(dataset, show, &path)?;
    }

    trend::render_trend(summaries, dir.join("season-trend.png"))?;

    info!(charts = shows.len() + 1, dir = %dir.display(), "rendered charts");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::EpisodeRecord;
    use crate::summary::summarize;
    use anyhow::Result;
    use tempfile::TempDir;

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
    fn renders_one_heatmap_per_show_plus_trend() -> Result<()> {
        let dir = TempDir::new()?;

        let mut dataset = EpisodeDataset::new();
        dataset.append(record("A", 1, 1, Some(10.0))).unwrap();
        dataset.append(record("A", 1, 2, None)).unwrap();
        dataset.append(record("A", 2, 1, Some(8.0))).unwrap();
        dataset.append(record("B", 1, 1, Some(2.5))).unwrap();

        let summaries = summarize(&dataset);
        render_all(&dataset, &summaries, dir.path())?;

        for name in ["heatmap_A.png", "heatmap_B.png", "season-trend.png"] {
            let path = dir.path().join(name);
            assert!(path.is_file(), "{} missing", name);
            assert!(std::fs::metadata(&path)?.len() > 0, "{} empty", name);
        }
        Ok(())
    }

    #[test]
    fn ramp_hits_both_ends() {
        assert_eq!(ramp(0.0), [33, 66, 104]);
        assert_eq!(ramp(1.0), [253, 231, 37]);
        assert_eq!(ramp(-1.0), ramp(0.0));
        assert_eq!(ramp(2.0), ramp(1.0));
    }
}
