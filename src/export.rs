// src/export.rs
use std::path::Path;

use anyhow::{Context, Result};
use csv::{Reader, Writer};
use tracing::info;

use crate::dataset::{DatasetRow, EpisodeDataset};
use crate::summary::SeasonSummary;

/// Write the raw dataset CSV: one row per record in extraction order, with
/// columns `show, season, episode, air_date, viewership_millions, valid`.
/// Invalid records are included; downstream consumers filter on `valid`.
pub fn write_dataset(dataset: &EpisodeDataset, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("failed to create dataset CSV at {}", path.display()))?;

    for row in dataset.to_rows() {
        wtr.serialize(row)
            .with_context(|| format!("failed to write dataset row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("failed to flush dataset CSV at {}", path.display()))?;

    info!(path = %path.display(), records = dataset.len(), "wrote raw dataset");
    Ok(())
}

/// Read a raw dataset CSV back through the same column contract. Rows pass
/// through `EpisodeDataset::append`, so key uniqueness is enforced on the
/// way in.
pub fn read_dataset(path: impl AsRef<Path>) -> Result<EpisodeDataset> {
    let path = path.as_ref();
    let mut rdr = Reader::from_path(path)
        .with_context(|| format!("failed to open dataset CSV at {}", path.display()))?;

    let mut dataset = EpisodeDataset::new();
    for (index, result) in rdr.deserialize::<DatasetRow>().enumerate() {
        let row: DatasetRow = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), index))?;
        dataset.append(row.into_record())?;
    }
    Ok(dataset)
}

/// Write the season summary CSV. The mean is written with three decimal
/// places; min and max are the observed values unchanged.
pub fn write_summaries(summaries: &[SeasonSummary], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = Writer::from_path(path)
        .with_context(|| format!("failed to create summary CSV at {}", path.display()))?;

    wtr.write_record([
        "show",
        "season",
        "mean_viewership",
        "min_viewership",
        "max_viewership",
        "episode_count",
    ])
    .context("failed to write summary CSV header")?;

    for summary in summaries {
        wtr.write_record([
            summary.show.clone(),
            summary.season.to_string(),
            format!("{:.3}", summary.mean_viewership),
            summary.min_viewership.to_string(),
            summary.max_viewership.to_string(),
            summary.episode_count.to_string(),
        ])
        .with_context(|| format!("failed to write summary row to {}", path.display()))?;
    }
    wtr.flush()
        .with_context(|| format!("failed to flush summary CSV at {}", path.display()))?;

    info!(path = %path.display(), rows = summaries.len(), "wrote season summaries");
    Ok(())
}
