// src/render/heatmap.rs
use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use tracing::debug;

use super::{ramp, BACKGROUND, MISSING};
use crate::dataset::{EpisodeDataset, EpisodeRecord};

const CELL: u32 = 24;
const GAP: u32 = 2;
const MARGIN: u32 = 12;

/// Season-by-episode grid for one show: rows are seasons, columns are
/// episodes. Cell brightness scales against the show's own peak figure;
/// invalid records render gray, absent cells stay background.
pub fn render_heatmap(
    dataset: &EpisodeDataset,
    show: &str,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let records: Vec<&EpisodeRecord> = dataset
        .records()
        .iter()
        .filter(|record| record.show == show)
        .collect();

    let max_season = records.iter().map(|r| r.season).max().unwrap_or(0);
    let max_episode = records.iter().map(|r| r.episode).max().unwrap_or(0);
    if max_season == 0 || max_episode == 0 {
        debug!(show, "no records to render");
        return Ok(());
    }
    let peak = records
        .iter()
        .filter_map(|r| r.viewership_millions)
        .fold(0.0_f64, f64::max);

    let width = MARGIN * 2 + max_episode * (CELL + GAP) - GAP;
    let height = MARGIN * 2 + max_season * (CELL + GAP) - GAP;
    let mut img = RgbImage::from_pixel(width, height, Rgb(BACKGROUND));

    for record in &records {
        let color = match record.viewership_millions {
            Some(viewers) if peak > 0.0 => ramp(viewers / peak),
            _ => MISSING,
        };
        let x0 = MARGIN + (record.episode - 1) * (CELL + GAP);
        let y0 = MARGIN + (record.season - 1) * (CELL + GAP);
        fill_cell(&mut img, x0, y0, color);
    }

    img.save(path)
        .with_context(|| format!("failed to write heatmap {}", path.display()))?;
    Ok(())
}

fn fill_cell(img: &mut RgbImage, x0: u32, y0: u32, color: [u8; 3]) {
    for y in y0..y0 + CELL {
        for x in x0..x0 + CELL {
            img.put_pixel(x, y, Rgb(color));
        }
    }
}
