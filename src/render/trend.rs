// src/render/trend.rs
use std::path::Path;

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};

use super::{AXIS, BACKGROUND, PALETTE};
use crate::summary::SeasonSummary;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;

/// Season number against mean viewership, one polyline per show with small
/// square markers at the data points. The y scale runs from zero to the
/// largest mean across all shows.
pub fn render_trend(summaries: &[SeasonSummary], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, Rgb(BACKGROUND));

    let max_season = summaries.iter().map(|s| s.season).max().unwrap_or(1).max(1);
    let peak = summaries
        .iter()
        .map(|s| s.mean_viewership)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let bottom = (HEIGHT - MARGIN) as i64;
    let left = MARGIN as i64;
    draw_line(&mut img, left, bottom, (WIDTH - MARGIN) as i64, bottom, AXIS);
    draw_line(&mut img, left, MARGIN as i64, left, bottom, AXIS);

    let mut shows: Vec<&str> = summaries.iter().map(|s| s.show.as_str()).collect();
    shows.sort();
    shows.dedup();

    for (index, show) in shows.iter().enumerate() {
        let color = PALETTE[index % PALETTE.len()];
        let points: Vec<(i64, i64)> = summaries
            .iter()
            .filter(|s| s.show == *show)
            .map(|s| (x_at(s.season, max_season), y_at(s.mean_viewership, peak)))
            .collect();

        for pair in points.windows(2) {
            draw_line(&mut img, pair[0].0, pair[0].1, pair[1].0, pair[1].1, color);
        }
        for &(x, y) in &points {
            fill_marker(&mut img, x, y, color);
        }
    }

    img.save(path)
        .with_context(|| format!("failed to write trend chart {}", path.display()))?;
    Ok(())
}

fn x_at(season: u32, max_season: u32) -> i64 {
    let plot = (WIDTH - 2 * MARGIN) as f64;
    let t = if max_season > 1 {
        (season - 1) as f64 / (max_season - 1) as f64
    } else {
        0.5
    };
    (MARGIN as f64 + t * plot).round() as i64
}

fn y_at(value: f64, peak: f64) -> i64 {
    let plot = (HEIGHT - 2 * MARGIN) as f64;
    let t = (value / peak).clamp(0.0, 1.0);
    ((HEIGHT - MARGIN) as f64 - t * plot).round() as i64
}

fn draw_line(img: &mut RgbImage, x0: i64, y0: i64, x1: i64, y1: i64, color: [u8; 3]) {
    let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = (x0 as f64 + (x1 - x0) as f64 * t).round() as i64;
        let y = (y0 as f64 + (y1 - y0) as f64 * t).round() as i64;
        put_pixel_checked(img, x, y, color);
    }
}

fn fill_marker(img: &mut RgbImage, cx: i64, cy: i64, color: [u8; 3]) {
    for y in cy - 2..=cy + 2 {
        for x in cx - 2..=cx + 2 {
            put_pixel_checked(img, x, y, color);
        }
    }
}

fn put_pixel_checked(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::TempDir;

    fn summary(show: &str, season: u32, mean: f64) -> SeasonSummary {
        SeasonSummary {
            show: show.to_string(),
            season,
            mean_viewership: mean,
            min_viewership: mean,
            max_viewership: mean,
            episode_count: 1,
        }
    }

    #[test]
    fn draws_fixed_canvas_with_series_colors() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("season-trend.png");

        let summaries = vec![
            summary("A", 1, 10.0),
            summary("A", 2, 8.0),
            summary("B", 1, 3.0),
            summary("B", 2, 4.5),
        ];
        render_trend(&summaries, &path)?;

        let img = image::open(&path)?.to_rgb8();
        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));

        // season 1 of the first show peaks the scale, so its marker sits at
        // the top of the plot area
        assert_eq!(
            img.get_pixel(x_at(1, 2) as u32, y_at(10.0, 10.0) as u32),
            &Rgb(PALETTE[0])
        );
        // axis corner is drawn
        assert_eq!(
            img.get_pixel(MARGIN, HEIGHT - MARGIN),
            &Rgb(AXIS)
        );
        Ok(())
    }

    #[test]
    fn empty_summaries_still_produce_axes() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("season-trend.png");

        render_trend(&[], &path)?;
        assert!(path.is_file());
        Ok(())
    }
}
