// src/pipeline.rs
use anyhow::{Context, Result};
use scraper::Html;
use tracing::{error, info, warn};

use crate::dataset::EpisodeDataset;
use crate::extract::{extract_rows, locate_table};
use crate::fetch::PageSource;
use crate::normalize::Normalizer;
use crate::shows::{fields, ShowSpec};

/// Counters from one show's extraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShowStats {
    /// Records appended to the dataset.
    pub appended: usize,
    /// Rows dropped for unparsable season/episode numbers.
    pub dropped: usize,
    /// Rows skipped for cell-count mismatches.
    pub skipped: usize,
}

/// Counters from a whole batch.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchStats {
    pub shows_ok: usize,
    pub shows_failed: usize,
    pub appended: usize,
}

/// Extract one show: fetch its page once, then walk each season's episode
/// table in order.
///
/// A missing table or a duplicate record key aborts the show; records
/// appended before the abort stay in the dataset.
#[tracing::instrument(
    level = "info",
    skip(source, spec, normalizer, dataset),
    fields(show = %spec.id)
)]
pub fn run_show(
    source: &dyn PageSource,
    spec: &ShowSpec,
    normalizer: &Normalizer,
    dataset: &mut EpisodeDataset,
) -> Result<ShowStats> {
    // 1) fetch and parse the page once, shared across seasons
    let html = source
        .fetch_page(spec)
        .with_context(|| format!("failed to fetch page for {}", spec.id))?;
    let doc = Html::parse_document(&html);

    let mut stats = ShowStats::default();

    // 2) walk one episode table per season
    for season in spec.seasons.clone() {
        let table = locate_table(&doc, &spec.hint, season)?;
        let mut rows = extract_rows(table, &spec.aliases);

        for mut raw in rows.by_ref() {
            // the table's season context travels with the row
            raw.insert(fields::SEASON.to_string(), season.to_string());

            let record = match normalizer.normalize(&raw, spec) {
                Ok(record) => record,
                Err(err) => {
                    warn!(season, "{}; row dropped", err);
                    stats.dropped += 1;
                    continue;
                }
            };

            dataset.append(record)?;
            stats.appended += 1;
        }
        stats.skipped += rows.warnings().len();
    }

    info!(
        appended = stats.appended,
        dropped = stats.dropped,
        skipped = stats.skipped,
        "show extracted"
    );
    Ok(stats)
}

/// Run every show against one shared dataset. Failures are isolated per
/// show: a fatal error on one show is logged and the batch moves on, so a
/// single malformed page never blocks the others.
pub fn run_batch(
    source: &dyn PageSource,
    specs: &[ShowSpec],
    normalizer: &Normalizer,
    dataset: &mut EpisodeDataset,
) -> BatchStats {
    let mut stats = BatchStats::default();

    for spec in specs {
        match run_show(source, spec, normalizer, dataset) {
            Ok(show_stats) => {
                stats.shows_ok += 1;
                stats.appended += show_stats.appended;
            }
            Err(err) => {
                error!("{} failed: {}", spec.id, err);
                stats.shows_failed += 1;
            }
        }
    }

    stats
}
