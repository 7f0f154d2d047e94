use anyhow::Result;
use std::{fs, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use tvscraper::{
    dataset::EpisodeDataset, export, fetch::HttpFetcher, normalize::Normalizer, pipeline, render,
    shows, summary,
};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tvscraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) configure output dirs ────────────────────────────────────
    let out_dir = PathBuf::from("out");
    let charts_dir = out_dir.join("charts");
    for d in &[&out_dir, &charts_dir] {
        fs::create_dir_all(d)?;
    }

    // ─── 3) scrape every tracked show ────────────────────────────────
    let fetcher = HttpFetcher::new()?;
    let specs = shows::registry();
    let mut dataset = EpisodeDataset::new();
    let stats = pipeline::run_batch(&fetcher, &specs, &Normalizer::default(), &mut dataset);
    info!(
        shows_ok = stats.shows_ok,
        shows_failed = stats.shows_failed,
        records = dataset.len(),
        "extraction finished"
    );
    if dataset.is_empty() {
        error!("no records extracted; leaving outputs untouched");
        anyhow::bail!("extraction produced no records");
    }

    // ─── 4) export CSVs ──────────────────────────────────────────────
    export::write_dataset(&dataset, out_dir.join("tv-show-viewers.csv"))?;
    let summaries = summary::summarize(&dataset);
    export::write_summaries(&summaries, out_dir.join("season-summary.csv"))?;

    // ─── 5) render charts ────────────────────────────────────────────
    render::render_all(&dataset, &summaries, &charts_dir)?;

    info!("all done");
    Ok(())
}
