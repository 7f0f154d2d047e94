// src/bin/inspect_dataset.rs
use anyhow::Result;
use std::collections::BTreeMap;
use std::{env, process::exit};
use tvscraper::export;

fn main() {
    // Expect at most one CLI argument: path to a raw dataset CSV.
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [DATASET_CSV]", args[0]);
        exit(1);
    }
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("out/tv-show-viewers.csv");

    if let Err(e) = inspect(path) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

/// Re-read an exported dataset through the column contract and print
/// per-show, per-season record counts.
fn inspect(path: &str) -> Result<()> {
    let dataset = export::read_dataset(path)?;

    println!("=== Dataset: {} ===", path);
    println!("Total records: {}", dataset.len());
    println!("Valid records: {}", dataset.filter_valid().count());
    println!();

    // (show, season) → (total, valid)
    let mut counts: BTreeMap<(String, u32), (usize, usize)> = BTreeMap::new();
    for record in dataset.records() {
        let entry = counts
            .entry((record.show.clone(), record.season))
            .or_default();
        entry.0 += 1;
        if record.valid {
            entry.1 += 1;
        }
    }

    let mut current_show = String::new();
    for ((show, season), (total, valid)) in &counts {
        if *show != current_show {
            println!("{}", show);
            current_show = show.clone();
        }
        println!(
            "  season {:>2}: {:>3} episodes ({} valid)",
            season, total, valid
        );
    }

    Ok(())
}
