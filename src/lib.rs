// src/lib.rs
//! Episode viewership extraction for a fixed set of TV series: fetch each
//! show's episode-list page, normalize its tables into typed records,
//! derive per-season statistics, and write CSVs plus PNG charts.

pub mod dataset;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod shows;
pub mod summary;
