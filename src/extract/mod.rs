// src/extract/mod.rs
//! Turns parsed pages into raw field mappings: `locate` finds the episode
//! table for a season, `rows` walks it into `RawRow`s.

pub mod locate;
pub mod rows;

pub use locate::locate_table;
pub use rows::{extract_rows, RawRow, RowIter};
