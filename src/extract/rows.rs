// src/extract/rows.rs
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use scraper::{element_ref, ElementRef, Selector};
use tracing::{debug, warn};

use crate::error::ScrapeError;
use crate::normalize::text::{collapse_whitespace, normalize_header};
use crate::shows::AliasTable;

static TR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("tr selector should be valid"));
static CELL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th, td").expect("cell selector should be valid"));

/// One table row as column name → raw cell text. Keys are canonical field
/// names where the header matched an alias, normalized header text
/// otherwise. Empty cells are kept as empty strings so columns never shift.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    fields: BTreeMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        RawRow::default()
    }

    pub fn insert(&mut self, key: String, value: String) {
        self.fields.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Walk a located episode table into `RawRow`s.
///
/// The first `<tr>` is the header; its cells resolve against `aliases` to
/// canonical field names. Later rows made entirely of `<th>` cells are
/// sub-header dividers and carry no episode data. Rows whose cell count
/// differs from the header are skipped and recorded, not fatal.
pub fn extract_rows<'a>(table: ElementRef<'a>, aliases: &AliasTable) -> RowIter<'a> {
    let mut rows = table.select(&TR);
    let columns = match rows.next() {
        Some(header_row) => resolve_columns(header_row, aliases),
        None => {
            warn!("episode table has no rows");
            Vec::new()
        }
    };
    debug!(?columns, "resolved table columns");

    RowIter {
        rows,
        columns,
        row_index: 0,
        warnings: Vec::new(),
    }
}

/// Lazy, non-restartable stream of data rows from one table.
pub struct RowIter<'a> {
    rows: element_ref::Select<'a, 'static>,
    columns: Vec<String>,
    row_index: usize,
    warnings: Vec<ScrapeError>,
}

impl<'a> RowIter<'a> {
    /// Resolved column names, header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Shape mismatches recorded while iterating so far.
    pub fn warnings(&self) -> &[ScrapeError] {
        &self.warnings
    }
}

impl<'a> Iterator for RowIter<'a> {
    type Item = RawRow;

    fn next(&mut self) -> Option<RawRow> {
        loop {
            let row = self.rows.next()?;
            self.row_index += 1;

            let cells: Vec<ElementRef> = row.select(&CELL).collect();
            if cells.is_empty() {
                continue;
            }
            if cells.iter().all(|cell| cell.value().name() == "th") {
                debug!(row = self.row_index, "skipping sub-header row");
                continue;
            }
            if cells.len() != self.columns.len() {
                let err = ScrapeError::RowShapeMismatch {
                    index: self.row_index,
                    expected: self.columns.len(),
                    found: cells.len(),
                };
                warn!("{}", err);
                self.warnings.push(err);
                continue;
            }

            let mut raw = RawRow::new();
            for (name, cell) in self.columns.iter().zip(&cells) {
                raw.insert(name.clone(), cell_text(*cell));
            }
            return Some(raw);
        }
    }
}

fn resolve_columns(header_row: ElementRef, aliases: &AliasTable) -> Vec<String> {
    header_row
        .select(&CELL)
        .map(|cell| {
            let normalized = normalize_header(&cell_text(cell));
            aliases
                .iter()
                .find(|(_, spellings)| spellings.iter().any(|s| *s == normalized))
                .map(|(canonical, _)| canonical.to_string())
                .unwrap_or(normalized)
        })
        .collect()
}

/// Text nodes joined with spaces so `<br>`-separated words stay separated,
/// then whitespace collapsed.
fn cell_text(cell: ElementRef) -> String {
    collapse_whitespace(&cell.text().collect::<Vec<_>>().join(" "))
}
