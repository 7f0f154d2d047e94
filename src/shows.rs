// src/shows.rs
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// Canonical field names used as `RawRow` keys once a header matches an
/// alias. Headers with no alias match keep their normalized text as the key.
pub mod fields {
    pub const SEASON: &str = "season";
    pub const EPISODE: &str = "episode";
    pub const OVERALL: &str = "overall";
    pub const TITLE: &str = "title";
    pub const DIRECTED_BY: &str = "directed_by";
    pub const WRITTEN_BY: &str = "written_by";
    pub const AIR_DATE: &str = "air_date";
    pub const VIEWERSHIP: &str = "viewership";
}

/// Accepted header spellings per canonical field, in normalized form
/// (lowercased, periods and footnote markers stripped, whitespace collapsed).
pub type AliasTable = BTreeMap<&'static str, Vec<&'static str>>;

/// How to find the episode table for a given season within a page.
#[derive(Debug, Clone)]
pub enum TableHint {
    /// The table for season N is the `offset + N`-th `<table>` in document
    /// order. The tracked pages open with a series-overview table, so season
    /// numbers line up with table positions at offset 0.
    SeasonOffset(usize),
    /// The first table whose `<caption>` contains this text, with the
    /// literal `{season}` replaced by the season number.
    Caption(String),
}

impl fmt::Display for TableHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableHint::SeasonOffset(offset) => write!(f, "table at season+{}", offset),
            TableHint::Caption(text) => write!(f, "caption containing {:?}", text),
        }
    }
}

/// Static configuration for one tracked series.
#[derive(Debug, Clone)]
pub struct ShowSpec {
    /// Identifier used in output rows and chart filenames.
    pub id: String,
    /// Page-name segment: the episode list lives at `List_of_{slug}_episodes`.
    pub slug: String,
    /// Seasons to extract, each expected to have its own episode table.
    pub seasons: RangeInclusive<u32>,
    pub hint: TableHint,
    pub aliases: AliasTable,
}

impl ShowSpec {
    pub fn new(id: &str, seasons: RangeInclusive<u32>) -> Self {
        ShowSpec {
            id: id.to_string(),
            slug: id.to_string(),
            seasons,
            hint: TableHint::SeasonOffset(0),
            aliases: default_aliases(),
        }
    }
}

static TRACKED_SHOWS: &[(&str, u32)] = &[
    ("The_Sopranos", 6),
    ("Game_of_Thrones", 8),
    ("Breaking_Bad", 5),
];

/// The tracked series, seasons 1..=final for each.
pub fn registry() -> Vec<ShowSpec> {
    TRACKED_SHOWS
        .iter()
        .map(|&(id, last_season)| ShowSpec::new(id, 1..=last_season))
        .collect()
}

/// Header spellings seen across the tracked pages. Keys are the canonical
/// field names; values must already be in normalized header form.
pub fn default_aliases() -> AliasTable {
    let mut aliases = AliasTable::new();
    aliases.insert(
        fields::OVERALL,
        vec!["no overall", "no", "no in series", "overall number"],
    );
    aliases.insert(
        fields::EPISODE,
        vec!["no in season", "no in season episode", "ep", "episode"],
    );
    aliases.insert(fields::TITLE, vec!["title", "episode title"]);
    aliases.insert(fields::DIRECTED_BY, vec!["directed by"]);
    aliases.insert(fields::WRITTEN_BY, vec!["written by"]);
    aliases.insert(
        fields::AIR_DATE,
        vec![
            "original air date",
            "original release date",
            "first aired",
        ],
    );
    aliases.insert(
        fields::VIEWERSHIP,
        vec![
            "us viewers (millions)",
            "us viewers (in millions)",
            "viewers (millions)",
            "us viewers",
        ],
    );
    aliases
}
