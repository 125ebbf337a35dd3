//! Heuristic auto-categorization: turns file names, tags, kinds and dates
//! into category drafts. The store assigns ids and decides whether a draft
//! duplicates an existing category.

mod artist;
mod heuristics;
mod tags;

pub use artist::{extract_artist, group_by_artist, normalize_artist};
pub use heuristics::{by_artist, by_genre, by_kind, by_year, is_duplicate, rule_category, title_case};
pub use tags::suggest_tags;

/// Auto-categorization passes the store can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Artist,
    Kind,
    Year,
    Genre,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [Strategy::Artist, Strategy::Kind, Strategy::Year, Strategy::Genre];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "artist" | "artists" | "singer" | "singers" => Some(Strategy::Artist),
            "kind" | "type" | "content" => Some(Strategy::Kind),
            "year" | "date" => Some(Strategy::Year),
            "genre" | "genres" => Some(Strategy::Genre),
            _ => None,
        }
    }

    pub fn drafts(
        self,
        files: &[deckcore_model::FileEntity],
        config: &deckcore_config::CatalogConfig,
    ) -> Vec<deckcore_model::NewCategory> {
        match self {
            Strategy::Artist => by_artist(files, config),
            Strategy::Kind => by_kind(files, config),
            Strategy::Year => by_year(files, config),
            Strategy::Genre => by_genre(files, config),
        }
    }
}
