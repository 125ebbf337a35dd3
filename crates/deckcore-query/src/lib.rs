//! View derivation over the file collection.
//!
//! Every function here is pure: it reads the collections it is handed and
//! returns references into them, in the order a view should render.

use std::fmt;
use std::str::FromStr;

use deckcore_model::{FilterKind, FilterOperator, FilterValue};
use serde::{Deserialize, Serialize};

mod clips;
mod counts;
mod filters;
mod matching;
mod view;

pub use clips::{derive_clip_view, ClipQuery, ClipSortKey};
pub use counts::{builtin_counts, live_count, BuiltinCounts};
pub use filters::{filter_matches, validate_filter};
pub use matching::{
    category_contains, contains_case_insensitive, matches_rules, matches_term, matches_text,
};
pub use view::{derive_view, sort_files, FileView};

#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("{kind:?} filter does not support the {operator:?} operator")]
    UnsupportedOperator {
        kind: FilterKind,
        operator: FilterOperator,
    },

    #[error("{kind:?} filter with {operator:?} cannot take value {value}")]
    MismatchedValue {
        kind: FilterKind,
        operator: FilterOperator,
        value: String,
    },

    #[error("unknown field {field:?} for {kind:?} filter")]
    UnknownField { kind: FilterKind, field: String },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Category ids the sidebar always offers. Anything else is looked up
/// among the user's categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinCategory {
    All,
    Videos,
    Images,
    Audio,
    Documents,
    Archives,
    Favorites,
    FavoriteClips,
    Recent,
    LargeFiles,
    Untagged,
}

impl BuiltinCategory {
    pub const ALL: [BuiltinCategory; 11] = [
        BuiltinCategory::All,
        BuiltinCategory::Videos,
        BuiltinCategory::Images,
        BuiltinCategory::Audio,
        BuiltinCategory::Documents,
        BuiltinCategory::Archives,
        BuiltinCategory::Favorites,
        BuiltinCategory::FavoriteClips,
        BuiltinCategory::Recent,
        BuiltinCategory::LargeFiles,
        BuiltinCategory::Untagged,
    ];

    pub fn id(self) -> &'static str {
        match self {
            BuiltinCategory::All => "all",
            BuiltinCategory::Videos => "videos",
            BuiltinCategory::Images => "images",
            BuiltinCategory::Audio => "audio",
            BuiltinCategory::Documents => "documents",
            BuiltinCategory::Archives => "archives",
            BuiltinCategory::Favorites => "favorites",
            BuiltinCategory::FavoriteClips => "favorite-clips",
            BuiltinCategory::Recent => "recent",
            BuiltinCategory::LargeFiles => "large-files",
            BuiltinCategory::Untagged => "untagged",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        // `fav-parts` is the id older sidebars used for the clips view.
        if id == "fav-parts" {
            return Some(BuiltinCategory::FavoriteClips);
        }
        BuiltinCategory::ALL.into_iter().find(|c| c.id() == id)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Date,
    Size,
    #[serde(rename = "type")]
    Kind,
}

impl FromStr for SortKey {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "date" => Ok(SortKey::Date),
            "size" => Ok(SortKey::Size),
            "type" | "kind" => Ok(SortKey::Kind),
            _ => Err(QueryError::UnknownSortKey(s.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Name => "name",
            SortKey::Date => "date",
            SortKey::Size => "size",
            SortKey::Kind => "type",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

/// Inputs of the file view: which category, what text, which filters and
/// how to order the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewQuery {
    pub category_id: String,
    pub search_query: String,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
    pub filters: Vec<deckcore_model::SearchFilter>,
}

impl Default for ViewQuery {
    fn default() -> Self {
        Self {
            category_id: BuiltinCategory::All.id().to_string(),
            search_query: String::new(),
            sort_by: SortKey::Name,
            sort_order: SortOrder::Asc,
            filters: Vec::new(),
        }
    }
}

impl ViewQuery {
    pub fn category(id: impl Into<String>) -> Self {
        Self {
            category_id: id.into(),
            ..Self::default()
        }
    }

    /// True when the result depends on the current time, i.e. the recent
    /// category is selected directly or through a category filter.
    pub fn reads_clock(&self) -> bool {
        let is_recent = |id: &str| BuiltinCategory::from_id(id) == Some(BuiltinCategory::Recent);
        is_recent(&self.category_id)
            || self.filters.iter().any(|filter| {
                filter.kind == FilterKind::Category
                    && matches!(&filter.value, FilterValue::Text(id) if is_recent(id))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_ids_round_trip() {
        for category in BuiltinCategory::ALL {
            assert_eq!(BuiltinCategory::from_id(category.id()), Some(category));
        }
        assert_eq!(
            BuiltinCategory::from_id("fav-parts"),
            Some(BuiltinCategory::FavoriteClips)
        );
        assert_eq!(BuiltinCategory::from_id("1718000000000"), None);
    }

    #[test]
    fn sort_key_parses_type_alias() {
        assert_eq!("type".parse::<SortKey>().unwrap(), SortKey::Kind);
        assert_eq!("Size".parse::<SortKey>().unwrap(), SortKey::Size);
        assert!("rating".parse::<SortKey>().is_err());
    }

    #[test]
    fn only_recent_views_read_the_clock() {
        assert!(!ViewQuery::default().reads_clock());
        assert!(ViewQuery::category("recent").reads_clock());

        let mut query = ViewQuery::category("videos");
        query.filters.push(deckcore_model::SearchFilter::new(
            FilterKind::Category,
            "",
            FilterOperator::Equals,
            FilterValue::Text("recent".into()),
        ));
        assert!(query.reads_clock());
    }

    #[test]
    fn default_query_shows_everything_by_name() {
        let query = ViewQuery::default();
        assert_eq!(query.category_id, "all");
        assert_eq!(query.sort_by, SortKey::Name);
        assert_eq!(query.sort_order, SortOrder::Asc);
    }
}
