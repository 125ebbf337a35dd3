use std::cmp::Ordering;

use deckcore_model::VideoClip;
use serde::{Deserialize, Serialize};

use crate::matching::contains_case_insensitive;
use crate::SortOrder;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipSortKey {
    Name,
    #[default]
    Date,
    Duration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipQuery {
    pub search_query: String,
    /// Exact tag the clip must carry.
    pub tag: Option<String>,
    pub sort_by: ClipSortKey,
    pub sort_order: SortOrder,
}

impl Default for ClipQuery {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            tag: None,
            sort_by: ClipSortKey::Date,
            sort_order: SortOrder::Desc,
        }
    }
}

fn clip_matches_text(clip: &VideoClip, query_lower: &str) -> bool {
    contains_case_insensitive(&clip.name, query_lower)
        || clip
            .description
            .as_deref()
            .is_some_and(|d| contains_case_insensitive(d, query_lower))
        || clip
            .tags
            .iter()
            .any(|tag| contains_case_insensitive(tag, query_lower))
}

fn compare(a: &VideoClip, b: &VideoClip, key: ClipSortKey) -> Ordering {
    match key {
        ClipSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        ClipSortKey::Date => a.created_at.cmp(&b.created_at),
        ClipSortKey::Duration => a.duration().total_cmp(&b.duration()),
    }
}

/// Favorite clips filtered by text and tag, then stably sorted. Newest
/// first by default.
pub fn derive_clip_view<'a>(clips: &'a [VideoClip], query: &ClipQuery) -> Vec<&'a VideoClip> {
    let needle = query.search_query.to_lowercase();
    let mut visible: Vec<&VideoClip> = clips
        .iter()
        .filter(|clip| needle.is_empty() || clip_matches_text(clip, &needle))
        .filter(|clip| query.tag.as_ref().map_or(true, |tag| clip.tags.contains(tag)))
        .collect();

    visible.sort_by(|a, b| {
        let ordering = compare(a, b, query.sort_by);
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    visible
}
