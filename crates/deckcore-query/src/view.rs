use std::cmp::Ordering;

use chrono::{DateTime, Duration, Utc};
use deckcore_config::CatalogConfig;
use deckcore_model::{Category, FileEntity, FileKind};
use tracing::trace;

use crate::filters::filter_matches;
use crate::matching::{category_contains, matches_text};
use crate::{BuiltinCategory, SortKey, SortOrder, ViewQuery};

/// The ordered files a view should render.
#[derive(Debug, Clone, PartialEq)]
pub struct FileView<'a> {
    pub files: Vec<&'a FileEntity>,
    /// Set when the selected category is the favorite-clips pseudo
    /// category: the caller should switch to the clips view. `files` is
    /// still populated so nothing behind it renders empty.
    pub show_favorite_clips: bool,
}

impl FileView<'_> {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.id.as_str()).collect()
    }
}

/// Oldest modification time that still counts as recent. None when the
/// window reaches past the representable range, in which case every file
/// is recent.
fn recent_cutoff(now: DateTime<Utc>, window_hours: i64) -> Option<DateTime<Utc>> {
    Duration::try_hours(window_hours).and_then(|window| now.checked_sub_signed(window))
}

pub(crate) fn builtin_matches(
    category: BuiltinCategory,
    file: &FileEntity,
    config: &CatalogConfig,
    now: DateTime<Utc>,
) -> bool {
    match category {
        BuiltinCategory::All | BuiltinCategory::FavoriteClips => true,
        BuiltinCategory::Videos => file.kind == FileKind::Video,
        BuiltinCategory::Images => file.kind == FileKind::Image,
        BuiltinCategory::Audio => file.kind == FileKind::Audio,
        BuiltinCategory::Documents => file.kind == FileKind::Document,
        BuiltinCategory::Archives => file.kind == FileKind::Archive,
        BuiltinCategory::Favorites => file.is_favorite,
        BuiltinCategory::Recent => recent_cutoff(now, config.recent_window_hours)
            .map_or(true, |cutoff| file.modified_at > cutoff),
        BuiltinCategory::LargeFiles => file.size > config.large_file_bytes,
        BuiltinCategory::Untagged => file.tags.is_empty(),
    }
}

pub(crate) fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    for category in categories {
        if category.id == id {
            return Some(category);
        }
        if let Some(found) = find_category(&category.children, id) {
            return Some(found);
        }
    }
    None
}

/// Category step of the view. Unknown ids let every file through.
pub(crate) fn passes_category(
    category_id: &str,
    file: &FileEntity,
    categories: &[Category],
    config: &CatalogConfig,
    now: DateTime<Utc>,
) -> bool {
    match BuiltinCategory::from_id(category_id) {
        Some(builtin) => builtin_matches(builtin, file, config, now),
        None => find_category(categories, category_id)
            .map_or(true, |category| category_contains(category, file)),
    }
}

fn compare(a: &FileEntity, b: &FileEntity, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
        SortKey::Date => a.modified_at.cmp(&b.modified_at),
        SortKey::Size => a.size.cmp(&b.size),
        SortKey::Kind => a.kind.label().cmp(b.kind.label()),
    }
}

/// Stable sort; descending reverses the comparison, not the list, so ties
/// keep their incoming order either way.
pub fn sort_files(files: &mut [&FileEntity], key: SortKey, order: SortOrder) {
    files.sort_by(|a, b| {
        let ordering = compare(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Category filter, then free text, then structured filters, then sort.
pub fn derive_view<'a>(
    files: &'a [FileEntity],
    categories: &[Category],
    query: &ViewQuery,
    config: &CatalogConfig,
    now: DateTime<Utc>,
) -> FileView<'a> {
    let show_favorite_clips =
        BuiltinCategory::from_id(&query.category_id) == Some(BuiltinCategory::FavoriteClips);

    let mut visible: Vec<&FileEntity> = files
        .iter()
        .filter(|file| passes_category(&query.category_id, file, categories, config, now))
        .filter(|file| matches_text(file, &query.search_query))
        .filter(|file| {
            query
                .filters
                .iter()
                .all(|filter| filter_matches(filter, file, categories, config, now))
        })
        .collect();

    sort_files(&mut visible, query.sort_by, query.sort_order);

    trace!(
        category = %query.category_id,
        total = files.len(),
        visible = visible.len(),
        "Derived file view"
    );

    FileView {
        files: visible,
        show_favorite_clips,
    }
}
