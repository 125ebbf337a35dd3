use chrono::{DateTime, Utc};
use deckcore_config::CatalogConfig;
use deckcore_model::{Category, FileEntity};

use crate::matching::category_contains;
use crate::view::builtin_matches;
use crate::BuiltinCategory;

/// Per built-in category file counts, in sidebar order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinCounts {
    entries: Vec<(BuiltinCategory, usize)>,
}

impl BuiltinCounts {
    pub fn get(&self, category: BuiltinCategory) -> usize {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuiltinCategory, usize)> + '_ {
        self.entries.iter().copied()
    }
}

/// Counts for every built-in category. The favorite-clips entry counts
/// clips rather than files.
pub fn builtin_counts(
    files: &[FileEntity],
    clip_count: usize,
    config: &CatalogConfig,
    now: DateTime<Utc>,
) -> BuiltinCounts {
    let entries = BuiltinCategory::ALL
        .into_iter()
        .map(|category| {
            let count = match category {
                BuiltinCategory::FavoriteClips => clip_count,
                _ => files
                    .iter()
                    .filter(|f| builtin_matches(category, f, config, now))
                    .count(),
            };
            (category, count)
        })
        .collect();
    BuiltinCounts { entries }
}

/// Membership count of a user category against the current files. A
/// category with no rules or criteria keeps the count it was created with.
pub fn live_count(category: &Category, files: &[FileEntity]) -> usize {
    if !category.is_smart() {
        return category.count;
    }
    files
        .iter()
        .filter(|f| category_contains(category, f))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use deckcore_model::{FileKind, NewCategory};

    fn files() -> Vec<FileEntity> {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut fav = FileEntity::new("2", "b.jpg", FileKind::Image, 10, at).with_tags(["x"]);
        fav.is_favorite = true;
        vec![
            FileEntity::new("1", "a.mp4", FileKind::Video, 200 * 1024 * 1024, at),
            fav,
            FileEntity::new("3", "c.mp4", FileKind::Video, 10, at).with_tags(["x"]),
        ]
    }

    #[test]
    fn counts_each_builtin() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 6, 0, 0).unwrap();
        let counts = builtin_counts(&files(), 7, &CatalogConfig::default(), now);
        assert_eq!(counts.get(BuiltinCategory::All), 3);
        assert_eq!(counts.get(BuiltinCategory::Videos), 2);
        assert_eq!(counts.get(BuiltinCategory::Favorites), 1);
        assert_eq!(counts.get(BuiltinCategory::FavoriteClips), 7);
        assert_eq!(counts.get(BuiltinCategory::Recent), 3);
        assert_eq!(counts.get(BuiltinCategory::LargeFiles), 1);
        assert_eq!(counts.get(BuiltinCategory::Untagged), 1);
        assert_eq!(counts.iter().count(), BuiltinCategory::ALL.len());
    }

    #[test]
    fn live_count_tracks_current_files() {
        let category = NewCategory::new("X", "tag")
            .with_rules(["x"])
            .with_count(99)
            .into_category("c".into());
        assert_eq!(live_count(&category, &files()), 2);

        let manual = NewCategory::new("Manual", "folder")
            .with_count(4)
            .into_category("m".into());
        assert_eq!(live_count(&manual, &files()), 4);
    }
}
