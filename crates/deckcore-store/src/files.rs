use std::collections::{BTreeMap, BTreeSet, HashSet};

use deckcore_catalog::{group_by_artist, suggest_tags};
use deckcore_changes::{ChangeKind, ChangeTarget};
use deckcore_model::{FileEntity, FileId, FilePatch};
use tracing::{debug, warn};

use crate::analytics::Analytics;
use crate::Store;

impl Store {
    fn refresh_analytics(&mut self) {
        self.analytics = Analytics::compute(&self.files, self.catalog.most_used_tags_limit);
    }

    fn learn_tags<'a>(&mut self, tags: impl IntoIterator<Item = &'a String>) {
        self.tags.extend(tags.into_iter().cloned());
    }

    fn warn_duplicate_ids(&self, incoming: &[FileEntity], existing: &[FileEntity]) {
        let mut seen: HashSet<&str> = existing.iter().map(|f| f.id.as_str()).collect();
        for file in incoming {
            if !seen.insert(file.id.as_str()) {
                warn!(file_id = %file.id, "Duplicate file id accepted; lookups by this id are ambiguous");
            }
        }
    }

    /// Replaces the whole collection.
    pub fn set_files(&mut self, files: Vec<FileEntity>) {
        self.warn_duplicate_ids(&files, &[]);
        self.files = files;
        let tags: Vec<String> = self.files.iter().flat_map(|f| f.tags.iter().cloned()).collect();
        self.learn_tags(&tags);
        self.refresh_analytics();
        debug!(files = self.files.len(), "Replaced file collection");
        self.record(ChangeKind::Updated, ChangeTarget::Files, Vec::<String>::new());
    }

    /// Appends files and returns how many were added. Ids are expected to be
    /// unique; collisions are logged and kept.
    pub fn add_files(&mut self, files: Vec<FileEntity>) -> usize {
        if files.is_empty() {
            return 0;
        }
        self.warn_duplicate_ids(&files, &self.files);
        let ids: Vec<FileId> = files.iter().map(|f| f.id.clone()).collect();
        let tags: Vec<String> = files.iter().flat_map(|f| f.tags.iter().cloned()).collect();
        self.files.extend(files);
        self.learn_tags(&tags);
        self.refresh_analytics();
        let added = ids.len();
        debug!(added, total = self.files.len(), "Added files");
        self.record(ChangeKind::Created, ChangeTarget::Files, ids);
        added
    }

    fn patch_files(&mut self, ids: &HashSet<&str>, patch: &FilePatch) -> (usize, Vec<FileId>) {
        let mut found = 0;
        let mut changed = Vec::new();
        for file in self.files.iter_mut().filter(|f| ids.contains(f.id.as_str())) {
            found += 1;
            let before = file.clone();
            patch.apply(file);
            if *file != before {
                changed.push(file.id.clone());
            }
        }
        if !changed.is_empty() {
            if let Some(tags) = &patch.tags {
                self.learn_tags(tags);
            }
            self.refresh_analytics();
        }
        (found, changed)
    }

    /// Merges `patch` into the file. Returns false when no file has `id`.
    pub fn update_file(&mut self, id: &str, patch: &FilePatch) -> bool {
        let (found, changed) = self.patch_files(&HashSet::from([id]), patch);
        if !changed.is_empty() {
            debug!(file_id = %id, "Updated file");
            self.record(ChangeKind::Updated, ChangeTarget::Files, changed);
        }
        found > 0
    }

    /// Applies one patch to every listed file. Returns how many were found.
    pub fn batch_update_files(&mut self, ids: &[FileId], patch: &FilePatch) -> usize {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let (found, changed) = self.patch_files(&wanted, patch);
        if !changed.is_empty() {
            debug!(requested = ids.len(), changed = changed.len(), "Batch updated files");
            self.record(ChangeKind::Updated, ChangeTarget::Files, changed);
        }
        found
    }

    /// Removes the listed files and drops them from the selection. Clips and
    /// categories pointing at them are left alone.
    pub fn delete_files(&mut self, ids: &[FileId]) -> usize {
        let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let before = self.files.len();
        let mut removed = Vec::new();
        self.files.retain(|f| {
            let keep = !doomed.contains(f.id.as_str());
            if !keep {
                removed.push(f.id.clone());
            }
            keep
        });
        let pruned = {
            let selected_before = self.selected.len();
            self.selected.retain(|id| !doomed.contains(id.as_str()));
            selected_before != self.selected.len()
        };

        if removed.is_empty() {
            if pruned {
                self.record(ChangeKind::Updated, ChangeTarget::Selection, Vec::<String>::new());
            }
            return 0;
        }
        self.refresh_analytics();
        debug!(removed = before - self.files.len(), "Deleted files");
        self.record(ChangeKind::Deleted, ChangeTarget::Files, removed);
        before - self.files.len()
    }

    pub fn batch_delete_files(&mut self, ids: &[FileId]) -> usize {
        self.delete_files(ids)
    }

    /// Flips the favorite flag. Returns the new value, or None when no file
    /// has `id`.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let file = self.files.iter_mut().find(|f| f.id == id)?;
        file.is_favorite = !file.is_favorite;
        let now_favorite = file.is_favorite;
        debug!(file_id = %id, favorite = now_favorite, "Toggled favorite");
        self.record(ChangeKind::Updated, ChangeTarget::Files, [id]);
        Some(now_favorite)
    }

    /// Adds the id to the selection if absent, removes it if present.
    /// Returns whether it is selected afterwards.
    pub fn toggle_file_selection(&mut self, id: &str) -> bool {
        let selected = if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        };
        self.record(ChangeKind::Updated, ChangeTarget::Selection, [id]);
        selected
    }

    pub fn select_all_files(&mut self) {
        let all: BTreeSet<FileId> = self.files.iter().map(|f| f.id.clone()).collect();
        if all == self.selected {
            return;
        }
        self.selected = all;
        self.record(ChangeKind::Updated, ChangeTarget::Selection, Vec::<String>::new());
    }

    pub fn clear_selection(&mut self) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.record(ChangeKind::Updated, ChangeTarget::Selection, Vec::<String>::new());
    }

    /// Unions `tags` into every listed file and into the library tag list.
    /// Returns how many files gained at least one tag.
    pub fn batch_add_tags(&mut self, ids: &[FileId], tags: &[String]) -> usize {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut changed = Vec::new();
        for file in self.files.iter_mut().filter(|f| wanted.contains(f.id.as_str())) {
            let before = file.tags.len();
            file.tags.extend(tags.iter().cloned());
            if file.tags.len() != before {
                changed.push(file.id.clone());
            }
        }
        let known_before = self.tags.len();
        self.learn_tags(tags);

        if changed.is_empty() && known_before == self.tags.len() {
            return 0;
        }
        self.refresh_analytics();
        debug!(files = changed.len(), tags = tags.len(), "Added tags");
        let target = if changed.is_empty() { ChangeTarget::Tags } else { ChangeTarget::Files };
        self.record(ChangeKind::Updated, target, changed.iter().cloned());
        changed.len()
    }

    /// Removes `tags` from every listed file. The library tag list keeps
    /// them. Returns how many files lost at least one tag.
    pub fn batch_remove_tags(&mut self, ids: &[FileId], tags: &[String]) -> usize {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut changed = Vec::new();
        for file in self.files.iter_mut().filter(|f| wanted.contains(f.id.as_str())) {
            let before = file.tags.len();
            for tag in tags {
                file.tags.remove(tag);
            }
            if file.tags.len() != before {
                changed.push(file.id.clone());
            }
        }
        if changed.is_empty() {
            return 0;
        }
        self.refresh_analytics();
        debug!(files = changed.len(), tags = tags.len(), "Removed tags");
        self.record(ChangeKind::Updated, ChangeTarget::Files, changed.iter().cloned());
        changed.len()
    }

    /// Tag suggestions derived from the file name, minus tags it already has.
    pub fn suggested_tags(&self, id: &str) -> Vec<String> {
        let Some(file) = self.file(id) else {
            return Vec::new();
        };
        suggest_tags(&file.name)
            .into_iter()
            .filter(|tag| !file.tags.contains(tag))
            .collect()
    }

    pub fn artist_groups(&self) -> BTreeMap<String, Vec<FileId>> {
        group_by_artist(&self.files, &self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use deckcore_changes::{ChangeKind, ChangeTarget};
    use deckcore_model::{FileEntity, FileKind, FilePatch};

    use crate::Store;

    fn file(id: &str, name: &str, size: u64) -> FileEntity {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        FileEntity::new(id, name, FileKind::Image, size, at)
    }

    fn store() -> Store {
        let mut store = Store::default();
        store.set_files(vec![
            file("a", "Goa_Beach.jpg", 10).with_tags(["trip"]),
            file("b", "Alps.jpg", 20),
            file("c", "Atif Aslam - Live.jpg", 30),
        ]);
        store.drain_changes();
        store
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn set_and_add_recompute_analytics() {
        let mut store = store();
        assert_eq!(store.total_files(), 3);
        assert_eq!(store.total_size(), 60);
        assert!(store.tags().contains("trip"));

        store.add_files(vec![file("d", "New.jpg", 40).with_tags(["fresh"])]);
        assert_eq!(store.total_files(), 4);
        assert_eq!(store.total_size(), 100);
        assert!(store.tags().contains("fresh"));
    }

    #[test]
    fn duplicate_ids_are_kept() {
        let mut store = store();
        store.add_files(vec![file("a", "Again.jpg", 1)]);
        assert_eq!(store.files().len(), 4);
        assert_eq!(store.file("a").map(|f| f.name.as_str()), Some("Goa_Beach.jpg"));
    }

    #[test]
    fn update_reports_found() {
        let mut store = store();
        assert!(store.update_file("b", &FilePatch::name("Alps 2024.jpg")));
        assert_eq!(store.file("b").map(|f| f.name.as_str()), Some("Alps 2024.jpg"));
        assert!(!store.update_file("zzz", &FilePatch::name("x")));
        assert_eq!(store.drain_changes().len(), 1);
    }

    #[test]
    fn unchanged_update_records_nothing() {
        let mut store = store();
        let revision = store.revision();
        assert!(store.update_file("b", &FilePatch::name("Alps.jpg")));
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn delete_prunes_selection() {
        let mut store = store();
        store.toggle_file_selection("a");
        store.toggle_file_selection("b");
        assert_eq!(store.delete_files(&ids(&["a", "zzz"])), 1);
        assert!(!store.is_selected("a"));
        assert!(store.is_selected("b"));
        assert_eq!(store.total_size(), 50);
    }

    #[test]
    fn deleting_only_stale_selection_is_a_selection_change() {
        let mut store = store();
        store.toggle_file_selection("ghost");
        store.drain_changes();

        assert_eq!(store.delete_files(&ids(&["ghost"])), 0);
        assert!(!store.is_selected("ghost"));
        let changes = store.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Updated);
        assert_eq!(changes[0].target, ChangeTarget::Selection);

        assert_eq!(store.delete_files(&ids(&["ghost"])), 0);
        assert!(store.drain_changes().is_empty());
    }

    #[test]
    fn batch_delete_recomputes_analytics() {
        let mut store = store();
        assert_eq!(store.batch_delete_files(&ids(&["a", "b"])), 2);
        assert_eq!(store.total_files(), 1);
        assert_eq!(store.total_size(), 30);
    }

    #[test]
    fn toggle_favorite_missing_is_none() {
        let mut store = store();
        let revision = store.revision();
        assert_eq!(store.toggle_favorite("a"), Some(true));
        assert_eq!(store.toggle_favorite("a"), Some(false));
        assert_eq!(store.toggle_favorite("nope"), None);
        assert_eq!(store.revision(), revision + 2);
    }

    #[test]
    fn select_all_then_clear() {
        let mut store = store();
        store.select_all_files();
        assert_eq!(store.selected_files().len(), 3);
        let revision = store.revision();
        store.select_all_files();
        assert_eq!(store.revision(), revision);
        store.clear_selection();
        assert!(store.selected_ids().is_empty());
    }

    #[test]
    fn batch_tags_update_library_list() {
        let mut store = store();
        assert_eq!(store.batch_add_tags(&ids(&["a", "b"]), &ids(&["trip", "2024"])), 2);
        assert!(store.tags().contains("2024"));
        assert_eq!(store.most_used_tags()[0], ("2024".to_string(), 2));

        assert_eq!(store.batch_remove_tags(&ids(&["a", "b"]), &ids(&["2024"])), 2);
        assert!(store.tags().contains("2024"));
        assert_eq!(store.batch_remove_tags(&ids(&["c"]), &ids(&["2024"])), 0);
    }

    #[test]
    fn batch_update_counts_found_files() {
        let mut store = store();
        let found = store.batch_update_files(&ids(&["a", "c", "x"]), &FilePatch::favorite(true));
        assert_eq!(found, 2);
        let changes = store.drain_changes();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Updated);
        assert_eq!(changes[0].target, ChangeTarget::Files);
        assert_eq!(changes[0].ids, ids(&["a", "c"]));
    }

    #[test]
    fn suggestions_skip_existing_tags() {
        let mut store = store();
        store.batch_add_tags(&ids(&["a"]), &ids(&["goa"]));
        assert_eq!(store.suggested_tags("a"), vec!["beach".to_string(), "jpg".to_string()]);
        assert!(store.suggested_tags("missing").is_empty());
    }

    #[test]
    fn groups_by_artist() {
        let store = store();
        let groups = store.artist_groups();
        assert_eq!(groups.get("Atif Aslam"), Some(&ids(&["c"])));
    }
}
