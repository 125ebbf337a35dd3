use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use deckcore_model::{FileEntity, FileKind};
use deckcore_store::Store;
use proptest::prelude::*;

fn library(tag_sets: &[BTreeSet<String>]) -> Store {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let files = tag_sets
        .iter()
        .enumerate()
        .map(|(i, tags)| {
            FileEntity::new(format!("f{i}"), format!("file {i}.mp4"), FileKind::Video, 1, at)
                .with_tags(tags.iter().cloned())
        })
        .collect();
    let mut store = Store::default();
    store.set_files(files);
    store
}

fn tag_sets() -> impl Strategy<Value = Vec<BTreeSet<String>>> {
    prop::collection::vec(prop::collection::btree_set("[a-c]{1,2}", 0..4), 1..8)
}

proptest! {
    #[test]
    fn toggling_favorite_twice_restores_it(sets in tag_sets(), pick in any::<prop::sample::Index>()) {
        let mut store = library(&sets);
        let id = store.files()[pick.index(sets.len())].id.clone();
        let original = store.file(&id).map(|f| f.is_favorite);
        store.toggle_favorite(&id);
        store.toggle_favorite(&id);
        prop_assert_eq!(store.file(&id).map(|f| f.is_favorite), original);
    }

    #[test]
    fn toggling_selection_twice_restores_it(
        sets in tag_sets(),
        preselected in prop::collection::vec(any::<bool>(), 8),
        id in "f[0-9]",
    ) {
        let mut store = library(&sets);
        for (i, on) in preselected.iter().enumerate() {
            if *on {
                store.toggle_file_selection(&format!("f{i}"));
            }
        }
        let before = store.selected_ids().clone();
        store.toggle_file_selection(&id);
        store.toggle_file_selection(&id);
        prop_assert_eq!(store.selected_ids(), &before);
    }

    #[test]
    fn deleting_prunes_selection(
        sets in tag_sets(),
        doomed in prop::collection::btree_set("f[0-9]", 0..6),
    ) {
        let mut store = library(&sets);
        store.select_all_files();
        let doomed: Vec<String> = doomed.into_iter().collect();
        store.delete_files(&doomed);
        for id in &doomed {
            prop_assert!(!store.is_selected(id));
            prop_assert!(store.file(id).is_none());
        }
        prop_assert_eq!(store.total_files(), store.files().len());
    }

    #[test]
    fn add_then_remove_new_tag_restores_tags(sets in tag_sets(), pick in any::<prop::sample::Index>()) {
        let mut store = library(&sets);
        let id = store.files()[pick.index(sets.len())].id.clone();
        let original = store.file(&id).map(|f| f.tags.clone());
        // Tag generator only produces a-c, so "x" is always new.
        let tag = vec!["x".to_string()];
        store.batch_add_tags(&[id.clone()], &tag);
        store.batch_remove_tags(&[id.clone()], &tag);
        prop_assert_eq!(store.file(&id).map(|f| f.tags.clone()), original);
    }
}
