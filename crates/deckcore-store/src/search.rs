use deckcore_changes::{ChangeKind, ChangeTarget};
use deckcore_config::{PreferencesPatch, UserPreferences};
use deckcore_model::SearchFilter;
use deckcore_query::{validate_filter, QueryResult, SortKey, SortOrder, ViewMode};
use tracing::debug;

use crate::Store;

impl Store {
    fn touch_search(&mut self) {
        self.record(ChangeKind::Updated, ChangeTarget::Search, Vec::<String>::new());
    }

    /// Sets the free-text query. A non-blank query also moves to the front
    /// of the search history.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        let history_before = self.search_history.clone();

        let trimmed = query.trim();
        if !trimmed.is_empty() {
            self.search_history.retain(|q| q != trimmed);
            self.search_history.insert(0, trimmed.to_string());
            self.search_history.truncate(self.catalog.search_history_limit);
        }

        if query == self.view.search_query && history_before == self.search_history {
            return;
        }
        self.view.search_query = query;
        self.touch_search();
    }

    /// Most recent first, no repeats.
    pub fn search_history(&self) -> &[String] {
        &self.search_history
    }

    pub fn clear_search_history(&mut self) {
        if self.search_history.is_empty() {
            return;
        }
        self.search_history.clear();
        self.touch_search();
    }

    /// Appends a structured filter after checking it can be evaluated.
    pub fn add_search_filter(&mut self, filter: SearchFilter) -> QueryResult<()> {
        validate_filter(&filter)?;
        debug!(kind = ?filter.kind, operator = ?filter.operator, "Added search filter");
        self.view.filters.push(filter);
        self.touch_search();
        Ok(())
    }

    pub fn remove_search_filter(&mut self, index: usize) -> Option<SearchFilter> {
        if index >= self.view.filters.len() {
            return None;
        }
        let removed = self.view.filters.remove(index);
        self.touch_search();
        Some(removed)
    }

    pub fn clear_search_filters(&mut self) -> usize {
        let cleared = self.view.filters.len();
        if cleared > 0 {
            self.view.filters.clear();
            self.touch_search();
        }
        cleared
    }

    pub fn set_selected_category(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id == self.view.category_id {
            return;
        }
        debug!(category = %id, "Selected category");
        self.view.category_id = id;
        self.touch_search();
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        self.view_mode = mode;
        self.touch_search();
    }

    pub fn set_sort_by(&mut self, key: SortKey) {
        if key == self.view.sort_by {
            return;
        }
        self.view.sort_by = key;
        self.touch_search();
    }

    pub fn set_sort_order(&mut self, order: SortOrder) {
        if order == self.view.sort_order {
            return;
        }
        self.view.sort_order = order;
        self.touch_search();
    }

    /// Shallow merge; values are not range checked.
    pub fn update_preferences(&mut self, patch: &PreferencesPatch) {
        if patch.is_empty() {
            return;
        }
        let before = self.preferences.clone();
        self.preferences.apply(patch);
        if self.preferences != before {
            debug!("Updated preferences");
            self.record(ChangeKind::Updated, ChangeTarget::Preferences, Vec::<String>::new());
        }
    }

    pub fn set_preferences(&mut self, preferences: UserPreferences) {
        if preferences == self.preferences {
            return;
        }
        self.preferences = preferences;
        self.record(ChangeKind::Updated, ChangeTarget::Preferences, Vec::<String>::new());
    }
}

#[cfg(test)]
mod tests {
    use deckcore_config::{PreferencesPatch, Theme};
    use deckcore_model::{FilterKind, FilterOperator, FilterValue, SearchFilter};
    use deckcore_query::{SortKey, SortOrder, ViewMode};

    use crate::Store;

    #[test]
    fn history_is_recent_first_and_unique() {
        let mut store = Store::default();
        store.set_search_query("beach");
        store.set_search_query("alps");
        store.set_search_query("beach");
        store.set_search_query("");
        assert_eq!(store.search_history(), ["beach".to_string(), "alps".to_string()]);
        assert_eq!(store.view_query().search_query, "");
    }

    #[test]
    fn history_is_capped() {
        let mut store = Store::default();
        for i in 0..15 {
            store.set_search_query(format!("query {i}"));
        }
        assert_eq!(store.search_history().len(), 10);
        assert_eq!(store.search_history()[0], "query 14");
    }

    #[test]
    fn invalid_filter_is_rejected() {
        let mut store = Store::default();
        let bad = SearchFilter::new(
            FilterKind::Size,
            "",
            FilterOperator::Contains,
            FilterValue::Number(1.0),
        );
        assert!(store.add_search_filter(bad).is_err());
        assert!(store.view_query().filters.is_empty());

        let good = SearchFilter::new(
            FilterKind::Size,
            "",
            FilterOperator::Greater,
            FilterValue::Number(1.0),
        );
        store.add_search_filter(good.clone()).unwrap();
        assert_eq!(store.remove_search_filter(3), None);
        assert_eq!(store.remove_search_filter(0), Some(good));
        assert_eq!(store.clear_search_filters(), 0);
    }

    #[test]
    fn view_parameters_only_record_real_changes() {
        let mut store = Store::default();
        let start = store.revision();
        store.set_selected_category("all");
        store.set_sort_by(SortKey::Name);
        store.set_sort_order(SortOrder::Asc);
        store.set_view_mode(ViewMode::Grid);
        assert_eq!(store.revision(), start);

        store.set_selected_category("videos");
        store.set_sort_by(SortKey::Size);
        store.set_sort_order(SortOrder::Desc);
        store.set_view_mode(ViewMode::List);
        assert_eq!(store.revision(), start + 4);
        assert_eq!(store.view_query().category_id, "videos");
        assert_eq!(store.view_mode(), ViewMode::List);
    }

    #[test]
    fn preferences_merge() {
        let mut store = Store::default();
        let patch = PreferencesPatch {
            theme: Some(Theme::Light),
            grid_columns: Some(40),
            ..PreferencesPatch::default()
        };
        store.update_preferences(&patch);
        assert_eq!(store.preferences().theme, Theme::Light);
        assert_eq!(store.preferences().grid_columns, 40);
        assert_eq!(store.preferences().sidebar_width, 280);
    }
}
