//! The application state: files, categories, favorite clips, selection,
//! tags, view parameters and preferences behind one owner.
//!
//! Every mutation runs to completion before returning. Operations that
//! address a missing id change nothing and raise nothing; their return
//! value says whether anything was found. Each mutation that does change
//! state records exactly one entry in the change log.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use deckcore_changes::{ChangeKind, ChangeLog, ChangeTarget, StoreChange};
use deckcore_config::{CatalogConfig, Settings, UserPreferences};
use deckcore_model::{Category, FileEntity, FileId, VideoClip};
use deckcore_query::{
    builtin_counts, derive_clip_view, derive_view, BuiltinCounts, ClipQuery, FileView, ViewMode,
    ViewQuery,
};

mod analytics;
mod categories;
mod clips;
mod files;
mod search;

pub use analytics::Analytics;
pub use deckcore_catalog::Strategy;

pub struct Store {
    files: Vec<FileEntity>,
    categories: Vec<Category>,
    favorite_clips: Vec<VideoClip>,
    selected: BTreeSet<FileId>,
    tags: BTreeSet<String>,
    view: ViewQuery,
    view_mode: ViewMode,
    search_history: Vec<String>,
    preferences: UserPreferences,
    catalog: CatalogConfig,
    analytics: Analytics,
    changes: ChangeLog,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(UserPreferences::default(), CatalogConfig::default())
    }
}

impl Store {
    pub fn new(preferences: UserPreferences, catalog: CatalogConfig) -> Self {
        Self {
            files: Vec::new(),
            categories: Vec::new(),
            favorite_clips: Vec::new(),
            selected: BTreeSet::new(),
            tags: BTreeSet::new(),
            view: ViewQuery::default(),
            view_mode: ViewMode::default(),
            search_history: Vec::new(),
            preferences,
            catalog,
            analytics: Analytics::default(),
            changes: ChangeLog::default(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.preferences.clone(), settings.catalog.clone())
    }

    fn record<I, S>(&mut self, kind: ChangeKind, target: ChangeTarget, ids: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changes.record(kind, target, ids)
    }

    pub fn files(&self) -> &[FileEntity] {
        &self.files
    }

    pub fn file(&self, id: &str) -> Option<&FileEntity> {
        self.files.iter().find(|f| f.id == id)
    }

    pub fn favorite_clips(&self) -> &[VideoClip] {
        &self.favorite_clips
    }

    pub fn selected_ids(&self) -> &BTreeSet<FileId> {
        &self.selected
    }

    /// Selected files in collection order. Ids without a file are skipped.
    pub fn selected_files(&self) -> Vec<&FileEntity> {
        self.files
            .iter()
            .filter(|f| self.selected.contains(&f.id))
            .collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Every tag the library knows about.
    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn view_query(&self) -> &ViewQuery {
        &self.view
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn preferences(&self) -> &UserPreferences {
        &self.preferences
    }

    pub fn analytics(&self) -> &Analytics {
        &self.analytics
    }

    pub fn total_files(&self) -> usize {
        self.analytics.total_files
    }

    pub fn total_size(&self) -> u64 {
        self.analytics.total_size
    }

    pub fn most_used_tags(&self) -> &[(String, usize)] {
        &self.analytics.most_used_tags
    }

    /// The files the main view should render for the current parameters.
    pub fn visible_files(&self, now: DateTime<Utc>) -> FileView<'_> {
        derive_view(&self.files, &self.categories, &self.view, &self.catalog, now)
    }

    pub fn visible_clips(&self, query: &ClipQuery) -> Vec<&VideoClip> {
        derive_clip_view(&self.favorite_clips, query)
    }

    pub fn sidebar_counts(&self, now: DateTime<Utc>) -> BuiltinCounts {
        builtin_counts(&self.files, self.favorite_clips.len(), &self.catalog, now)
    }

    pub fn revision(&self) -> u64 {
        self.changes.revision()
    }

    pub fn drain_changes(&mut self) -> Vec<StoreChange> {
        self.changes.drain()
    }
}
