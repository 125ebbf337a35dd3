//! Composition root: owns the settings and the store and hands both to
//! whichever front end is driving them.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use deckcore_config::{default_settings_path, ConfigResult, Settings};
use deckcore_model::{FileEntity, FileKind};
use deckcore_store::{Store, Strategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

mod snapshot;

pub use snapshot::{LibrarySnapshot, SnapshotError, SnapshotResult, SNAPSHOT_VERSION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewItem {
    pub file_id: String,
    pub display_name: String,
    pub kind: FileKind,
    pub size: u64,
    pub modified_at: DateTime<Utc>,
    pub is_favorite: bool,
    pub tags: Vec<String>,
}

impl From<&FileEntity> for ViewItem {
    fn from(file: &FileEntity) -> Self {
        Self {
            file_id: file.id.clone(),
            display_name: file.name.clone(),
            kind: file.kind,
            size: file.size,
            modified_at: file.modified_at,
            is_favorite: file.is_favorite,
            tags: file.tags.iter().cloned().collect(),
        }
    }
}

/// A rendered view, detached from the store so it can be cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewChunk {
    pub revision: u64,
    pub category_id: String,
    pub show_favorite_clips: bool,
    pub items: Vec<ViewItem>,
}

/// Store revision, plus the derivation instant when the view reads the
/// clock. Clock-dependent views are only reused for the same instant.
type ViewKey = (u64, Option<DateTime<Utc>>);

pub struct AppService {
    pub settings: Settings,
    settings_path: PathBuf,
    store: Store,
    cached_view: Option<(ViewKey, ViewChunk)>,
}

impl Default for AppService {
    fn default() -> Self {
        Self::with_settings(Settings::default(), default_settings_path())
    }
}

impl AppService {
    pub fn with_settings(settings: Settings, settings_path: PathBuf) -> Self {
        let store = Store::from_settings(&settings);
        Self {
            settings,
            settings_path,
            store,
            cached_view: None,
        }
    }

    pub fn from_settings_path(path: &Path) -> ConfigResult<Self> {
        let settings = Settings::load_from(path)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(Self::with_settings(settings, path.to_path_buf()))
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut Store {
        &mut self.store
    }

    /// Replaces files, categories and clips with the saved library.
    /// Returns how many files were loaded.
    pub fn import_snapshot(&mut self, path: &Path) -> SnapshotResult<usize> {
        let snapshot = LibrarySnapshot::read(path)?;
        let files = snapshot.files.len();
        self.store.set_files(snapshot.files);
        self.store.set_categories(snapshot.categories);
        self.store.set_favorite_clips(snapshot.favorite_clips);
        info!(path = %path.display(), files, "Imported library");
        Ok(files)
    }

    pub fn export_snapshot(&self, path: &Path) -> SnapshotResult<()> {
        let snapshot = LibrarySnapshot {
            version: SNAPSHOT_VERSION,
            files: self.store.files().to_vec(),
            categories: self.store.categories().to_vec(),
            favorite_clips: self.store.favorite_clips().to_vec(),
        };
        snapshot.write(path)
    }

    /// Writes the store's current preferences back to the settings file.
    pub fn persist_settings(&mut self) -> ConfigResult<()> {
        self.settings.preferences = self.store.preferences().clone();
        self.settings.save_to(&self.settings_path)
    }

    fn derive_chunk(&self, now: DateTime<Utc>) -> ViewChunk {
        let view = self.store.visible_files(now);
        ViewChunk {
            revision: self.store.revision(),
            category_id: self.store.view_query().category_id.clone(),
            show_favorite_clips: view.show_favorite_clips,
            items: view.files.iter().map(|f| ViewItem::from(*f)).collect(),
        }
    }

    /// The current view, derived again when the store changed or, for
    /// views that read the clock, when `now` moved.
    pub fn current_view(&mut self, now: DateTime<Utc>) -> &ViewChunk {
        let clock = self.store.view_query().reads_clock().then_some(now);
        let key = (self.store.revision(), clock);
        let chunk = match self.cached_view.take() {
            Some((cached, chunk)) if cached == key => chunk,
            _ => {
                let chunk = self.derive_chunk(now);
                debug!(revision = chunk.revision, items = chunk.items.len(), "Derived view");
                chunk
            }
        };
        &self.cached_view.insert((key, chunk)).1
    }

    /// Runs each heuristic in turn. Returns the number of categories created.
    pub fn auto_categorize(&mut self, strategies: &[Strategy]) -> usize {
        strategies
            .iter()
            .map(|strategy| self.store.auto_categorize(*strategy).len())
            .sum()
    }
}
