use std::path::{Path, PathBuf};

use deckcore_model::{Category, FileEntity, VideoClip};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read library at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write library at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed library at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode library: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("library format version {found} is newer than supported version {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Everything the library holds that is worth keeping between runs.
/// Selection and view parameters are session state and are not saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibrarySnapshot {
    pub version: u32,
    #[serde(default)]
    pub files: Vec<FileEntity>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub favorite_clips: Vec<VideoClip>,
}

impl Default for LibrarySnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            files: Vec::new(),
            categories: Vec::new(),
            favorite_clips: Vec::new(),
        }
    }
}

impl LibrarySnapshot {
    pub fn read(path: &Path) -> SnapshotResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot: Self = serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion {
                found: snapshot.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        Ok(snapshot)
    }

    pub fn write(&self, path: &Path) -> SnapshotResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| SnapshotError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| SnapshotError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            files = self.files.len(),
            categories = self.categories.len(),
            clips = self.favorite_clips.len(),
            "Saved library"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_version_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{"version": 99}"#).unwrap();
        assert!(matches!(
            LibrarySnapshot::read(&path),
            Err(SnapshotError::UnsupportedVersion { found: 99, .. })
        ));
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, r#"{"version": 1}"#).unwrap();
        let snapshot = LibrarySnapshot::read(&path).unwrap();
        assert_eq!(snapshot, LibrarySnapshot::default());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, "not json").unwrap();
        match LibrarySnapshot::read(&path) {
            Err(SnapshotError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
