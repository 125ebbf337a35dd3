use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{FileId, ModelError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Video,
    Image,
    Audio,
    Document,
    Archive,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Video,
        FileKind::Image,
        FileKind::Audio,
        FileKind::Document,
        FileKind::Archive,
    ];

    /// Lowercase label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Video => "video",
            FileKind::Image => "image",
            FileKind::Audio => "audio",
            FileKind::Document => "document",
            FileKind::Archive => "archive",
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            FileKind::Video => "Videos",
            FileKind::Image => "Images",
            FileKind::Audio => "Audio",
            FileKind::Document => "Documents",
            FileKind::Archive => "Archives",
        }
    }

    /// Classifies an uploaded blob by its MIME type. Anything that is not
    /// media and does not look like a document ends up as an archive.
    pub fn from_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            FileKind::Image
        } else if mime.starts_with("video/") {
            FileKind::Video
        } else if mime.starts_with("audio/") {
            FileKind::Audio
        } else if mime.contains("pdf") || mime.contains("document") {
            FileKind::Document
        } else {
            FileKind::Archive
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FileKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        FileKind::ALL
            .into_iter()
            .find(|kind| kind.label() == lower)
            .ok_or_else(|| ModelError::UnknownFileKind(s.to_string()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileEntity {
    pub id: FileId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub size: u64,
    /// Seconds; only meaningful for video and audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<FileMetadata>,
}

impl FileEntity {
    pub fn new(
        id: impl Into<FileId>,
        name: impl Into<String>,
        kind: FileKind,
        size: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            size,
            duration: None,
            thumbnail: None,
            created_at,
            modified_at: created_at,
            is_favorite: false,
            tags: BTreeSet::new(),
            metadata: None,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn with_modified_at(mut self, modified_at: DateTime<Utc>) -> Self {
        self.modified_at = modified_at;
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// File extension without the dot, lower-cased.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }
}

/// Partial update merged into a [`FileEntity`]. `id` is not patchable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePatch {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FileKind>,
    pub size: Option<u64>,
    pub duration: Option<f64>,
    pub thumbnail: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub modified_at: Option<DateTime<Utc>>,
    pub is_favorite: Option<bool>,
    pub tags: Option<BTreeSet<String>>,
    pub metadata: Option<FileMetadata>,
}

impl FilePatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn favorite(is_favorite: bool) -> Self {
        Self {
            is_favorite: Some(is_favorite),
            ..Self::default()
        }
    }

    pub fn apply(&self, file: &mut FileEntity) {
        if let Some(name) = &self.name {
            file.name = name.clone();
        }
        if let Some(kind) = self.kind {
            file.kind = kind;
        }
        if let Some(size) = self.size {
            file.size = size;
        }
        if let Some(duration) = self.duration {
            file.duration = Some(duration);
        }
        if let Some(thumbnail) = &self.thumbnail {
            file.thumbnail = Some(thumbnail.clone());
        }
        if let Some(created_at) = self.created_at {
            file.created_at = created_at;
        }
        if let Some(modified_at) = self.modified_at {
            file.modified_at = modified_at;
        }
        if let Some(is_favorite) = self.is_favorite {
            file.is_favorite = is_favorite;
        }
        if let Some(tags) = &self.tags {
            file.tags = tags.clone();
        }
        if let Some(metadata) = &self.metadata {
            file.metadata = Some(metadata.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> FileEntity {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        FileEntity::new("1", "Arijit Singh - Tum Hi Ho.mp4", FileKind::Video, 45_678_912, at)
            .with_tags(["music", "bollywood"])
    }

    #[test]
    fn kind_from_mime_follows_upload_rules() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("video/mp4"), FileKind::Video);
        assert_eq!(FileKind::from_mime("audio/mpeg"), FileKind::Audio);
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Document);
        assert_eq!(
            FileKind::from_mime("application/vnd.oasis.opendocument.text"),
            FileKind::Document
        );
        assert_eq!(FileKind::from_mime("application/zip"), FileKind::Archive);
    }

    #[test]
    fn kind_parses_case_insensitively() {
        assert_eq!("Video".parse::<FileKind>().unwrap(), FileKind::Video);
        assert!("movie".parse::<FileKind>().is_err());
    }

    #[test]
    fn tags_suppress_duplicates() {
        let file = sample().with_tags(["music", "Music"]);
        assert_eq!(file.tags.len(), 3);
        assert!(file.has_tag("Music"));
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut file = sample();
        let before = file.clone();
        FilePatch::name("Renamed.mp4").apply(&mut file);
        assert_eq!(file.name, "Renamed.mp4");
        assert_eq!(file.size, before.size);
        assert_eq!(file.tags, before.tags);
        assert_eq!(file.id, before.id);
    }

    #[test]
    fn extension_is_lowercased() {
        let mut file = sample();
        assert_eq!(file.extension().as_deref(), Some("mp4"));
        file.name = ".hidden".into();
        assert_eq!(file.extension(), None);
    }

    #[test]
    fn serializes_kind_under_type_key() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "video");
        assert!(json.get("metadata").is_none());
    }
}
