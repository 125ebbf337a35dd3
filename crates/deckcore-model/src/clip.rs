use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{ClipId, FileId};

/// A bookmarked in/out range inside a source video.
///
/// `file_id` is a lookup key only; the clip outlives the file it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoClip {
    pub id: ClipId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub file_id: FileId,
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    pub created_at: DateTime<Utc>,
}

impl VideoClip {
    pub fn duration(&self) -> f64 {
        (self.end_time - self.start_time).max(0.0)
    }

    pub fn has_valid_range(&self) -> bool {
        self.start_time >= 0.0 && self.start_time < self.end_time
    }
}

/// Clip fields supplied by the player; id and timestamp come from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewVideoClip {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    pub start_time: f64,
    pub end_time: f64,
    pub file_id: FileId,
    pub file_name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub rating: Option<u8>,
}

impl NewVideoClip {
    pub fn new(
        name: impl Into<String>,
        file_id: impl Into<FileId>,
        file_name: impl Into<String>,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: BTreeSet::new(),
            start_time,
            end_time,
            file_id: file_id.into(),
            file_name: file_name.into(),
            thumbnail: None,
            rating: None,
        }
    }

    pub fn into_clip(self, id: ClipId, created_at: DateTime<Utc>) -> VideoClip {
        VideoClip {
            id,
            name: self.name,
            description: self.description,
            tags: self.tags,
            start_time: self.start_time,
            end_time: self.end_time,
            file_id: self.file_id,
            file_name: self.file_name,
            thumbnail: self.thumbnail,
            rating: self.rating,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub start_time: Option<f64>,
    pub end_time: Option<f64>,
    pub thumbnail: Option<String>,
    pub rating: Option<u8>,
}

impl ClipPatch {
    pub fn apply(&self, clip: &mut VideoClip) {
        if let Some(name) = &self.name {
            clip.name = name.clone();
        }
        if let Some(description) = &self.description {
            clip.description = Some(description.clone());
        }
        if let Some(tags) = &self.tags {
            clip.tags = tags.clone();
        }
        if let Some(start_time) = self.start_time {
            clip.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            clip.end_time = end_time;
        }
        if let Some(thumbnail) = &self.thumbnail {
            clip.thumbnail = Some(thumbnail.clone());
        }
        if let Some(rating) = self.rating {
            clip.rating = Some(rating);
        }
    }
}
