use std::collections::HashSet;

use chrono::{DateTime, Utc};
use deckcore_changes::{ChangeKind, ChangeTarget};
use deckcore_model::{ClipId, ClipPatch, FileEntity, NewVideoClip, VideoClip};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::Store;

fn warn_if_suspicious(clip: &VideoClip) {
    if !clip.has_valid_range() {
        warn!(
            clip_id = %clip.id,
            start = clip.start_time,
            end = clip.end_time,
            "Clip range is empty or inverted"
        );
    }
    if let Some(rating) = clip.rating.filter(|r| !(1..=5).contains(r)) {
        warn!(clip_id = %clip.id, rating, "Clip rating outside 1-5");
    }
}

impl Store {
    /// Assigns an id and creation time and appends the clip.
    pub fn add_favorite_clip(&mut self, clip: NewVideoClip) -> ClipId {
        self.add_favorite_clip_at(clip, Utc::now())
    }

    pub fn add_favorite_clip_at(&mut self, clip: NewVideoClip, created_at: DateTime<Utc>) -> ClipId {
        let id = Uuid::now_v7().to_string();
        let clip = clip.into_clip(id.clone(), created_at);
        warn_if_suspicious(&clip);
        debug!(clip_id = %id, file_id = %clip.file_id, "Added favorite clip");
        self.favorite_clips.push(clip);
        self.record(ChangeKind::Created, ChangeTarget::Clips, [id.as_str()]);
        id
    }

    pub fn update_favorite_clip(&mut self, id: &str, patch: &ClipPatch) -> bool {
        let Some(clip) = self.favorite_clips.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        let before = clip.clone();
        patch.apply(clip);
        if *clip == before {
            return true;
        }
        warn_if_suspicious(clip);
        debug!(clip_id = %id, "Updated favorite clip");
        self.record(ChangeKind::Updated, ChangeTarget::Clips, [id]);
        true
    }

    pub fn delete_favorite_clip(&mut self, id: &str) -> bool {
        let before = self.favorite_clips.len();
        self.favorite_clips.retain(|c| c.id != id);
        if self.favorite_clips.len() == before {
            return false;
        }
        debug!(clip_id = %id, "Deleted favorite clip");
        self.record(ChangeKind::Deleted, ChangeTarget::Clips, [id]);
        true
    }

    /// Replaces every clip, e.g. when restoring a saved library.
    pub fn set_favorite_clips(&mut self, clips: Vec<VideoClip>) {
        let mut seen = HashSet::new();
        for clip in &clips {
            if !seen.insert(clip.id.as_str()) {
                warn!(clip_id = %clip.id, "Duplicate clip id accepted");
            }
        }
        self.favorite_clips = clips;
        self.record(ChangeKind::Updated, ChangeTarget::Clips, Vec::<String>::new());
    }

    pub fn clip(&self, id: &str) -> Option<&VideoClip> {
        self.favorite_clips.iter().find(|c| c.id == id)
    }

    /// The file a clip was cut from, if it still exists.
    pub fn clip_source(&self, clip: &VideoClip) -> Option<&FileEntity> {
        self.file(&clip.file_id)
    }

    pub fn clips_for_file(&self, file_id: &str) -> Vec<&VideoClip> {
        self.favorite_clips
            .iter()
            .filter(|c| c.file_id == file_id)
            .collect()
    }

    /// Clips whose source file has been deleted.
    pub fn orphaned_clips(&self) -> Vec<&VideoClip> {
        let present: HashSet<&str> = self.files.iter().map(|f| f.id.as_str()).collect();
        self.favorite_clips
            .iter()
            .filter(|c| !present.contains(c.file_id.as_str()))
            .collect()
    }
}
