//! Entity records tracked by the media library: files, categories,
//! favorite clips and structured search filters.
//!
//! Relationships between entities are plain identifier fields. Nothing in
//! this crate holds a reference into another collection; resolving a
//! `VideoClip::file_id` or a category's members is the store's job.

mod category;
mod clip;
mod file;
mod filter;

pub use category::{Category, CategoryCriteria, CategoryPatch, NewCategory};
pub use clip::{ClipPatch, NewVideoClip, VideoClip};
pub use file::{FileEntity, FileKind, FileMetadata, FilePatch};
pub use filter::{FilterKind, FilterOperator, FilterValue, SearchFilter};

pub type FileId = String;
pub type ClipId = String;
pub type CategoryId = String;

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("unknown file kind: {0}")]
    UnknownFileKind(String),
}
