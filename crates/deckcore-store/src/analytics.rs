use std::collections::BTreeMap;

use deckcore_model::FileEntity;
use serde::Serialize;

/// Aggregates over the file collection, rebuilt by a full pass whenever the
/// files change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analytics {
    pub total_files: usize,
    pub total_size: u64,
    /// Most frequent tags first; equal counts in alphabetical order.
    pub most_used_tags: Vec<(String, usize)>,
}

impl Analytics {
    pub(crate) fn compute(files: &[FileEntity], tag_limit: usize) -> Self {
        let mut frequency: BTreeMap<&str, usize> = BTreeMap::new();
        for tag in files.iter().flat_map(|f| f.tags.iter()) {
            *frequency.entry(tag.as_str()).or_default() += 1;
        }
        let mut most_used_tags: Vec<(String, usize)> = frequency
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        // BTreeMap order is alphabetical and the sort is stable.
        most_used_tags.sort_by(|a, b| b.1.cmp(&a.1));
        most_used_tags.truncate(tag_limit);

        Self {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            most_used_tags,
        }
    }
}
