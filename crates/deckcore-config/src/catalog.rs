use std::collections::BTreeMap;

use deckcore_model::FileKind;
use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStyle {
    pub icon: String,
    pub color: String,
}

impl KindStyle {
    fn new(icon: &str, color: &str) -> Self {
        Self {
            icon: icon.to_string(),
            color: color.to_string(),
        }
    }
}

/// Reference data and thresholds used by categorization and view filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Display names; matching is case-insensitive.
    pub artists: Vec<String>,
    pub genres: Vec<String>,
    pub kind_styles: BTreeMap<FileKind, KindStyle>,
    pub artist_icon: String,
    pub artist_color: String,
    pub genre_icon: String,
    pub genre_color: String,
    pub year_icon: String,
    pub year_color: String,
    /// Files modified within this many hours count as recent.
    pub recent_window_hours: i64,
    /// Files strictly larger than this many bytes count as large.
    pub large_file_bytes: u64,
    pub search_history_limit: usize,
    pub most_used_tags_limit: usize,
    /// Skip auto-generated categories whose rules already exist.
    pub dedupe_auto_categories: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        let artists = [
            "Arijit Singh",
            "Shreya Ghoshal",
            "Rahat Fateh Ali Khan",
            "Atif Aslam",
            "Kishore Kumar",
            "Lata Mangeshkar",
            "Mohammed Rafi",
            "Mohd Rafi",
            "Sonu Nigam",
            "Armaan Malik",
            "Neha Kakkar",
            "Honey Singh",
            "Badshah",
            "Guru Randhawa",
            "Diljit Dosanjh",
            "Hardy Sandhu",
            "B Praak",
        ];
        let genres = [
            "Bollywood",
            "Punjabi",
            "Classical",
            "Rock",
            "Pop",
            "Jazz",
            "Hip Hop",
            "Electronic",
            "Folk",
            "Devotional",
            "Ghazal",
            "Qawwali",
            "Sufi",
            "Romantic",
            "Sad",
            "Party",
            "Dance",
        ];

        let kind_styles = BTreeMap::from([
            (FileKind::Video, KindStyle::new("video", "#ef4444")),
            (FileKind::Image, KindStyle::new("image", "#10b981")),
            (FileKind::Audio, KindStyle::new("music", "#f59e0b")),
            (FileKind::Document, KindStyle::new("document", "#6366f1")),
            (FileKind::Archive, KindStyle::new("archive", "#8b5cf6")),
        ]);

        Self {
            artists: artists.iter().map(|s| s.to_string()).collect(),
            genres: genres.iter().map(|s| s.to_string()).collect(),
            kind_styles,
            artist_icon: "music".to_string(),
            artist_color: "#3b82f6".to_string(),
            genre_icon: "music".to_string(),
            genre_color: "#10b981".to_string(),
            year_icon: "calendar".to_string(),
            year_color: "#06b6d4".to_string(),
            recent_window_hours: 24,
            large_file_bytes: 100 * MIB,
            search_history_limit: 10,
            most_used_tags_limit: 10,
            dedupe_auto_categories: true,
        }
    }
}

impl CatalogConfig {
    pub fn kind_style(&self, kind: FileKind) -> KindStyle {
        self.kind_styles
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| KindStyle::new(kind.label(), "#6366f1"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_every_kind() {
        let config = CatalogConfig::default();
        for kind in FileKind::ALL {
            assert!(config.kind_styles.contains_key(&kind));
        }
        assert_eq!(config.kind_style(FileKind::Video).color, "#ef4444");
        assert_eq!(config.artists.len(), 17);
    }

    #[test]
    fn missing_style_falls_back() {
        let mut config = CatalogConfig::default();
        config.kind_styles.clear();
        let style = config.kind_style(FileKind::Archive);
        assert_eq!(style.icon, "archive");
    }

    #[test]
    fn kind_styles_round_trip_as_string_keys() {
        let config = CatalogConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["kind_styles"]["video"]["icon"], "video");
    }
}
