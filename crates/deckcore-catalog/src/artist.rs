use std::collections::BTreeMap;

use deckcore_config::CatalogConfig;
use deckcore_model::{FileEntity, FileId};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::heuristics::title_case;

lazy_static! {
    /// "Artist - Title.mp3"
    static ref LEADING_DASH: Regex = Regex::new(r"^([^-]+)\s*-").unwrap();
    /// "Title [Artist].mp3"
    static ref BRACKETED: Regex = Regex::new(r"\[([^\]]+)\]").unwrap();
    /// "Title (Artist).mp3"
    static ref PARENTHESIZED: Regex = Regex::new(r"\(([^)]+)\)").unwrap();
    /// "Title by Artist.mp3"
    static ref BY_CREDIT: Regex = Regex::new(r"(?i)by\s+([^.]+)").unwrap();
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").unwrap();
}

/// Lowercases, drops punctuation and title-cases an artist credit.
pub fn normalize_artist(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    title_case(&collapsed)
}

/// Guesses the artist from a file name. Filename conventions are tried in
/// order before falling back to the known artist list.
pub fn extract_artist(file_name: &str, config: &CatalogConfig) -> Option<String> {
    for pattern in [&*LEADING_DASH, &*BRACKETED, &*PARENTHESIZED, &*BY_CREDIT] {
        let Some(captured) = pattern.captures(file_name).and_then(|c| c.get(1)) else {
            continue;
        };
        let artist = normalize_artist(captured.as_str());
        if !artist.is_empty() {
            return Some(artist);
        }
    }

    let lowered = file_name.to_lowercase();
    config
        .artists
        .iter()
        .find(|artist| lowered.contains(&artist.to_lowercase()))
        .map(|artist| normalize_artist(artist))
}

/// Groups file ids by their guessed artist. Files with no recognizable
/// artist are left out.
pub fn group_by_artist(files: &[FileEntity], config: &CatalogConfig) -> BTreeMap<String, Vec<FileId>> {
    let mut groups: BTreeMap<String, Vec<FileId>> = BTreeMap::new();
    for file in files {
        if let Some(artist) = extract_artist(&file.name, config) {
            groups.entry(artist).or_default().push(file.id.clone());
        }
    }
    info!(files = files.len(), artists = groups.len(), "Grouped files by artist");
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use deckcore_model::FileKind;

    fn config() -> CatalogConfig {
        CatalogConfig::default()
    }

    #[test]
    fn dash_convention() {
        assert_eq!(
            extract_artist("Atif Aslam - Tere Bin.mp3", &config()).as_deref(),
            Some("Atif Aslam")
        );
    }

    #[test]
    fn bracket_and_paren_conventions() {
        assert_eq!(
            extract_artist("Kesariya [arijit singh].mp3", &config()).as_deref(),
            Some("Arijit Singh")
        );
        assert_eq!(
            extract_artist("Lover (Diljit!).mp3", &config()).as_deref(),
            Some("Diljit")
        );
    }

    #[test]
    fn by_credit() {
        assert_eq!(
            extract_artist("Live set by Some Band.mp3", &config()).as_deref(),
            Some("Some Band")
        );
    }

    #[test]
    fn falls_back_to_known_artists() {
        assert_eq!(
            extract_artist("best_of_badshah_2023.mp3", &config()).as_deref(),
            Some("Badshah")
        );
        assert_eq!(extract_artist("holiday.jpg", &config()), None);
    }

    #[test]
    fn normalizes_credits() {
        assert_eq!(normalize_artist("  B.  PRAAK "), "B Praak");
    }

    #[test]
    fn groups_ids() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let files = vec![
            FileEntity::new("1", "Atif Aslam - One.mp3", FileKind::Audio, 1, at),
            FileEntity::new("2", "Atif Aslam - Two.mp3", FileKind::Audio, 1, at),
            FileEntity::new("3", "notes.txt", FileKind::Document, 1, at),
        ];
        let groups = group_by_artist(&files, &config());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["Atif Aslam"], vec!["1".to_string(), "2".to_string()]);
    }
}
