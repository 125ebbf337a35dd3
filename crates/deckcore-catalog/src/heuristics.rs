use std::collections::BTreeMap;

use chrono::Datelike;
use deckcore_config::CatalogConfig;
use deckcore_model::{Category, CategoryCriteria, FileEntity, FileKind, NewCategory};
use deckcore_query::{matches_rules, matches_term};
use tracing::debug;

/// "arijit singh" -> "Arijit Singh". Only the first letter of each word is
/// touched.
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn count_term(files: &[FileEntity], term_lower: &str) -> usize {
    files.iter().filter(|f| matches_term(f, term_lower)).count()
}

/// One category per configured artist with at least one file whose name
/// or tags mention it.
pub fn by_artist(files: &[FileEntity], config: &CatalogConfig) -> Vec<NewCategory> {
    config
        .artists
        .iter()
        .filter_map(|artist| {
            let term = artist.trim().to_lowercase();
            if term.is_empty() {
                return None;
            }
            let count = count_term(files, &term);
            if count == 0 {
                return None;
            }
            let name = title_case(&term);
            debug!(artist = %name, count, "Artist matched");
            Some(NewCategory {
                description: Some(format!("Songs by {name}")),
                ..NewCategory::new(name, config.artist_icon.clone())
                    .with_rules([term])
                    .with_count(count)
                    .with_color(config.artist_color.clone())
            })
        })
        .collect()
}

/// Same matching as [`by_artist`] over the configured genre keywords.
pub fn by_genre(files: &[FileEntity], config: &CatalogConfig) -> Vec<NewCategory> {
    config
        .genres
        .iter()
        .filter_map(|genre| {
            let term = genre.trim().to_lowercase();
            if term.is_empty() {
                return None;
            }
            let count = count_term(files, &term);
            if count == 0 {
                return None;
            }
            Some(NewCategory {
                description: Some(format!("{} music collection", genre.trim())),
                ..NewCategory::new(genre.trim(), config.genre_icon.clone())
                    .with_rules([term])
                    .with_count(count)
                    .with_color(config.genre_color.clone())
            })
        })
        .collect()
}

/// One category per file kind present, in [`FileKind::ALL`] order.
pub fn by_kind(files: &[FileEntity], config: &CatalogConfig) -> Vec<NewCategory> {
    FileKind::ALL
        .into_iter()
        .filter_map(|kind| {
            let count = files.iter().filter(|f| f.kind == kind).count();
            if count == 0 {
                return None;
            }
            let style = config.kind_style(kind);
            let name = kind.plural_label();
            Some(NewCategory {
                description: Some(format!("All {} in your collection", name.to_lowercase())),
                criteria: Some(CategoryCriteria::Kind(kind)),
                ..NewCategory::new(name, style.icon)
                    .with_rules([kind.label()])
                    .with_count(count)
                    .with_color(style.color)
            })
        })
        .collect()
}

/// One category per creation year present, oldest first.
pub fn by_year(files: &[FileEntity], config: &CatalogConfig) -> Vec<NewCategory> {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for file in files {
        *years.entry(file.created_at.year()).or_default() += 1;
    }

    years
        .into_iter()
        .map(|(year, count)| NewCategory {
            description: Some(format!("Files from {year}")),
            criteria: Some(CategoryCriteria::Year(year)),
            ..NewCategory::new(format!("Year {year}"), config.year_icon.clone())
                .with_rules([year.to_string()])
                .with_count(count)
                .with_color(config.year_color.clone())
        })
        .collect()
}

/// A manual smart category. Blank terms are dropped; the count is taken
/// against `files` now and not refreshed later.
pub fn rule_category<I, S>(
    name: &str,
    icon: &str,
    color: Option<&str>,
    terms: I,
    files: &[FileEntity],
) -> NewCategory
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rules: Vec<String> = terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    let count = files.iter().filter(|f| matches_rules(f, &rules)).count();

    NewCategory {
        color: color.map(str::to_string),
        description: Some(format!("Category with {count} matching files")),
        rules: Some(rules),
        ..NewCategory::new(name.trim(), icon).with_count(count)
    }
}

/// A draft duplicates an existing category when both select files the same
/// way: same criteria and same rule terms (case-insensitive).
pub fn is_duplicate(existing: &[Category], draft: &NewCategory) -> bool {
    let normalize = |rules: &Option<Vec<String>>| {
        rules.as_ref().map(|r| {
            let mut terms: Vec<String> = r.iter().map(|t| t.to_lowercase()).collect();
            terms.sort();
            terms
        })
    };
    let draft_rules = normalize(&draft.rules);
    existing
        .iter()
        .any(|c| c.criteria == draft.criteria && normalize(&c.rules) == draft_rules)
}
