use chrono::Datelike;
use deckcore_model::{Category, CategoryCriteria, FileEntity};

/// Substring test against an already lower-cased needle. ASCII input takes
/// a byte-wise path; anything else is lower-cased first.
pub fn contains_case_insensitive(haystack: &str, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }

    if haystack.is_ascii() && needle_lower.is_ascii() {
        return contains_ascii(haystack.as_bytes(), needle_lower.as_bytes());
    }

    haystack.to_lowercase().contains(needle_lower)
}

fn contains_ascii(h: &[u8], n: &[u8]) -> bool {
    if n.len() > h.len() {
        return false;
    }

    if n.len() == 1 {
        let b = n[0];
        return h.iter().any(|ch| ch.to_ascii_lowercase() == b);
    }

    let first = n[0];
    for start in 0..=h.len() - n.len() {
        if h[start].to_ascii_lowercase() != first {
            continue;
        }

        if h[start + 1..start + n.len()]
            .iter()
            .zip(&n[1..])
            .all(|(a, b)| a.to_ascii_lowercase() == *b)
        {
            return true;
        }
    }

    false
}

/// True when the file name or any tag contains `term_lower`.
pub fn matches_term(file: &FileEntity, term_lower: &str) -> bool {
    contains_case_insensitive(&file.name, term_lower)
        || file
            .tags
            .iter()
            .any(|tag| contains_case_insensitive(tag, term_lower))
}

/// Free-text search. An empty query matches everything.
pub fn matches_text(file: &FileEntity, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    matches_term(file, &query.to_lowercase())
}

/// Smart category membership: any rule term matching the name or a tag.
pub fn matches_rules(file: &FileEntity, rules: &[String]) -> bool {
    rules
        .iter()
        .any(|rule| matches_term(file, &rule.to_lowercase()))
}

/// Membership in a user category. Structural criteria win over textual
/// rules; a category with neither lets every file through.
pub fn category_contains(category: &Category, file: &FileEntity) -> bool {
    match (&category.criteria, &category.rules) {
        (Some(CategoryCriteria::Kind(kind)), _) => file.kind == *kind,
        (Some(CategoryCriteria::Year(year)), _) => file.created_at.year() == *year,
        (None, Some(rules)) => matches_rules(file, rules),
        (None, None) => true,
    }
}
