use lazy_static::lazy_static;
use regex::Regex;

const MAX_SUGGESTED_TAGS: usize = 10;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[._\-\s]+").unwrap();
}

/// Tag suggestions from a file name: lowercase words longer than two
/// characters, first occurrence wins, at most ten.
pub fn suggest_tags(file_name: &str) -> Vec<String> {
    let lowered = file_name.to_lowercase();
    let mut tags: Vec<String> = Vec::new();
    for part in SEPARATORS.split(&lowered) {
        if part.chars().count() <= 2 || tags.iter().any(|t| t == part) {
            continue;
        }
        tags.push(part.to_string());
        if tags.len() == MAX_SUGGESTED_TAGS {
            break;
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_separators() {
        assert_eq!(
            suggest_tags("Goa_Trip-2023 beach.day.mp4"),
            vec!["goa", "trip", "2023", "beach", "day", "mp4"]
        );
    }

    #[test]
    fn skips_short_and_repeated_parts() {
        assert_eq!(suggest_tags("a_be_cat_cat.png"), vec!["cat", "png"]);
    }

    #[test]
    fn caps_at_ten() {
        let name = (0..20).map(|i| format!("word{i}")).collect::<Vec<_>>().join("_");
        assert_eq!(suggest_tags(&name).len(), 10);
    }
}
