use chrono::{DateTime, Utc};
use deckcore_config::CatalogConfig;
use deckcore_model::{Category, FileEntity, FilterKind, FilterOperator, FilterValue, SearchFilter};

use crate::matching::{contains_case_insensitive, matches_term};
use crate::view::passes_category;
use crate::{QueryError, QueryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextField {
    Name,
    Tags,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Created,
    Modified,
}

fn text_field(field: &str) -> Option<TextField> {
    match field {
        "name" => Some(TextField::Name),
        "tags" => Some(TextField::Tags),
        "" | "any" => Some(TextField::Any),
        _ => None,
    }
}

fn date_field(field: &str) -> Option<DateField> {
    match field {
        "created_at" | "createdAt" => Some(DateField::Created),
        "" | "modified_at" | "modifiedAt" => Some(DateField::Modified),
        _ => None,
    }
}

/// Rejects filters that could never be evaluated: an operator the kind
/// does not support, a value of the wrong shape, or an unknown field.
pub fn validate_filter(filter: &SearchFilter) -> QueryResult<()> {
    use FilterOperator::*;

    let operator_ok = match filter.kind {
        FilterKind::Text | FilterKind::Tag | FilterKind::Category => {
            matches!(filter.operator, Contains | Equals)
        }
        FilterKind::Date | FilterKind::Size => {
            matches!(filter.operator, Equals | Greater | Less | Between)
        }
    };
    if !operator_ok {
        return Err(QueryError::UnsupportedOperator {
            kind: filter.kind,
            operator: filter.operator,
        });
    }

    let value_ok = match (filter.kind, filter.operator, &filter.value) {
        (FilterKind::Text | FilterKind::Tag | FilterKind::Category, _, FilterValue::Text(_)) => {
            true
        }
        (FilterKind::Date, Between, FilterValue::DateRange(_)) => true,
        (FilterKind::Date, Equals | Greater | Less, FilterValue::Date(_)) => true,
        (FilterKind::Size, Between, FilterValue::NumberRange(_)) => true,
        (FilterKind::Size, Equals | Greater | Less, FilterValue::Number(_)) => true,
        _ => false,
    };
    if !value_ok {
        return Err(QueryError::MismatchedValue {
            kind: filter.kind,
            operator: filter.operator,
            value: format!("{:?}", filter.value),
        });
    }

    let field_ok = match filter.kind {
        FilterKind::Text => text_field(&filter.field).is_some(),
        FilterKind::Date => date_field(&filter.field).is_some(),
        FilterKind::Size | FilterKind::Tag | FilterKind::Category => true,
    };
    if !field_ok {
        return Err(QueryError::UnknownField {
            kind: filter.kind,
            field: filter.field.clone(),
        });
    }

    Ok(())
}

/// Evaluates one structured filter. Filters that fail validation match
/// nothing.
pub fn filter_matches(
    filter: &SearchFilter,
    file: &FileEntity,
    categories: &[Category],
    config: &CatalogConfig,
    now: DateTime<Utc>,
) -> bool {
    use FilterOperator::*;

    match (filter.kind, filter.operator, &filter.value) {
        (FilterKind::Text, op, FilterValue::Text(text)) => {
            let Some(field) = text_field(&filter.field) else {
                return false;
            };
            let needle = text.to_lowercase();
            let name_hit = |f: &FileEntity| match op {
                Equals => f.name.to_lowercase() == needle,
                _ => contains_case_insensitive(&f.name, &needle),
            };
            let tag_hit = |f: &FileEntity| match op {
                Equals => f.tags.iter().any(|t| t.to_lowercase() == needle),
                _ => f.tags.iter().any(|t| contains_case_insensitive(t, &needle)),
            };
            match (field, op) {
                (TextField::Name, Contains | Equals) => name_hit(file),
                (TextField::Tags, Contains | Equals) => tag_hit(file),
                (TextField::Any, Contains) => matches_term(file, &needle),
                (TextField::Any, Equals) => name_hit(file) || tag_hit(file),
                _ => false,
            }
        }
        (FilterKind::Tag, Contains, FilterValue::Text(text)) => {
            let needle = text.to_lowercase();
            file.tags
                .iter()
                .any(|tag| contains_case_insensitive(tag, &needle))
        }
        (FilterKind::Tag, Equals, FilterValue::Text(text)) => file.has_tag(text),
        (FilterKind::Category, Contains | Equals, FilterValue::Text(id)) => {
            passes_category(id, file, categories, config, now)
        }
        (FilterKind::Size, op, value) => {
            let size = file.size as f64;
            match (op, value) {
                (Equals, FilterValue::Number(n)) => size == *n,
                (Greater, FilterValue::Number(n)) => size > *n,
                (Less, FilterValue::Number(n)) => size < *n,
                (Between, FilterValue::NumberRange([lo, hi])) => size >= *lo && size <= *hi,
                _ => false,
            }
        }
        (FilterKind::Date, op, value) => {
            let at = match date_field(&filter.field) {
                Some(DateField::Created) => file.created_at,
                Some(DateField::Modified) => file.modified_at,
                None => return false,
            };
            match (op, value) {
                (Equals, FilterValue::Date(d)) => at.date_naive() == d.date_naive(),
                (Greater, FilterValue::Date(d)) => at > *d,
                (Less, FilterValue::Date(d)) => at < *d,
                (Between, FilterValue::DateRange([from, to])) => at >= *from && at <= *to,
                _ => false,
            }
        }
        _ => false,
    }
}
