use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Text,
    Date,
    Size,
    Tag,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    Contains,
    Equals,
    Greater,
    Less,
    Between,
}

/// Right-hand side of a structured filter. Untagged on the wire, so a
/// JSON number, an RFC 3339 string, a plain string or a two element array
/// all deserialize to the obvious variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(f64),
    NumberRange([f64; 2]),
    DateRange([DateTime<Utc>; 2]),
    Date(DateTime<Utc>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilter {
    #[serde(rename = "type")]
    pub kind: FilterKind,
    /// Which attribute the filter reads, e.g. `name`, `tags`, `created_at`.
    #[serde(default)]
    pub field: String,
    pub operator: FilterOperator,
    pub value: FilterValue,
}

impl SearchFilter {
    pub fn new(
        kind: FilterKind,
        field: impl Into<String>,
        operator: FilterOperator,
        value: FilterValue,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            operator,
            value,
        }
    }
}
