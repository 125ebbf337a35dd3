use serde::{Deserialize, Deserializer, Serialize};

use crate::{CategoryId, FileKind};

/// Structural membership for auto-generated categories. When present it
/// decides membership instead of the textual `rules`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "by", content = "value")]
pub enum CategoryCriteria {
    Kind(FileKind),
    Year(i32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    /// Number of matching files when the category was created. Not kept in
    /// sync with later file mutations; use a live count for that.
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criteria: Option<CategoryCriteria>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Category>,
}

impl Category {
    /// True when the category has some way of selecting files.
    pub fn is_smart(&self) -> bool {
        self.criteria.is_some() || self.rules.is_some()
    }
}

/// A category before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub count: usize,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rules: Option<Vec<String>>,
    #[serde(default)]
    pub criteria: Option<CategoryCriteria>,
    #[serde(default)]
    pub children: Vec<Category>,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            count: 0,
            color: None,
            description: None,
            rules: None,
            criteria: None,
            children: Vec::new(),
        }
    }

    pub fn with_rules<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rules = Some(rules.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            icon: self.icon,
            count: self.count,
            color: self.color,
            description: self.description,
            rules: self.rules,
            criteria: self.criteria,
            children: self.children,
        }
    }
}

/// Present-but-null becomes `Some(None)` so a patch can clear a field.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub count: Option<usize>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub rules: Option<Vec<String>>,
    /// `Some(None)` drops the structural criteria so edited `rules` take
    /// effect on an auto-generated category.
    #[serde(deserialize_with = "explicit_null", skip_serializing_if = "Option::is_none")]
    pub criteria: Option<Option<CategoryCriteria>>,
    pub children: Option<Vec<Category>>,
}

impl CategoryPatch {
    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
        if let Some(count) = self.count {
            category.count = count;
        }
        if let Some(color) = &self.color {
            category.color = Some(color.clone());
        }
        if let Some(description) = &self.description {
            category.description = Some(description.clone());
        }
        if let Some(rules) = &self.rules {
            category.rules = Some(rules.clone());
        }
        if let Some(criteria) = self.criteria {
            category.criteria = criteria;
        }
        if let Some(children) = &self.children {
            category.children = children.clone();
        }
    }
}
