use std::collections::HashSet;

use deckcore_catalog::{is_duplicate, rule_category, Strategy};
use deckcore_changes::{ChangeKind, ChangeTarget};
use deckcore_model::{Category, CategoryId, CategoryPatch, NewCategory};
use deckcore_query::live_count;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::Store;

fn new_category_id() -> CategoryId {
    Uuid::now_v7().to_string()
}

fn find<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find_map(|c| {
        if c.id == id {
            Some(c)
        } else {
            find(&c.children, id)
        }
    })
}

fn find_mut<'a>(categories: &'a mut [Category], id: &str) -> Option<&'a mut Category> {
    for category in categories.iter_mut() {
        if category.id == id {
            return Some(category);
        }
        if let Some(child) = find_mut(&mut category.children, id) {
            return Some(child);
        }
    }
    None
}

fn remove(categories: &mut Vec<Category>, id: &str) -> bool {
    if let Some(pos) = categories.iter().position(|c| c.id == id) {
        categories.remove(pos);
        return true;
    }
    categories.iter_mut().any(|c| remove(&mut c.children, id))
}

impl Store {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Looks through nested children as well as top-level categories.
    pub fn category(&self, id: &str) -> Option<&Category> {
        find(&self.categories, id)
    }

    /// Replaces every category, e.g. when restoring a saved library.
    pub fn set_categories(&mut self, categories: Vec<Category>) {
        let mut seen = HashSet::new();
        for category in &categories {
            if !seen.insert(category.id.as_str()) {
                warn!(category_id = %category.id, "Duplicate category id accepted");
            }
        }
        self.categories = categories;
        self.record(ChangeKind::Updated, ChangeTarget::Categories, Vec::<String>::new());
    }

    /// Stores the category under a fresh id. `count` is kept as supplied.
    pub fn add_category(&mut self, draft: NewCategory) -> CategoryId {
        let id = new_category_id();
        debug!(category_id = %id, name = %draft.name, "Added category");
        self.categories.push(draft.into_category(id.clone()));
        self.record(ChangeKind::Created, ChangeTarget::Categories, [id.as_str()]);
        id
    }

    pub fn update_category(&mut self, id: &str, patch: &CategoryPatch) -> bool {
        let Some(category) = find_mut(&mut self.categories, id) else {
            return false;
        };
        let before = category.clone();
        patch.apply(category);
        if *category != before {
            debug!(category_id = %id, "Updated category");
            self.record(ChangeKind::Updated, ChangeTarget::Categories, [id]);
        }
        true
    }

    /// Removes the category and its children. Files are untouched.
    pub fn delete_category(&mut self, id: &str) -> bool {
        if !remove(&mut self.categories, id) {
            return false;
        }
        debug!(category_id = %id, "Deleted category");
        self.record(ChangeKind::Deleted, ChangeTarget::Categories, [id]);
        true
    }

    /// Membership count against the current files, as opposed to the count
    /// stored when the category was created.
    pub fn category_live_count(&self, id: &str) -> Option<usize> {
        self.category(id).map(|c| live_count(c, &self.files))
    }

    /// Runs one heuristic pass and stores the categories it proposes.
    /// Returns the ids of the categories created.
    pub fn auto_categorize(&mut self, strategy: Strategy) -> Vec<CategoryId> {
        let drafts = strategy.drafts(&self.files, &self.catalog);
        let proposed = drafts.len();
        let mut created = Vec::new();
        for draft in drafts {
            if self.catalog.dedupe_auto_categories && is_duplicate(&self.categories, &draft) {
                debug!(name = %draft.name, "Skipped existing category");
                continue;
            }
            let id = new_category_id();
            self.categories.push(draft.into_category(id.clone()));
            created.push(id);
        }

        info!(
            ?strategy,
            proposed,
            created = created.len(),
            "Auto-categorized files"
        );
        if !created.is_empty() {
            self.record(ChangeKind::Created, ChangeTarget::Categories, created.iter().cloned());
        }
        created
    }

    pub fn auto_categorize_by_singers(&mut self) -> Vec<CategoryId> {
        self.auto_categorize(Strategy::Artist)
    }

    pub fn auto_categorize_by_content(&mut self) -> Vec<CategoryId> {
        self.auto_categorize(Strategy::Kind)
    }

    pub fn auto_categorize_by_year(&mut self) -> Vec<CategoryId> {
        self.auto_categorize(Strategy::Year)
    }

    pub fn auto_categorize_by_genre(&mut self) -> Vec<CategoryId> {
        self.auto_categorize(Strategy::Genre)
    }

    /// A smart category from user-entered search terms, counted against the
    /// current files.
    pub fn create_rule_category<I, S>(
        &mut self,
        name: &str,
        icon: &str,
        color: Option<&str>,
        terms: I,
    ) -> CategoryId
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let draft = rule_category(name, icon, color, terms, &self.files);
        self.add_category(draft)
    }
}
