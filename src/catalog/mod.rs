//! Category catalog model.
//!
//! A catalog is the ordered set of categories, each with its ordered
//! options, available to a project. It is loaded once per editor open
//! (or project switch) and read-only thereafter; categories are only
//! mutated through the external category-management endpoints.

pub mod wire;

use serde::{Deserialize, Serialize};

/// A selectable option belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    /// Unique option identifier.
    pub id: String,
    /// Identifier of the owning category.
    pub category_id: String,
    /// Display name.
    pub name: String,
    /// Optional machine value distinct from the display name.
    pub value: Option<String>,
    /// Ascending display position within the category.
    pub sort_order: i64,
}

/// A project category with its selectable options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional description shown in category pickers.
    pub description: Option<String>,
    /// Ascending display position within the catalog.
    pub sort_order: i64,
    /// Options in display order.
    pub options: Vec<CategoryOption>,
}

/// The ordered set of categories available to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Categories in display order.
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Returns a catalog with no categories, used when a load fails.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the catalog holds no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Number of categories in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Looks up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Returns `true` if `option_id` is one of `category_id`'s options.
    ///
    /// Used when hydrating an editor from a task's existing category
    /// links, to drop pairs that no longer exist in the catalog.
    #[must_use]
    pub fn contains_option(&self, category_id: &str, option_id: &str) -> bool {
        self.category(category_id)
            .is_some_and(|c| c.options.iter().any(|o| o.id == option_id))
    }
}
