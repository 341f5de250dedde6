//! Per-editor-session category selections.
//!
//! The store maps each touched category to its chosen option, in the
//! order categories were first touched. It lives exactly as long as one
//! open editor: created empty on open, populated by user interaction or
//! by hydrating a task's existing links, discarded on close.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// One category's selection, as handed to the submission layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    /// The category this entry belongs to.
    pub category_id: String,
    /// The chosen option, or `None` when the category was touched but
    /// its choice cleared.
    pub option_id: Option<String>,
    /// Position of this entry in insertion order.
    pub sort_order: usize,
}

/// Insertion-ordered mapping of category id to chosen option id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    choices: IndexMap<String, Option<String>>,
}

impl SelectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the choice for a category.
    ///
    /// A blank `option_id` clears the category's choice but keeps the
    /// entry, so completeness checks see the category as
    /// touched-but-unset rather than untouched.
    pub fn set_option(&mut self, category_id: impl Into<String>, option_id: &str) {
        let choice =
            if option_id.trim().is_empty() { None } else { Some(option_id.to_string()) };
        self.choices.insert(category_id.into(), choice);
    }

    /// Returns the chosen option id for a category, if one is set.
    #[must_use]
    pub fn choice(&self, category_id: &str) -> Option<&str> {
        self.choices.get(category_id).and_then(|c| c.as_deref())
    }

    /// Returns `true` if the category has an entry, chosen or cleared.
    #[must_use]
    pub fn is_touched(&self, category_id: &str) -> bool {
        self.choices.contains_key(category_id)
    }

    /// Returns `true` iff every category in `catalog` has a chosen
    /// option.
    ///
    /// Entries for categories absent from the catalog are ignored, so a
    /// stale entry can never make an incomplete selection look complete.
    #[must_use]
    pub fn is_complete(&self, catalog: &Catalog) -> bool {
        catalog.categories.iter().all(|c| self.choice(&c.id).is_some())
    }

    /// Returns `true` if at least one category has a chosen option.
    #[must_use]
    pub fn has_any_choice(&self) -> bool {
        self.choices.values().any(Option::is_some)
    }

    /// Selections in insertion order, each stamped with its position.
    #[must_use]
    pub fn to_selections(&self) -> Vec<SelectionEntry> {
        self.choices
            .iter()
            .enumerate()
            .map(|(index, (category_id, option_id))| SelectionEntry {
                category_id: category_id.clone(),
                option_id: option_id.clone(),
                sort_order: index,
            })
            .collect()
    }

    /// The first entry in insertion order with a chosen option.
    ///
    /// Retained for the legacy singular `category_id` /
    /// `category_option_id` payload fields.
    #[must_use]
    pub fn primary_choice(&self) -> Option<(&str, &str)> {
        self.choices
            .iter()
            .find_map(|(category_id, option_id)| {
                option_id.as_deref().map(|o| (category_id.as_str(), o))
            })
    }

    /// Drops entries whose category no longer exists in `catalog`.
    ///
    /// Called whenever the catalog is reloaded (project switch), so a
    /// removed category cannot leave a phantom entry behind.
    pub fn retain_catalog(&mut self, catalog: &Catalog) {
        self.choices.retain(|category_id, _| catalog.category(category_id).is_some());
    }

    /// Clears all entries.
    pub fn reset(&mut self) {
        self.choices.clear();
    }

    /// Number of touched categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns `true` if no category has been touched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}
