//! Wire payloads for task create and update.
//!
//! [`build_payload`] flattens the form and the selection store into the
//! shape the kanban endpoints accept: the full `categories` array plus
//! the legacy singular `category_id`/`category_option_id` pair that
//! older endpoint versions still read.

use serde::ser::Serializer;
use serde::Serialize;

use crate::form::TaskForm;
use crate::selection::SelectionStore;

/// Due date as it appears in the serialized payload.
///
/// The backing store rejects empty strings for timestamp columns, so a
/// cleared date must serialize as an explicit `null` while a date that
/// was never set is omitted from the payload entirely.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DueDateField {
    /// Never set; the field is skipped during serialization.
    #[default]
    Unset,
    /// Cleared by the user; serializes as `null`.
    Clear,
    /// A concrete date string, passed through verbatim.
    Set(String),
}

impl DueDateField {
    /// Maps raw form input onto the wire sentinel.
    #[must_use]
    pub fn from_input(value: Option<&str>) -> Self {
        match value {
            None => Self::Unset,
            Some("") => Self::Clear,
            Some(v) => Self::Set(v.to_string()),
        }
    }

    fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

impl Serialize for DueDateField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Unset is skipped at the struct level; serializing it
            // anyway (e.g. standalone) behaves like a cleared date.
            Self::Unset | Self::Clear => serializer.serialize_none(),
            Self::Set(value) => serializer.serialize_str(value),
        }
    }
}

/// One entry of the `categories` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayloadCategory {
    /// Category this entry links.
    pub category_id: String,
    /// Chosen option, or `null` for a touched-but-cleared category.
    pub category_option_id: Option<String>,
    /// Always `false`; the endpoint field predates the removal of the
    /// primary-category concept.
    pub is_primary: bool,
    /// Position in the editor's insertion order.
    pub sort_order: usize,
}

/// Body of `POST /api/kanban/tasks` and `PUT /api/kanban/tasks/<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskPayload {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Legacy singular field: first selection with a chosen option.
    pub category_id: Option<String>,
    /// Legacy singular field: that selection's option id.
    pub category_option_id: Option<String>,
    /// Every touched category, in insertion order.
    pub categories: Vec<PayloadCategory>,
    /// Destination board column.
    pub column_id: String,
    /// Priority wire value.
    pub priority: Option<String>,
    /// Status wire value.
    pub status: Option<String>,
    /// Estimated hours as entered.
    pub estimated_hours: Option<String>,
    /// Actual hours as entered.
    pub actual_hours: Option<String>,
    /// Due date sentinel; omitted when never set.
    #[serde(skip_serializing_if = "DueDateField::is_unset")]
    pub due_date: DueDateField,
    /// Linked JIRA ticket id.
    pub jira_ticket_id: Option<String>,
    /// Linked JIRA ticket key.
    pub jira_ticket_key: Option<String>,
    /// Assignee identifier.
    pub assigned_to: Option<String>,
    /// Visibility scope wire value.
    pub scope: Option<String>,
}

/// Builds the submission payload from the form and the selection store.
#[must_use]
pub fn build_payload(form: &TaskForm, store: &SelectionStore) -> TaskPayload {
    let (category_id, category_option_id) = match store.primary_choice() {
        Some((category, option)) => (Some(category.to_string()), Some(option.to_string())),
        None => (None, None),
    };
    let categories = store
        .to_selections()
        .into_iter()
        .map(|entry| PayloadCategory {
            category_id: entry.category_id,
            category_option_id: entry.option_id,
            is_primary: false,
            sort_order: entry.sort_order,
        })
        .collect();

    TaskPayload {
        title: form.title.clone(),
        description: form.description.clone(),
        category_id,
        category_option_id,
        categories,
        column_id: form.column_id.clone(),
        priority: form.priority.clone(),
        status: form.status.clone(),
        estimated_hours: form.estimated_hours.clone(),
        actual_hours: form.actual_hours.clone(),
        due_date: DueDateField::from_input(form.due_date.as_deref()),
        jira_ticket_id: form.jira_ticket_id.clone(),
        jira_ticket_key: form.jira_ticket_key.clone(),
        assigned_to: form.assigned_to.clone(),
        scope: form.scope.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn store(entries: &[(&str, &str)]) -> SelectionStore {
        let mut store = SelectionStore::new();
        for (category, option) in entries {
            store.set_option(*category, option);
        }
        store
    }

    #[test]
    fn categories_array_preserves_insertion_order() {
        let form = TaskForm { title: "T".to_string(), ..TaskForm::default() };
        let payload =
            build_payload(&form, &store(&[("c2", "o2"), ("c1", "o1"), ("c3", "o3")]));

        let ids: Vec<&str> =
            payload.categories.iter().map(|c| c.category_id.as_str()).collect();
        assert_eq!(ids, ["c2", "c1", "c3"]);
        let orders: Vec<usize> = payload.categories.iter().map(|c| c.sort_order).collect();
        assert_eq!(orders, [0, 1, 2]);
    }

    #[test]
    fn legacy_fields_come_from_first_chosen_entry() {
        let mut selections = SelectionStore::new();
        selections.set_option("c1", ""); // touched but cleared
        selections.set_option("c2", "o2");

        let payload = build_payload(&TaskForm::default(), &selections);
        assert_eq!(payload.category_id.as_deref(), Some("c2"));
        assert_eq!(payload.category_option_id.as_deref(), Some("o2"));
        // The cleared entry still rides along in the array.
        assert_eq!(payload.categories.len(), 2);
        assert!(payload.categories[0].category_option_id.is_none());
    }

    #[test]
    fn empty_store_yields_null_legacy_fields_and_empty_array() {
        let payload = build_payload(&TaskForm::default(), &SelectionStore::new());
        assert!(payload.category_id.is_none());
        assert!(payload.category_option_id.is_none());
        assert!(payload.categories.is_empty());
    }

    #[test]
    fn is_primary_is_always_false() {
        let payload = build_payload(&TaskForm::default(), &store(&[("c1", "o1")]));
        assert!(payload.categories.iter().all(|c| !c.is_primary));
    }

    #[test]
    fn unset_due_date_is_omitted_from_json() {
        let form = TaskForm { due_date: None, ..TaskForm::default() };
        let value = serde_json::to_value(build_payload(&form, &SelectionStore::new()))
            .expect("payload serializes");
        assert!(value.get("due_date").is_none());
    }

    #[test]
    fn cleared_due_date_serializes_as_explicit_null() {
        let form = TaskForm { due_date: Some(String::new()), ..TaskForm::default() };
        let value = serde_json::to_value(build_payload(&form, &SelectionStore::new()))
            .expect("payload serializes");
        assert_eq!(value.get("due_date"), Some(&Value::Null));
    }

    #[test]
    fn set_due_date_passes_through_verbatim() {
        let form =
            TaskForm { due_date: Some("2025-06-01".to_string()), ..TaskForm::default() };
        let value = serde_json::to_value(build_payload(&form, &SelectionStore::new()))
            .expect("payload serializes");
        assert_eq!(value.get("due_date"), Some(&json!("2025-06-01")));
    }

    #[test]
    fn scalar_fields_copy_through() {
        let form = TaskForm {
            title: "Ship it".to_string(),
            description: Some("Notes".to_string()),
            column_id: "col-1".to_string(),
            priority: Some("high".to_string()),
            estimated_hours: Some("4".to_string()),
            jira_ticket_key: Some("PROJ-9".to_string()),
            ..TaskForm::default()
        };
        let payload = build_payload(&form, &SelectionStore::new());
        assert_eq!(payload.title, "Ship it");
        assert_eq!(payload.column_id, "col-1");
        assert_eq!(payload.priority.as_deref(), Some("high"));
        assert_eq!(payload.jira_ticket_key.as_deref(), Some("PROJ-9"));
    }
}
