//! Editable task fields and load-time snapshots.

use serde::{Deserialize, Serialize};

/// The editable fields of a task as entered in the create/edit modal.
///
/// Optional fields hold the raw input text (`None` = never set,
/// `Some("")` = cleared); parsing to numbers and dates happens in the
/// validator so that empty-equivalence stays expressible for change
/// detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskForm {
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Board column the task lives in.
    pub column_id: String,
    /// Priority wire value (e.g. `"low"`, `"medium"`, `"high"`).
    pub priority: Option<String>,
    /// Status wire value (e.g. `"todo"`, `"in_progress"`).
    pub status: Option<String>,
    /// Estimated hours as entered.
    pub estimated_hours: Option<String>,
    /// Actual hours as entered.
    pub actual_hours: Option<String>,
    /// Due date as entered (RFC 3339 or `YYYY-MM-DD`).
    pub due_date: Option<String>,
    /// Assignee identifier.
    pub assigned_to: Option<String>,
    /// Linked JIRA ticket id.
    pub jira_ticket_id: Option<String>,
    /// Linked JIRA ticket key (e.g. `"PROJ-123"`).
    pub jira_ticket_key: Option<String>,
    /// Visibility scope wire value.
    pub scope: Option<String>,
}

/// Immutable copy of the editable fields taken at load time.
///
/// Used only to decide whether anything changed before submitting;
/// never sent over the network.
pub type FormSnapshot = TaskForm;

impl TaskForm {
    /// Captures a snapshot of the current field values.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.clone()
    }
}
