//! Unsaved-change detection for edit flows.
//!
//! Compares the load-time snapshot against the current form and
//! selections to decide whether a submit would actually write
//! anything. This gates the submit action as an optimization only;
//! callers without a usable snapshot must treat the form as changed
//! rather than block a legitimate submission.

use crate::form::FormSnapshot;
use crate::selection::SelectionEntry;

/// Returns `true` when any field or selection differs from the
/// snapshot.
#[must_use]
pub fn has_changes(
    original: &FormSnapshot,
    current: &FormSnapshot,
    original_selections: &[SelectionEntry],
    current_selections: &[SelectionEntry],
) -> bool {
    fields_changed(original, current)
        || selections_changed(original_selections, current_selections)
}

/// Canonical form of an optional text field: `None` and `""` collapse
/// to the same empty value, so type-coercion noise between an unset
/// field and a cleared input never reads as a change.
fn canon(value: Option<&str>) -> &str {
    value.unwrap_or("")
}

fn fields_changed(original: &FormSnapshot, current: &FormSnapshot) -> bool {
    let pairs: [(Option<&str>, Option<&str>); 12] = [
        (Some(&original.title), Some(&current.title)),
        (original.description.as_deref(), current.description.as_deref()),
        (Some(&original.column_id), Some(&current.column_id)),
        (original.priority.as_deref(), current.priority.as_deref()),
        (original.status.as_deref(), current.status.as_deref()),
        (original.estimated_hours.as_deref(), current.estimated_hours.as_deref()),
        (original.actual_hours.as_deref(), current.actual_hours.as_deref()),
        (original.due_date.as_deref(), current.due_date.as_deref()),
        (original.assigned_to.as_deref(), current.assigned_to.as_deref()),
        (original.jira_ticket_id.as_deref(), current.jira_ticket_id.as_deref()),
        (original.jira_ticket_key.as_deref(), current.jira_ticket_key.as_deref()),
        (original.scope.as_deref(), current.scope.as_deref()),
    ];
    pairs.iter().any(|(a, b)| canon(*a) != canon(*b))
}

fn selections_changed(original: &[SelectionEntry], current: &[SelectionEntry]) -> bool {
    if original.len() != current.len() {
        return true;
    }
    original.iter().zip(current).any(|(a, b)| {
        a.category_id != b.category_id
            || canon(a.option_id.as_deref()) != canon(b.option_id.as_deref())
    })
}
