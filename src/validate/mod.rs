//! Form validation for the task editor.
//!
//! Validation is a pure function of the form, the selection store, the
//! catalog, the policy, and an explicit `now`. Every rule is evaluated
//! on every call with no early exit, and the result is rebuilt from
//! scratch each time; nothing here performs I/O or reads ambient time.

use chrono::{DateTime, NaiveDate, Utc};

use crate::catalog::Catalog;
use crate::form::{FormSnapshot, TaskForm};
use crate::selection::SelectionStore;

/// The closed set of fields a validation message can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Task title.
    Title,
    /// Board column.
    Column,
    /// Category selections (reported under the legacy singular key).
    Category,
    /// Estimated hours.
    EstimatedHours,
    /// Actual hours.
    ActualHours,
    /// Due date.
    DueDate,
}

impl Field {
    /// Wire name of the field, matching the task endpoint's payload keys.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Column => "column_id",
            Field::Category => "category_id",
            Field::EstimatedHours => "estimated_hours",
            Field::ActualHours => "actual_hours",
            Field::DueDate => "due_date",
        }
    }
}

/// A single field-level validation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The field the message attaches to.
    pub field: Field,
    /// Human-readable message shown inline next to the field.
    pub message: String,
}

/// Result of one validation pass. Transient; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    /// Field errors, at most one per field.
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    /// Returns `true` if no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the message attached to `field`, if any.
    #[must_use]
    pub fn message_for(&self, field: Field) -> Option<&str> {
        self.errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
    }

    fn push(&mut self, field: Field, message: &str) {
        self.errors.push(FieldError { field, message: message.to_string() });
    }
}

/// Policy switches for the rules observed to differ between modal
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// `true`: every catalog category must have a chosen option.
    /// `false`: at least one chosen option suffices.
    pub require_all: bool,
    /// `true`: an edit flow may keep a due date that was already in the
    /// past when the task was loaded, as long as it is unchanged.
    pub allow_past_due_on_edit: bool,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self { require_all: true, allow_past_due_on_edit: true }
    }
}

/// Validates the form against the catalog and current selections.
///
/// `original` is the load-time snapshot for edit flows (`None` in
/// create flows); it only participates in the past-due-date exemption.
/// `now` is the validation-time instant, supplied by the caller's
/// clock.
#[must_use]
pub fn validate(
    form: &TaskForm,
    store: &SelectionStore,
    catalog: &Catalog,
    policy: ValidationPolicy,
    original: Option<&FormSnapshot>,
    now: DateTime<Utc>,
) -> ValidationResult {
    let mut result = ValidationResult::default();

    if form.title.trim().is_empty() {
        result.push(Field::Title, "Title is required");
    }

    if form.column_id.trim().is_empty() {
        result.push(Field::Column, "Column is required");
    }

    if policy.require_all {
        if !store.is_complete(catalog) {
            result.push(Field::Category, "All categories are mandatory and must be selected");
        }
    } else if !store.has_any_choice() {
        result.push(Field::Category, "At least one category option is required");
    }

    if let Some(hours) = provided(form.estimated_hours.as_deref()) {
        if !parses_positive(hours) {
            result.push(Field::EstimatedHours, "Estimated hours must be greater than 0");
        }
    }

    if let Some(hours) = provided(form.actual_hours.as_deref()) {
        if !parses_positive(hours) {
            result.push(Field::ActualHours, "Actual hours must be greater than 0");
        }
    }

    if let Some(raw) = provided(form.due_date.as_deref()) {
        match parse_due_date(raw) {
            None => result.push(Field::DueDate, "Due date is invalid"),
            Some(due) if due < now && !past_due_exempt(form, original, policy) => {
                result.push(Field::DueDate, "Due date cannot be in the past");
            }
            Some(_) => {}
        }
    }

    result
}

/// Returns the trimmed value when the field was actually provided.
fn provided(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// `true` if the input parses to a number strictly greater than zero.
fn parses_positive(input: &str) -> bool {
    input.parse::<f64>().is_ok_and(|hours| hours > 0.0)
}

/// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
///
/// Bare dates compare as midnight UTC, matching how the endpoint
/// stores them.
fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// An edit flow may preserve a past due date it loaded with, as long
/// as the field is unchanged from the snapshot.
fn past_due_exempt(
    form: &TaskForm,
    original: Option<&FormSnapshot>,
    policy: ValidationPolicy,
) -> bool {
    policy.allow_past_due_on_edit
        && original.is_some_and(|snapshot| snapshot.due_date == form.due_date)
}
