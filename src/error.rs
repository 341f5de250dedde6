//! Typed errors surfaced by the task editor.
//!
//! Port traits return `Box<dyn Error + Send + Sync>` at the boundary;
//! the editor wraps those into this closed set. Field-level validation
//! problems are not errors in this sense and travel as
//! [`ValidationResult`](crate::validate::ValidationResult) instead.

use thiserror::Error;

/// Failures an editor operation can surface to its host.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The category catalog could not be loaded.
    #[error("failed to load category catalog: {0}")]
    CatalogLoad(String),

    /// A task create, update, or selection save failed. The editor
    /// state is untouched so the submission can be retried.
    #[error("task submission failed: {0}")]
    Submission(String),

    /// The operation was invoked on a closed editor.
    #[error("editor is closed")]
    Closed,
}
