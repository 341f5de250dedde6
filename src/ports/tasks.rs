//! Task gateway port for creating and updating tasks.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::payload::TaskPayload;
use crate::selection::SelectionEntry;

/// Boxed future type alias used by [`TaskGateway`] to keep the trait
/// dyn-compatible.
pub type GatewayFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// The identity of a task after a successful create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedTask {
    /// Server-assigned task identifier.
    pub id: String,
}

/// Writes tasks and their category links to the kanban backend.
pub trait TaskGateway: Send + Sync {
    /// Creates a new task and returns its assigned identity.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the task cannot be created.
    fn create_task(&self, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask>;

    /// Updates an existing task in place.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the task cannot be found or
    /// updated.
    fn update_task(&self, task_id: &str, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask>;

    /// Replaces the task's category links with the given selections.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the links cannot be saved.
    fn save_selections(
        &self,
        task_id: &str,
        selections: &[SelectionEntry],
        user_email: &str,
    ) -> GatewayFuture<'_, ()>;
}
