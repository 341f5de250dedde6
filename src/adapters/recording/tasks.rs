//! Recording adapter for the `TaskGateway` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::payload::TaskPayload;
use crate::ports::{GatewayFuture, SavedTask, TaskGateway};
use crate::selection::SelectionEntry;

/// Records task writes while delegating to an inner implementation.
pub struct RecordingTaskGateway {
    inner: Box<dyn TaskGateway>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingTaskGateway {
    /// Creates a new recording task gateway wrapping the given
    /// implementation.
    pub fn new(inner: Box<dyn TaskGateway>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct UpdateTaskInput<'a> {
    task_id: &'a str,
    payload: &'a TaskPayload,
}

#[derive(Serialize)]
struct SaveSelectionsInput<'a> {
    task_id: &'a str,
    selections: &'a [SelectionEntry],
    user_email: &'a str,
}

impl TaskGateway for RecordingTaskGateway {
    fn create_task(&self, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let payload = payload.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.create_task(&payload).await;
            record_result(&recorder, "tasks", "create_task", &payload, &result);
            result
        })
    }

    fn update_task(&self, task_id: &str, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let task_id = task_id.to_string();
        let payload = payload.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.update_task(&task_id, &payload).await;
            let input = UpdateTaskInput { task_id: &task_id, payload: &payload };
            record_result(&recorder, "tasks", "update_task", &input, &result);
            result
        })
    }

    fn save_selections(
        &self,
        task_id: &str,
        selections: &[SelectionEntry],
        user_email: &str,
    ) -> GatewayFuture<'_, ()> {
        let task_id = task_id.to_string();
        let selections = selections.to_vec();
        let user_email = user_email.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.save_selections(&task_id, &selections, &user_email).await;
            let input = SaveSelectionsInput {
                task_id: &task_id,
                selections: &selections,
                user_email: &user_email,
            };
            record_result(&recorder, "tasks", "save_selections", &input, &result);
            result
        })
    }
}
