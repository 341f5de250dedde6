//! Replaying adapter for the `TaskGateway` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::payload::TaskPayload;
use crate::ports::{GatewayFuture, SavedTask, TaskGateway};
use crate::selection::SelectionEntry;

/// Serves recorded task writes from a cassette.
pub struct ReplayingTaskGateway {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingTaskGateway {
    /// Create a replaying task gateway backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying task gateway with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl TaskGateway for ReplayingTaskGateway {
    fn create_task(&self, _payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let output = next_output(self.replayer.as_ref(), "tasks", "create_task");
        Box::pin(async move { replay_result(output) })
    }

    fn update_task(&self, _task_id: &str, _payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let output = next_output(self.replayer.as_ref(), "tasks", "update_task");
        Box::pin(async move { replay_result(output) })
    }

    fn save_selections(
        &self,
        _task_id: &str,
        _selections: &[SelectionEntry],
        _user_email: &str,
    ) -> GatewayFuture<'_, ()> {
        let output = next_output(self.replayer.as_ref(), "tasks", "save_selections");
        Box::pin(async move { replay_result(output) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use crate::payload::build_payload;
    use crate::form::TaskForm;
    use crate::selection::SelectionStore;
    use chrono::Utc;
    use serde_json::json;

    #[tokio::test]
    async fn serves_recorded_create() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "tasks".into(),
                method: "create_task".into(),
                input: json!({"title": "T"}),
                output: json!({"Ok": {"id": "task-9"}}),
            }],
        };
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        let gateway = ReplayingTaskGateway::new(replayer);

        let payload = build_payload(&TaskForm::default(), &SelectionStore::new());
        let saved = gateway.create_task(&payload).await.unwrap();
        assert_eq!(saved.id, "task-9");
    }

    #[tokio::test]
    async fn serves_recorded_save_selections_unit() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: "tasks".into(),
                method: "save_selections".into(),
                input: json!({}),
                output: json!({"Ok": null}),
            }],
        };
        let replayer = Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));
        let gateway = ReplayingTaskGateway::new(replayer);

        gateway.save_selections("t1", &[], "dev@example.com").await.unwrap();
    }
}
