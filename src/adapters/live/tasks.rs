//! Live adapter for the `TaskGateway` port.

use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};

use super::ApiConfig;
use crate::payload::TaskPayload;
use crate::ports::tasks::{GatewayFuture, SavedTask, TaskGateway};
use crate::selection::SelectionEntry;

/// Live task gateway backed by the kanban task endpoints.
pub struct LiveTaskGateway {
    client: Client,
    config: ApiConfig,
}

impl LiveTaskGateway {
    /// Creates a new live task gateway.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { client: Client::new(), config }
    }

    fn write_task(&self, method: Method, url: String, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let payload = payload.clone();

        Box::pin(async move {
            let response = self
                .client
                .request(method, &url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Task request failed: {e}").into()
                })?;

            let status = response.status();
            let body =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read task response: {e}").into()
                })?;

            if !status.is_success() {
                return Err(format!("Task endpoint error ({}): {body}", status.as_u16()).into());
            }

            let envelope: TaskEnvelope = serde_json::from_str(&body).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse task response: {e}").into()
                },
            )?;
            envelope.into_saved().ok_or_else(|| "Task response missing an id".into())
        })
    }
}

/// Response from the task endpoints; the id has shipped both at the
/// top level and nested under `task`.
#[derive(Deserialize)]
struct TaskEnvelope {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    task: Option<SavedTask>,
}

impl TaskEnvelope {
    fn into_saved(self) -> Option<SavedTask> {
        match (self.task, self.id) {
            (Some(task), _) => Some(task),
            (None, Some(id)) => Some(SavedTask { id }),
            (None, None) => None,
        }
    }
}

/// Body of `POST /api/kanban/task-categories`.
#[derive(Serialize)]
struct SaveSelectionsBody<'a> {
    #[serde(rename = "taskId")]
    task_id: &'a str,
    categories: Vec<SelectionLink<'a>>,
    #[serde(rename = "userEmail")]
    user_email: &'a str,
}

/// One category link as the endpoint expects it.
#[derive(Serialize)]
struct SelectionLink<'a> {
    category_id: &'a str,
    category_option_id: Option<&'a str>,
    sort_order: usize,
}

impl TaskGateway for LiveTaskGateway {
    fn create_task(&self, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let url = format!("{}/api/kanban/tasks", self.config.base_url);
        self.write_task(Method::POST, url, payload)
    }

    fn update_task(&self, task_id: &str, payload: &TaskPayload) -> GatewayFuture<'_, SavedTask> {
        let url = format!("{}/api/kanban/tasks/{task_id}", self.config.base_url);
        self.write_task(Method::PUT, url, payload)
    }

    fn save_selections(
        &self,
        task_id: &str,
        selections: &[SelectionEntry],
        user_email: &str,
    ) -> GatewayFuture<'_, ()> {
        let url = format!("{}/api/kanban/task-categories", self.config.base_url);
        let task_id = task_id.to_string();
        let user_email = user_email.to_string();
        let selections = selections.to_vec();

        Box::pin(async move {
            let body = SaveSelectionsBody {
                task_id: &task_id,
                categories: selections
                    .iter()
                    .map(|s| SelectionLink {
                        category_id: &s.category_id,
                        category_option_id: s.option_id.as_deref(),
                        sort_order: s.sort_order,
                    })
                    .collect(),
                user_email: &user_email,
            };

            let response = self.client.post(&url).json(&body).send().await.map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Task-categories request failed: {e}").into()
                },
            )?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(format!(
                    "Task-categories endpoint error ({}): {body}",
                    status.as_u16()
                )
                .into());
            }

            tracing::debug!(count = selections.len(), "saved task category links");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_accepts_top_level_id() {
        let envelope: TaskEnvelope = serde_json::from_value(json!({"id": "t1"})).unwrap();
        assert_eq!(envelope.into_saved().unwrap().id, "t1");
    }

    #[test]
    fn envelope_accepts_nested_task() {
        let envelope: TaskEnvelope =
            serde_json::from_value(json!({"task": {"id": "t2"}})).unwrap();
        assert_eq!(envelope.into_saved().unwrap().id, "t2");
    }

    #[test]
    fn envelope_without_id_is_rejected() {
        let envelope: TaskEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(envelope.into_saved().is_none());
    }

    #[test]
    fn selection_body_uses_endpoint_field_names() {
        let body = SaveSelectionsBody {
            task_id: "t1",
            categories: vec![SelectionLink {
                category_id: "c1",
                category_option_id: Some("o1"),
                sort_order: 0,
            }],
            user_email: "dev@example.com",
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["taskId"], "t1");
        assert_eq!(value["userEmail"], "dev@example.com");
        assert_eq!(value["categories"][0]["category_option_id"], "o1");
    }
}
