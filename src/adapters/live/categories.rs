//! Live adapter for the `CategoryDirectory` port.

use reqwest::Client;

use super::ApiConfig;
use crate::catalog::wire::{normalize, ProjectOptionsResponse};
use crate::ports::categories::{CatalogFuture, CategoryDirectory};

/// Live category directory backed by the project-options endpoint.
pub struct LiveCategoryDirectory {
    client: Client,
    config: ApiConfig,
}

impl LiveCategoryDirectory {
    /// Creates a new live category directory.
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { client: Client::new(), config }
    }
}

impl CategoryDirectory for LiveCategoryDirectory {
    fn project_options(&self, project_id: &str) -> CatalogFuture<'_> {
        let url = format!("{}/api/categories/project-options", self.config.base_url);
        let project_id = project_id.to_string();

        Box::pin(async move {
            let response = self
                .client
                .get(&url)
                .query(&[("projectId", project_id.as_str())])
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Category request failed: {e}").into()
                })?;

            let status = response.status();
            let body =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to read category response: {e}").into()
                })?;

            if !status.is_success() {
                return Err(
                    format!("Category endpoint error ({}): {body}", status.as_u16()).into()
                );
            }

            let decoded: ProjectOptionsResponse = serde_json::from_str(&body).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("Failed to parse category response: {e}").into()
                },
            )?;

            tracing::debug!(
                categories = decoded.categories.len(),
                "loaded project options"
            );
            Ok(normalize(decoded.categories))
        })
    }
}
