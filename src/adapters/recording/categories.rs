//! Recording adapter for the `CategoryDirectory` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{CatalogFuture, CategoryDirectory};

/// Records catalog loads while delegating to an inner implementation.
pub struct RecordingCategoryDirectory {
    inner: Box<dyn CategoryDirectory>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCategoryDirectory {
    /// Creates a new recording category directory wrapping the given
    /// implementation.
    pub fn new(inner: Box<dyn CategoryDirectory>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct ProjectOptionsInput<'a> {
    project_id: &'a str,
}

impl CategoryDirectory for RecordingCategoryDirectory {
    fn project_options(&self, project_id: &str) -> CatalogFuture<'_> {
        let project_id = project_id.to_string();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.project_options(&project_id).await;
            let input = ProjectOptionsInput { project_id: &project_id };
            record_result(&recorder, "categories", "project_options", &input, &result);
            result
        })
    }
}
