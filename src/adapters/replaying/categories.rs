//! Replaying adapter for the `CategoryDirectory` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{CatalogFuture, CategoryDirectory};

/// Serves recorded catalog loads from a cassette.
pub struct ReplayingCategoryDirectory {
    replayer: Option<Arc<Mutex<CassetteReplayer>>>,
}

impl ReplayingCategoryDirectory {
    /// Create a replaying category directory backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer: Some(replayer) }
    }

    /// Create a replaying category directory with no cassette. Panics when called.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { replayer: None }
    }
}

impl CategoryDirectory for ReplayingCategoryDirectory {
    fn project_options(&self, _project_id: &str) -> CatalogFuture<'_> {
        let output = next_output(self.replayer.as_ref(), "categories", "project_options");
        Box::pin(async move { replay_result(output) })
    }
}
