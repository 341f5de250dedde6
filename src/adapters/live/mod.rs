//! Live adapters for real external interactions.

pub mod categories;
pub mod clock;
pub mod notify;
pub mod tasks;

use std::env;
use std::error::Error;

/// Base configuration for the live HTTP adapters.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Root URL of the kanban API, without a trailing slash.
    pub base_url: String,
}

impl ApiConfig {
    /// Creates a config pointing at the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Reads the base URL from `TASKLANE_API_URL`, loading `.env`
    /// first if one is present.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set.
    pub fn from_env() -> Result<Self, Box<dyn Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        let base_url = env::var("TASKLANE_API_URL")
            .map_err(|_| "TASKLANE_API_URL environment variable not set")?;
        Ok(Self::new(base_url))
    }
}
