//! Category directory port for loading a project's catalog.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use crate::catalog::Catalog;

/// Boxed future type alias used by [`CategoryDirectory`] to keep the
/// trait dyn-compatible.
pub type CatalogFuture<'a> =
    Pin<Box<dyn Future<Output = Result<Catalog, Box<dyn Error + Send + Sync>>> + Send + 'a>>;

/// Serves the category catalog for a project.
///
/// Implementations return the normalized [`Catalog`]; wire-shape
/// variance is absorbed behind this boundary so callers never see it.
pub trait CategoryDirectory: Send + Sync {
    /// Loads the catalog for the given project.
    ///
    /// # Errors
    ///
    /// The future resolves to an error if the catalog cannot be
    /// fetched or decoded.
    fn project_options(&self, project_id: &str) -> CatalogFuture<'_>;
}
