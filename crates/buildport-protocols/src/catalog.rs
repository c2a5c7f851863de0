//! Build catalog protocol definitions.
//!
//! A build catalog persists imported builds keyed by [`Build::id`].

use async_trait::async_trait;

use crate::error::CatalogError;
use crate::types::Build;

/// Storage for imported builds.
#[async_trait]
pub trait BuildCatalog: Send + Sync {
    /// Insert a build, replacing any build stored under the same id.
    async fn put(&self, id: &str, build: Build) -> Result<(), CatalogError>;

    /// Fetch one build.
    async fn get(&self, id: &str) -> Result<Option<Build>, CatalogError>;

    /// All stored builds.
    async fn get_all(&self) -> Result<Vec<Build>, CatalogError>;

    /// Remove a build. Removing an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), CatalogError>;
}
