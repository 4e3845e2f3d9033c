use crate::catalog::RawCatalog;
use crate::error::RepositoryResult;
use crate::models::Bookmark;
use async_trait::async_trait;

/// Source of bookmark rows.
///
/// Provides abstraction over bookmark storage, enabling different
/// implementations (REST table, in-memory mock).
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Fetch every bookmark row. Implementations page internally.
    async fn fetch_all(&self) -> RepositoryResult<Vec<Bookmark>>;
}

/// Source of raw per-category catalogs.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load every available catalog. A missing source is skipped, not an error.
    async fn load_all(&self) -> RepositoryResult<Vec<RawCatalog>>;

    /// Write a catalog back to its source, replacing what was there.
    async fn save(&self, catalog: &RawCatalog) -> RepositoryResult<()>;
}
