mod json_catalog_repository;
mod supabase_bookmark_repository;
mod traits;

pub use json_catalog_repository::{default_sources, CatalogSource, JsonCatalogRepository};
pub use supabase_bookmark_repository::SupabaseBookmarkRepository;
pub use traits::{BookmarkRepository, CatalogRepository};
