//! In-memory test doubles for the repository and client traits.

#![allow(dead_code)]

mod mock_bookmark_repository;
mod mock_catalog_repository;
mod mock_supabase_client;

pub use mock_bookmark_repository::MockBookmarkRepository;
pub use mock_catalog_repository::MockCatalogRepository;
pub use mock_supabase_client::MockSupabaseClient;
