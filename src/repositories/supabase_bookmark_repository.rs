use crate::client::AsyncSupabaseClient;
use crate::error::RepositoryResult;
use crate::models::Bookmark;
use crate::repositories::traits::BookmarkRepository;
use async_trait::async_trait;
use std::sync::Arc;

/// Rows requested per page.
pub const PAGE_SIZE: usize = 1000;

/// Bookmark repository backed by the Supabase `wishlists` table.
///
/// Reads the whole table page by page; a short page ends the scan.
pub struct SupabaseBookmarkRepository {
    client: Arc<dyn AsyncSupabaseClient>,
    page_size: usize,
}

impl SupabaseBookmarkRepository {
    /// Create a new SupabaseBookmarkRepository with the given client.
    pub fn new(client: Arc<dyn AsyncSupabaseClient>) -> Self {
        Self {
            client,
            page_size: PAGE_SIZE,
        }
    }

    #[doc(hidden)]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

#[async_trait]
impl BookmarkRepository for SupabaseBookmarkRepository {
    async fn fetch_all(&self) -> RepositoryResult<Vec<Bookmark>> {
        let mut all = Vec::new();
        let mut offset = 0;

        loop {
            let page = self.client.fetch_wishlists(self.page_size, offset).await?;
            let count = page.len();
            all.extend(page);

            if count < self.page_size {
                break;
            }
            offset += self.page_size;
        }

        tracing::debug!(rows = all.len(), "Fetched bookmark table");
        Ok(all)
    }
}
