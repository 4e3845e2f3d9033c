//! Async wrapper around synchronous SupabaseClient.
//!
//! This module provides an async interface to the synchronous SupabaseClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::SupabaseClient;
use crate::error::{RepositoryError, RepositoryResult};
use crate::models::Bookmark;
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for bookmark table operations.
#[async_trait]
pub trait AsyncSupabaseClient: Send + Sync {
    async fn fetch_wishlists(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<Bookmark>>;
    async fn insert_wishlists(&self, rows: Vec<Bookmark>) -> RepositoryResult<()>;
    async fn clear_wishlists(&self) -> RepositoryResult<()>;
}

/// Async wrapper around synchronous SupabaseClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncSupabaseClientImpl {
    client: Arc<SupabaseClient>,
}

impl AsyncSupabaseClientImpl {
    pub fn new(client: SupabaseClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

fn join_error(e: tokio::task::JoinError) -> RepositoryError {
    RepositoryError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncSupabaseClient for AsyncSupabaseClientImpl {
    async fn fetch_wishlists(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<Bookmark>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.fetch_wishlists(limit, offset))
            .await
            .map_err(join_error)?
    }

    async fn insert_wishlists(&self, rows: Vec<Bookmark>) -> RepositoryResult<()> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.insert_wishlists(&rows))
            .await
            .map_err(join_error)?
    }

    async fn clear_wishlists(&self) -> RepositoryResult<()> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.clear_wishlists())
            .await
            .map_err(join_error)?
    }
}
