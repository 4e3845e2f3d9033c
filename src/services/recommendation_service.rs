//! Recommendation service layer.
//!
//! Fetches a fresh bookmark snapshot per request and runs it through the
//! engine. Input validation happens here so the engine can stay infallible.

use crate::error::{RepositoryError, RepositoryResult};
use crate::models::{BookmarkSnapshot, Recommendation, Service};
use crate::recommender::{PopularityStats, RecommendationEngine};
use crate::repositories::BookmarkRepository;
use async_trait::async_trait;
use std::sync::Arc;

const MAX_USER_ID_LEN: usize = 100;

/// Recommendation service trait for business operations.
#[async_trait]
pub trait RecommendationService: Send + Sync {
    /// Up to `top_k` services for a user (the configured default when `None`).
    async fn recommend(
        &self,
        user_id: &str,
        top_k: Option<usize>,
    ) -> RepositoryResult<Vec<Recommendation>>;

    /// Every user with at least one bookmark, sorted.
    async fn list_users(&self) -> RepositoryResult<Vec<String>>;

    /// Bookmark counts across all users.
    async fn popularity_stats(&self) -> RepositoryResult<PopularityStats>;

    /// Look up one catalog entry.
    async fn get_service(&self, service_id: &str) -> RepositoryResult<Service>;
}

/// Default implementation of RecommendationService.
pub struct RecommendationServiceImpl {
    bookmarks: Arc<dyn BookmarkRepository>,
    engine: RecommendationEngine,
    default_top_k: usize,
    max_top_k: usize,
}

/// Validation helper functions.
impl RecommendationServiceImpl {
    fn validate_user_id(user_id: &str) -> Result<(), String> {
        if user_id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        if user_id.len() > MAX_USER_ID_LEN {
            return Err(format!(
                "User ID too long (max {} characters)",
                MAX_USER_ID_LEN
            ));
        }
        Ok(())
    }

    fn validate_top_k(&self, top_k: usize) -> Result<(), String> {
        if top_k > self.max_top_k {
            return Err(format!("top_k must be at most {}", self.max_top_k));
        }
        Ok(())
    }
}

impl RecommendationServiceImpl {
    pub fn new(bookmarks: Arc<dyn BookmarkRepository>, engine: RecommendationEngine) -> Self {
        Self {
            bookmarks,
            engine,
            default_top_k: 5,
            max_top_k: 50,
        }
    }

    pub fn with_limits(mut self, default_top_k: usize, max_top_k: usize) -> Self {
        self.default_top_k = default_top_k;
        self.max_top_k = max_top_k;
        self
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    async fn snapshot(&self) -> RepositoryResult<BookmarkSnapshot> {
        let rows = self.bookmarks.fetch_all().await.map_err(|e| {
            tracing::error!("Failed to fetch bookmarks: {}", e);
            e
        })?;
        Ok(BookmarkSnapshot::new(rows))
    }
}

#[async_trait]
impl RecommendationService for RecommendationServiceImpl {
    async fn recommend(
        &self,
        user_id: &str,
        top_k: Option<usize>,
    ) -> RepositoryResult<Vec<Recommendation>> {
        Self::validate_user_id(user_id).map_err(RepositoryError::InvalidRequest)?;
        let top_k = top_k.unwrap_or(self.default_top_k);
        self.validate_top_k(top_k)
            .map_err(RepositoryError::InvalidRequest)?;

        let snapshot = self.snapshot().await?;
        if snapshot.is_empty() {
            tracing::info!(user_id, "No bookmarks stored, returning no recommendations");
            return Ok(Vec::new());
        }

        // Mining is CPU-bound; keep it off the async workers.
        let engine = self.engine.clone();
        let user = user_id.to_string();
        let results = tokio::task::spawn_blocking(move || engine.recommend(&user, &snapshot, top_k))
            .await
            .map_err(|e| RepositoryError::Other(format!("Task join error: {}", e)))?;

        tracing::info!(
            user_id,
            top_k,
            returned = results.len(),
            rule = results.iter().filter(|r| r.is_rule()).count(),
            "Served recommendations"
        );

        Ok(results)
    }

    async fn list_users(&self) -> RepositoryResult<Vec<String>> {
        Ok(self.snapshot().await?.user_ids())
    }

    async fn popularity_stats(&self) -> RepositoryResult<PopularityStats> {
        let snapshot = self.snapshot().await?;
        Ok(PopularityStats::from_snapshot(&snapshot, self.engine.catalog()))
    }

    async fn get_service(&self, service_id: &str) -> RepositoryResult<Service> {
        if service_id.trim().is_empty() {
            return Err(RepositoryError::InvalidRequest(
                "Service ID cannot be empty".to_string(),
            ));
        }

        self.engine
            .catalog()
            .get(service_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Service {} not found", service_id)))
    }
}
