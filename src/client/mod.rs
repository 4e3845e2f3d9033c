//! HTTP client for the Supabase REST endpoint that stores bookmarks.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles authentication, error mapping,
//! and limit/offset paging of the `wishlists` table.

mod async_wrapper;
pub use async_wrapper::{AsyncSupabaseClient, AsyncSupabaseClientImpl};

use crate::config::Config;
use crate::error::{RepositoryError, RepositoryResult};
use crate::metrics::{HttpTimer, Metrics};
use crate::models::Bookmark;
use std::sync::Arc;
use std::time::Duration;

/// REST path of the bookmark table.
pub const WISHLISTS_PATH: &str = "/rest/v1/wishlists";

/// Columns the engine reads from each bookmark row.
const WISHLIST_COLUMNS: &str = "user_id,service_id";

/// HTTP client for the Supabase REST API.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SupabaseClient {
    /// Project URL, without the `/rest/v1` suffix
    base_url: String,

    /// Anon key, sent as `apikey` and as the bearer token
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl SupabaseClient {
    /// Create a new SupabaseClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.supabase_url.clone(),
            api_key: config.supabase_key.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a SupabaseClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            api_key,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Share an existing metrics collector.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("apikey", &self.api_key)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
    }

    /// Stop the request timer and pass the result through.
    fn observe<T>(
        &self,
        method: &str,
        url: &str,
        timer: HttpTimer,
        result: RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        match &result {
            Ok(_) => timer.complete(),
            Err(e) => {
                tracing::error!("{} {} - Error: {:?}", method, url, e);
                timer.complete_with_error();
            }
        }
        result
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> RepositoryResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let result = self
            .authorize(self.agent.get(&url))
            .call()
            .map_err(|e| self.map_error(e));

        self.observe("GET", &url, timer, result)
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> RepositoryResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);

        let result = self
            .authorize(self.agent.post(&url))
            .set("Prefer", "return=minimal")
            .send_json(body)
            .map_err(|e| self.map_error(e));

        self.observe("POST", &url, timer, result)
    }

    /// Execute a DELETE request with authentication.
    fn delete(&self, path: &str) -> RepositoryResult<ureq::Response> {
        let timer = HttpTimer::new(self.metrics.clone());
        let url = self.build_url(path);
        tracing::debug!("DELETE {}", url);

        let result = self
            .authorize(self.agent.delete(&url))
            .call()
            .map_err(|e| self.map_error(e));

        self.observe("DELETE", &url, timer, result)
    }

    /// Map a ureq error to a RepositoryError.
    fn map_error(&self, error: ureq::Error) -> RepositoryError {
        match error {
            ureq::Error::Status(code, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 | 403 => RepositoryError::Unauthorized,
                    404 => RepositoryError::NotFound(message),
                    429 => RepositoryError::RateLimitExceeded,
                    _ => RepositoryError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    RepositoryError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    RepositoryError::Timeout
                } else {
                    RepositoryError::HttpError(transport.to_string())
                }
            }
        }
    }

    /// Fetch one page of bookmark rows, ordered by row id.
    pub fn fetch_wishlists(&self, limit: usize, offset: usize) -> RepositoryResult<Vec<Bookmark>> {
        let path = format!(
            "{}?select={}&order=id.asc&limit={}&offset={}",
            WISHLISTS_PATH,
            urlencoding::encode(WISHLIST_COLUMNS),
            limit,
            offset
        );
        let response = self.get(&path)?;
        let body = response
            .into_string()
            .map_err(|e| RepositoryError::HttpError(e.to_string()))?;

        let bookmarks: Vec<Bookmark> = serde_json::from_str(&body)?;

        self.metrics.record_bookmarks_fetched(bookmarks.len());
        Ok(bookmarks)
    }

    /// Insert bookmark rows in one request.
    pub fn insert_wishlists(&self, rows: &[Bookmark]) -> RepositoryResult<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let body = serde_json::to_value(rows)?;
        self.post(WISHLISTS_PATH, &body)?;
        Ok(())
    }

    /// Delete every row of the bookmark table.
    pub fn clear_wishlists(&self) -> RepositoryResult<()> {
        let path = format!("{}?id=not.is.null", WISHLISTS_PATH);
        self.delete(&path)?;
        Ok(())
    }
}
